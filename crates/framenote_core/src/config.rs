//! Runtime configuration for core callers.
//!
//! # Responsibility
//! - Resolve the model file location and logging settings.
//! - Read overrides from `FRAMENOTE_*` environment variables.
//!
//! # Invariants
//! - Blank environment values are ignored, never treated as paths.
//! - Explicit caller overrides win over environment values.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Environment variable overriding the model file path.
pub const MODEL_PATH_ENV: &str = "FRAMENOTE_MODEL_PATH";
/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "FRAMENOTE_LOG_LEVEL";
/// Environment variable enabling file logging into a directory.
pub const LOG_DIR_ENV: &str = "FRAMENOTE_LOG_DIR";
/// Model file used when nothing else is configured.
pub const DEFAULT_MODEL_PATH: &str = "resource/frame_model.fm";

/// Settings shared by every core entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Persistence file read at startup and written on save.
    pub model_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute log directory; `None` keeps file logging off.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Builds configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            model_path: non_blank(lookup(MODEL_PATH_ENV))
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            log_level: non_blank(lookup(LOG_LEVEL_ENV)).unwrap_or(defaults.log_level),
            log_dir: non_blank(lookup(LOG_DIR_ENV)).map(PathBuf::from),
        }
    }

    /// Applies caller-provided values on top of this configuration.
    pub fn with_overrides(
        mut self,
        model_path: Option<PathBuf>,
        log_level: Option<String>,
        log_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(model_path) = model_path {
            self.model_path = model_path;
        }
        if let Some(log_level) = non_blank(log_level) {
            self.log_level = log_level;
        }
        if let Some(log_dir) = log_dir {
            self.log_dir = Some(log_dir);
        }
        self
    }
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DEFAULT_MODEL_PATH, LOG_DIR_ENV, LOG_LEVEL_ENV, MODEL_PATH_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn lookup_reads_values_and_ignores_blank_ones() {
        let env = HashMap::from([
            (MODEL_PATH_ENV, " /tmp/model.fm ".to_string()),
            (LOG_LEVEL_ENV, "   ".to_string()),
            (LOG_DIR_ENV, "/tmp/framenote-logs".to_string()),
        ]);
        let config = CoreConfig::from_lookup(|key| env.get(key).cloned());

        assert_eq!(config.model_path, PathBuf::from("/tmp/model.fm"));
        assert_eq!(config.log_level, CoreConfig::default().log_level);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/framenote-logs")));
    }

    #[test]
    fn overrides_win_over_lookup() {
        let config = CoreConfig::from_lookup(|_| None).with_overrides(
            Some(PathBuf::from("other.fm")),
            Some("warn".to_string()),
            None,
        );

        assert_eq!(config.model_path, PathBuf::from("other.fm"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
        assert_ne!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }
}
