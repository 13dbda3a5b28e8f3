//! Syntax and semantic frame search.
//!
//! # Responsibility
//! - Match frames whose slots satisfy every criterion.
//! - Parse `;`-separated criteria text typed by the user.
//!
//! # Invariants
//! - Matching is exact and case-sensitive; all criteria must hold per frame.
//! - Link slots match by the target frame's current name, both as slot name
//!   and as slot value.
//! - Results follow store order; an empty result is not an error.

use crate::store::frame_store::FrameStore;
use crate::store::handle::{FrameView, SlotView};
use log::debug;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Delimiter between criteria in user input.
pub const CRITERIA_DELIMITER: char = ';';

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for criteria validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// No criteria were supplied.
    EmptyCriteria,
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCriteria => write!(f, "search criteria must not be empty"),
        }
    }
}

impl Error for SearchError {}

/// Which part of a slot is compared against the criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Compare slot names.
    Syntax,
    /// Compare slot values.
    Semantic,
}

impl SearchMode {
    fn label(self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Semantic => "semantic",
        }
    }

    fn key<'a>(self, slot: &SlotView<'a>) -> &'a str {
        match self {
            Self::Syntax => slot.name(),
            Self::Semantic => slot.value_text(),
        }
    }
}

/// Parsed search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub mode: SearchMode,
    pub criteria: Vec<String>,
}

impl SearchQuery {
    pub fn new(mode: SearchMode, criteria: Vec<String>) -> Self {
        Self { mode, criteria }
    }

    /// Splits user text on `;`, trimming pieces and dropping blank ones.
    ///
    /// # Errors
    /// - `EmptyCriteria` when nothing but delimiters and whitespace remains.
    pub fn parse(mode: SearchMode, text: &str) -> SearchResult<Self> {
        let criteria = text
            .split(CRITERIA_DELIMITER)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        if criteria.is_empty() {
            return Err(SearchError::EmptyCriteria);
        }
        Ok(Self { mode, criteria })
    }
}

/// Frames matched by one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub mode: SearchMode,
    /// Matching frame names in store order.
    pub frames: Vec<String>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.frames.iter().any(|frame| frame == name)
    }

    /// Human-readable aggregation of the result.
    pub fn summary(&self) -> String {
        if self.frames.is_empty() {
            return format!("{} search: no matching frames", self.mode.label());
        }
        format!(
            "{} search: {} matching frame(s): {}",
            self.mode.label(),
            self.frames.len(),
            self.frames.join(", ")
        )
    }
}

/// Finds frames owning a slot named after every criterion.
pub fn syntax_search<S: AsRef<str>>(
    store: &FrameStore,
    criteria: &[S],
) -> SearchResult<SearchOutcome> {
    run(store, SearchMode::Syntax, criteria)
}

/// Finds frames owning a slot valued after every criterion.
pub fn semantic_search<S: AsRef<str>>(
    store: &FrameStore,
    criteria: &[S],
) -> SearchResult<SearchOutcome> {
    run(store, SearchMode::Semantic, criteria)
}

/// Runs a parsed query.
pub fn search(store: &FrameStore, query: &SearchQuery) -> SearchResult<SearchOutcome> {
    run(store, query.mode, &query.criteria)
}

fn run<S: AsRef<str>>(
    store: &FrameStore,
    mode: SearchMode,
    criteria: &[S],
) -> SearchResult<SearchOutcome> {
    let wanted = criteria
        .iter()
        .map(|criterion| criterion.as_ref().trim())
        .filter(|criterion| !criterion.is_empty())
        .collect::<HashSet<&str>>();
    if wanted.is_empty() {
        return Err(SearchError::EmptyCriteria);
    }
    let frames = store
        .frames()
        .filter(|frame| frame_matches(frame, mode, &wanted))
        .map(|frame| frame.name().to_string())
        .collect::<Vec<_>>();

    debug!(
        "event=search module=search status=ok mode={} criteria={} hits={}",
        mode.label(),
        wanted.len(),
        frames.len()
    );
    Ok(SearchOutcome { mode, frames })
}

fn frame_matches(frame: &FrameView<'_>, mode: SearchMode, wanted: &HashSet<&str>) -> bool {
    if frame.is_empty() {
        return false;
    }
    let keys = frame
        .slots()
        .map(|slot| mode.key(&slot))
        .collect::<HashSet<_>>();
    wanted.iter().all(|criterion| keys.contains(criterion))
}
