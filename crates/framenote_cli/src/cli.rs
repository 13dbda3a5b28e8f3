//! Command-line surface over an editor session.
//!
//! # Responsibility
//! - Map each subcommand onto one session or store operation.
//! - Render results as plain text, or JSON for `show --json`.
//!
//! # Invariants
//! - Only mutating commands report `mutates() == true`; the caller saves
//!   the model after those succeed.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use framenote_core::{EditorSession, FrameStore, SearchMode};
use std::fmt::Write as _;
use std::path::PathBuf;

/// FrameNote - frame-based knowledge model editor
#[derive(Debug, Parser)]
#[command(name = "framenote", version)]
#[command(about = "Edit and query a frame knowledge model stored in a text file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Model file (overrides FRAMENOTE_MODEL_PATH)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print every frame with its slots
    Show {
        /// Print the model snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create an empty frame at a position
    AddFrame {
        name: String,
        #[arg(allow_negative_numbers = true)]
        x: String,
        #[arg(allow_negative_numbers = true)]
        y: String,
    },
    /// Remove a frame and every link pointing at it
    EraseFrame { name: String },
    /// Rename a frame; links follow
    RenameFrame { name: String, new_name: String },
    /// Move a frame; an unparsable axis keeps its value
    MoveFrame {
        name: String,
        #[arg(allow_negative_numbers = true)]
        x: String,
        #[arg(allow_negative_numbers = true)]
        y: String,
    },
    /// Add a literal slot to a frame
    AddSlot {
        frame: String,
        name: String,
        /// Slot text; omitted text stores the empty placeholder
        value: Option<String>,
    },
    /// Add a link slot from FRAME to TARGET
    AddLink { frame: String, target: String },
    /// Rename a literal slot
    RenameSlot {
        frame: String,
        slot: String,
        new_name: String,
    },
    /// Replace the text of a literal slot
    SetSlot {
        frame: String,
        slot: String,
        value: String,
    },
    /// Remove a slot of either kind
    EraseSlot { frame: String, slot: String },
    /// Find frames owning slots with every given name (`;`-separated)
    Syntax { criteria: String },
    /// Find frames owning slots with every given value (`;`-separated)
    Semantic { criteria: String },
}

impl Commands {
    pub fn mutates(&self) -> bool {
        !matches!(
            self,
            Self::Show { .. } | Self::Syntax { .. } | Self::Semantic { .. }
        )
    }
}

/// Runs one command and returns the text to print.
pub fn execute(session: &mut EditorSession, command: &Commands) -> Result<String> {
    match command {
        Commands::Show { json } => {
            if *json {
                serde_json::to_string_pretty(&session.store().snapshot())
                    .context("failed to encode model snapshot")
            } else {
                Ok(render_store(session.store()))
            }
        }
        Commands::AddFrame { name, x, y } => {
            session
                .add_frame_from_input(name, x, y)
                .with_context(|| format!("cannot add frame `{name}`"))?;
            Ok(format!("added frame `{}`", name.trim()))
        }
        Commands::EraseFrame { name } => {
            let erased = session
                .store_mut()
                .erase_frame(name)
                .with_context(|| format!("cannot erase frame `{name}`"))?;
            Ok(format!(
                "erased frame `{}` ({} link slot(s) removed)",
                erased.name, erased.cascaded_slots
            ))
        }
        Commands::RenameFrame { name, new_name } => {
            session
                .store_mut()
                .replace_frame_name(name, new_name.as_str())
                .with_context(|| format!("cannot rename frame `{name}`"))?;
            Ok(format!("renamed frame `{name}` to `{}`", new_name.trim()))
        }
        Commands::MoveFrame { name, x, y } => {
            let position = session
                .edit_frame(name, None, x, y)
                .with_context(|| format!("cannot move frame `{name}`"))?;
            Ok(format!(
                "moved frame `{name}` to ({}, {})",
                position.x, position.y
            ))
        }
        Commands::AddSlot { frame, name, value } => {
            session
                .store_mut()
                .frame_mut(frame)
                .and_then(|mut handle| {
                    handle.add_literal_slot(name.as_str(), value.clone().unwrap_or_default())
                })
                .with_context(|| format!("cannot add slot `{name}` to `{frame}`"))?;
            Ok(format!("added slot `{}` to `{frame}`", name.trim()))
        }
        Commands::AddLink { frame, target } => {
            session
                .store_mut()
                .frame_mut(frame)
                .and_then(|mut handle| handle.add_reference_slot(target))
                .with_context(|| format!("cannot link `{frame}` to `{target}`"))?;
            Ok(format!("linked `{frame}` to `{target}`"))
        }
        Commands::RenameSlot {
            frame,
            slot,
            new_name,
        } => {
            session
                .edit_slot(frame, slot, Some(new_name.as_str()), None)
                .with_context(|| format!("cannot rename slot `{slot}` of `{frame}`"))?;
            Ok(format!("renamed slot `{slot}` to `{}`", new_name.trim()))
        }
        Commands::SetSlot { frame, slot, value } => {
            session
                .edit_slot(frame, slot, None, Some(value.as_str()))
                .with_context(|| format!("cannot set slot `{slot}` of `{frame}`"))?;
            Ok(format!("updated slot `{slot}` of `{frame}`"))
        }
        Commands::EraseSlot { frame, slot } => {
            session
                .store_mut()
                .frame_mut(frame)
                .and_then(|mut handle| handle.erase_slot(slot))
                .with_context(|| format!("cannot erase slot `{slot}` of `{frame}`"))?;
            Ok(format!("erased slot `{slot}` of `{frame}`"))
        }
        Commands::Syntax { criteria } => run_search(session, SearchMode::Syntax, criteria),
        Commands::Semantic { criteria } => run_search(session, SearchMode::Semantic, criteria),
    }
}

fn run_search(session: &EditorSession, mode: SearchMode, criteria: &str) -> Result<String> {
    let outcome = session
        .search_text(mode, criteria)
        .context("search failed")?;
    Ok(outcome.summary())
}

fn render_store(store: &FrameStore) -> String {
    if store.is_empty() {
        return "model is empty".to_string();
    }

    let mut out = String::new();
    for frame in store.frames() {
        let position = frame.position();
        let _ = writeln!(out, "{} ({}, {})", frame.name(), position.x, position.y);
        for slot in frame.slots() {
            if slot.is_reference() {
                let _ = writeln!(out, "  {} -> frame {}", slot.name(), slot.value_text());
            } else {
                let _ = writeln!(out, "  {} = {}", slot.name(), slot.value_text());
            }
        }
    }
    out.trim_end().to_string()
}
