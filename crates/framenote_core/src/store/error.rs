//! Store-level error type.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by frame store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from frame and slot mutations or lookups.
///
/// Every failing operation leaves the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Name is blank after trim or contains a line break.
    InvalidName(String),
    /// Another frame already uses this name.
    DuplicateFrameName(String),
    /// The frame already has a slot with this name.
    DuplicateSlotName { frame: String, slot: String },
    /// A slot would carry the name of the frame that owns it.
    SelfReferentialName(String),
    /// A renamed literal slot would carry the name of an existing frame.
    SlotNameShadowsFrame(String),
    /// Reference slots are named by their target and hold no editable text.
    SlotIsReference { frame: String, slot: String },
    /// No frame with this name exists.
    FrameNotFound(String),
    /// The frame has no slot with this name.
    SlotNotFound { frame: String, slot: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(raw) => write!(f, "invalid name: `{raw}`"),
            Self::DuplicateFrameName(name) => write!(f, "frame `{name}` already exists"),
            Self::DuplicateSlotName { frame, slot } => {
                write!(f, "frame `{frame}` already has slot `{slot}`")
            }
            Self::SelfReferentialName(frame) => {
                write!(f, "frame `{frame}` cannot contain a slot named after itself")
            }
            Self::SlotNameShadowsFrame(name) => {
                write!(f, "slot name `{name}` is already used by a frame")
            }
            Self::SlotIsReference { frame, slot } => {
                write!(f, "slot `{slot}` of frame `{frame}` is a frame link")
            }
            Self::FrameNotFound(name) => write!(f, "frame not found: `{name}`"),
            Self::SlotNotFound { frame, slot } => {
                write!(f, "frame `{frame}` has no slot `{slot}`")
            }
        }
    }
}

impl Error for StoreError {}
