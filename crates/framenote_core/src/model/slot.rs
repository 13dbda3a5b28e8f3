//! Slot value model.
//!
//! # Responsibility
//! - Define the closed literal/reference slot value union.
//! - Normalize literal text at creation time.
//!
//! # Invariants
//! - Literal text is never blank; blank input becomes [`EMPTY_SLOT_VALUE`].
//! - Literal text never contains line breaks.
//! - Only literal slots carry their own name.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a frame. References bind to it, not to the name.
pub type FrameId = Uuid;

/// Placeholder stored in place of an empty literal value.
pub const EMPTY_SLOT_VALUE: &str = "(empty)";

/// Value held by a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SlotValue {
    /// Free-form text.
    Literal(String),
    /// Link to another frame of the same store.
    Reference(FrameId),
}

impl SlotValue {
    /// Creates a literal value, normalizing empty text to the placeholder.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(normalize_literal_text(text.into()))
    }

    /// Creates a reference value bound to `target`.
    pub fn reference(target: FrameId) -> Self {
        Self::Reference(target)
    }

    pub fn is_reference(&self) -> bool {
        match self {
            Self::Literal(_) => false,
            Self::Reference(_) => true,
        }
    }

    /// Returns the literal text, or `None` for references.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text.as_str()),
            Self::Reference(_) => None,
        }
    }

    /// Returns the referenced frame, or `None` for literals.
    pub fn target(&self) -> Option<FrameId> {
        match self {
            Self::Literal(_) => None,
            Self::Reference(target) => Some(*target),
        }
    }
}

/// One named attribute of a frame.
///
/// The name is only stored for literal slots. Reference slots are named by
/// their target, which the store resolves on every read so renames never
/// leave a stale copy behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    label: Option<String>,
    value: SlotValue,
}

impl Slot {
    pub(crate) fn literal(name: String, text: String) -> Self {
        Self {
            label: Some(name),
            value: SlotValue::literal(text),
        }
    }

    pub(crate) fn reference(target: FrameId) -> Self {
        Self {
            label: None,
            value: SlotValue::reference(target),
        }
    }

    pub fn value(&self) -> &SlotValue {
        &self.value
    }

    /// Returns the stored name of a literal slot.
    ///
    /// Reference slots return `None`; their name is the target's name.
    pub fn own_name(&self) -> Option<&str> {
        match self.value {
            SlotValue::Literal(_) => self.label.as_deref(),
            SlotValue::Reference(_) => None,
        }
    }

    /// Renames a literal slot. Returns `false` for reference slots.
    pub(crate) fn rename(&mut self, name: String) -> bool {
        match self.value {
            SlotValue::Literal(_) => {
                self.label = Some(name);
                true
            }
            SlotValue::Reference(_) => false,
        }
    }

    /// Replaces literal text. Returns `false` for reference slots.
    pub(crate) fn replace_text(&mut self, text: String) -> bool {
        match &mut self.value {
            SlotValue::Literal(current) => {
                *current = normalize_literal_text(text);
                true
            }
            SlotValue::Reference(_) => false,
        }
    }
}

fn normalize_literal_text(text: String) -> String {
    if text.trim().is_empty() {
        return EMPTY_SLOT_VALUE.to_string();
    }
    if text.contains(['\n', '\r']) {
        return text.replace("\r\n", " ").replace(['\n', '\r'], " ");
    }
    text
}
