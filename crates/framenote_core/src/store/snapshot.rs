//! Owned, serializable view of a frame store.
//!
//! Presentation layers re-derive their lists from a snapshot after each
//! mutation instead of mirroring store changes themselves.

use crate::model::position::Position;
use crate::model::slot::SlotValue;
use crate::store::frame_store::FrameStore;
use crate::store::handle::{FrameView, SlotView};
use serde::{Deserialize, Serialize};

/// Whole-store snapshot in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub frames: Vec<FrameSnapshot>,
}

/// One frame with resolved slot names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub name: String,
    pub position: Position,
    pub slots: Vec<SlotSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    pub name: String,
    pub value: SlotSnapshotValue,
}

/// Slot value with links expressed by target name instead of id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotSnapshotValue {
    Literal { text: String },
    Reference { target: String },
}

impl StoreSnapshot {
    pub(crate) fn capture(store: &FrameStore) -> Self {
        Self {
            frames: store.frames().map(FrameSnapshot::from).collect(),
        }
    }

    pub fn frame(&self, name: &str) -> Option<&FrameSnapshot> {
        self.frames.iter().find(|frame| frame.name == name)
    }
}

impl From<FrameView<'_>> for FrameSnapshot {
    fn from(view: FrameView<'_>) -> Self {
        Self {
            name: view.name().to_string(),
            position: view.position(),
            slots: view.slots().map(SlotSnapshot::from).collect(),
        }
    }
}

impl From<SlotView<'_>> for SlotSnapshot {
    fn from(view: SlotView<'_>) -> Self {
        let value = match view.value() {
            SlotValue::Literal(text) => SlotSnapshotValue::Literal { text: text.clone() },
            SlotValue::Reference(_) => SlotSnapshotValue::Reference {
                target: view.value_text().to_string(),
            },
        };
        Self {
            name: view.name().to_string(),
            value,
        }
    }
}
