//! Frame record.
//!
//! # Responsibility
//! - Own the ordered slot list of one frame.
//! - Provide raw slot mutations for the store to call after validation.
//!
//! # Invariants
//! - Slot order is insertion order; renames and value edits keep position.
//! - The frame's name lives in the store's name table, keyed by `id`.

use crate::model::slot::{FrameId, Slot};
use uuid::Uuid;

/// Named entity holding an ordered list of slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    id: FrameId,
    slots: Vec<Slot>,
}

impl Frame {
    pub(crate) fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub(crate) fn with_id(id: FrameId) -> Self {
        Self {
            id,
            slots: Vec::new(),
        }
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    /// Slots in insertion order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns whether any slot of this frame links to `target`.
    pub fn references(&self, target: FrameId) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.value().target() == Some(target))
    }

    /// Index of the literal slot with the given stored name.
    pub fn literal_position(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.own_name() == Some(name))
    }

    /// Index of the reference slot pointing at `target`.
    pub fn reference_position(&self, target: FrameId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.value().target() == Some(target))
    }

    pub(crate) fn push(&mut self, slot: Slot) {
        self.slots.push(slot);
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    pub(crate) fn remove(&mut self, index: usize) -> Slot {
        self.slots.remove(index)
    }

    /// Drops every reference slot that links to `target`.
    ///
    /// Returns the number of removed slots.
    pub(crate) fn remove_references_to(&mut self, target: FrameId) -> usize {
        let before = self.slots.len();
        self.slots
            .retain(|slot| slot.value().target() != Some(target));
        before - self.slots.len()
    }
}
