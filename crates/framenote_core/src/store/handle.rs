//! Borrowed frame handles.
//!
//! # Responsibility
//! - Expose read views over one frame with slot names resolved.
//! - Guard every slot mutation with the store's name context.
//!
//! # Invariants
//! - A reference slot is always reported under its target's current name.
//! - Slot checks run before any mutation, so a failed call changes nothing.

use crate::model::frame::Frame;
use crate::model::position::Position;
use crate::model::slot::{FrameId, Slot, SlotValue};
use crate::store::error::{StoreError, StoreResult};
use crate::store::frame_store::FrameRecord;
use crate::store::names::{normalize_name, NameTable};

/// Read-only view of one frame in the store.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    name: &'a str,
    record: &'a FrameRecord,
    names: &'a NameTable,
}

/// Read-only view of one slot with its resolved name and display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotView<'a> {
    name: &'a str,
    value: &'a SlotValue,
    text: &'a str,
}

impl<'a> SlotView<'a> {
    /// Slot name; for links this is the target frame's current name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn value(&self) -> &'a SlotValue {
        self.value
    }

    /// Literal text, or the target frame's current name for links.
    pub fn value_text(&self) -> &'a str {
        self.text
    }

    pub fn is_reference(&self) -> bool {
        self.value.is_reference()
    }
}

impl<'a> FrameView<'a> {
    pub(crate) fn new(name: &'a str, record: &'a FrameRecord, names: &'a NameTable) -> Self {
        Self {
            name,
            record,
            names,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn id(&self) -> FrameId {
        self.record.frame.id()
    }

    pub fn position(&self) -> Position {
        self.record.position
    }

    /// Underlying frame record.
    pub fn frame(&self) -> &'a Frame {
        let record = self.record;
        &record.frame
    }

    pub fn len(&self) -> usize {
        self.record.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.frame.is_empty()
    }

    /// Slots in insertion order.
    pub fn slots(&self) -> impl Iterator<Item = SlotView<'a>> + 'a {
        let names = self.names;
        let record = self.record;
        record
            .frame
            .slots()
            .iter()
            .filter_map(move |slot| resolve_slot(slot, names))
    }

    pub fn slot(&self, name: &str) -> Option<SlotView<'a>> {
        let record = self.record;
        let index = slot_index(&record.frame, self.names, name)?;
        resolve_slot(&record.frame.slots()[index], self.names)
    }

    pub fn contains(&self, name: &str) -> bool {
        slot_index(&self.record.frame, self.names, name).is_some()
    }

    /// Display text of a slot value, resolving links dynamically.
    pub fn slot_value_text(&self, name: &str) -> Option<&'a str> {
        self.slot(name).map(|slot| slot.value_text())
    }
}

/// Mutable handle over one frame, bound to the store's name table.
#[derive(Debug)]
pub struct FrameMut<'a> {
    name: &'a str,
    record: &'a mut FrameRecord,
    names: &'a NameTable,
}

impl<'a> FrameMut<'a> {
    pub(crate) fn new(name: &'a str, record: &'a mut FrameRecord, names: &'a NameTable) -> Self {
        Self {
            name,
            record,
            names,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView::new(self.name, &*self.record, self.names)
    }

    pub fn contains(&self, name: &str) -> bool {
        slot_index(&self.record.frame, self.names, name).is_some()
    }

    /// Adds a literal slot at the end of the slot list.
    ///
    /// # Errors
    /// - `InvalidName` for a blank name.
    /// - `SelfReferentialName` when `name` equals this frame's name.
    /// - `DuplicateSlotName` when a slot with `name` already exists.
    pub fn add_literal_slot(
        &mut self,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> StoreResult<()> {
        let name = normalize_name(name)?;
        self.ensure_slot_name_free(&name)?;
        self.record.frame.push(Slot::literal(name, text.into()));
        Ok(())
    }

    /// Adds a link slot to the frame named `target_name`.
    ///
    /// The slot is named after the target and follows its renames.
    ///
    /// # Errors
    /// - `FrameNotFound` when the target does not exist.
    /// - `SelfReferentialName` when the target is this frame.
    /// - `DuplicateSlotName` when a slot named like the target already exists.
    pub fn add_reference_slot(&mut self, target_name: &str) -> StoreResult<()> {
        let target = self
            .names
            .id_of(target_name)
            .ok_or_else(|| StoreError::FrameNotFound(target_name.to_string()))?;
        self.ensure_slot_name_free(target_name)?;
        self.record.frame.push(Slot::reference(target));
        Ok(())
    }

    /// Renames a literal slot in place, keeping its value and position.
    ///
    /// # Errors
    /// - `SlotNotFound` when `old_name` is absent.
    /// - `SlotIsReference` for link slots, which are named by their target.
    /// - `InvalidName`, `SelfReferentialName`, `DuplicateSlotName` as for add.
    /// - `SlotNameShadowsFrame` when a frame is already named `new_name`.
    pub fn replace_slot_name(
        &mut self,
        old_name: &str,
        new_name: impl Into<String>,
    ) -> StoreResult<()> {
        let index = self.require_literal(old_name)?;
        let new_name = normalize_name(new_name)?;
        if new_name == old_name {
            return Ok(());
        }
        self.ensure_slot_name_free(&new_name)?;
        if self.names.contains(&new_name) {
            return Err(StoreError::SlotNameShadowsFrame(new_name));
        }

        if let Some(slot) = self.record.frame.slot_mut(index) {
            slot.rename(new_name);
        }
        Ok(())
    }

    /// Replaces the text of a literal slot; empty text becomes the placeholder.
    ///
    /// # Errors
    /// - `SlotNotFound` when `name` is absent.
    /// - `SlotIsReference` for link slots.
    pub fn replace_slot_value(&mut self, name: &str, text: impl Into<String>) -> StoreResult<()> {
        let index = self.require_literal(name)?;
        if let Some(slot) = self.record.frame.slot_mut(index) {
            slot.replace_text(text.into());
        }
        Ok(())
    }

    /// Removes a slot of either kind.
    ///
    /// # Errors
    /// - `SlotNotFound` when `name` is absent.
    pub fn erase_slot(&mut self, name: &str) -> StoreResult<()> {
        let index = self.require_slot(name)?;
        self.record.frame.remove(index);
        Ok(())
    }

    fn ensure_slot_name_free(&self, name: &str) -> StoreResult<()> {
        if name == self.name {
            return Err(StoreError::SelfReferentialName(self.name.to_string()));
        }
        if self.contains(name) {
            return Err(StoreError::DuplicateSlotName {
                frame: self.name.to_string(),
                slot: name.to_string(),
            });
        }
        Ok(())
    }

    fn require_slot(&self, name: &str) -> StoreResult<usize> {
        slot_index(&self.record.frame, self.names, name).ok_or_else(|| StoreError::SlotNotFound {
            frame: self.name.to_string(),
            slot: name.to_string(),
        })
    }

    fn require_literal(&self, name: &str) -> StoreResult<usize> {
        let index = self.require_slot(name)?;
        match self.record.frame.slots()[index].value() {
            SlotValue::Literal(_) => Ok(index),
            SlotValue::Reference(_) => Err(StoreError::SlotIsReference {
                frame: self.name.to_string(),
                slot: name.to_string(),
            }),
        }
    }
}

/// Finds a slot by its resolved name.
pub(crate) fn slot_index(frame: &Frame, names: &NameTable, name: &str) -> Option<usize> {
    frame
        .literal_position(name)
        .or_else(|| names.id_of(name).and_then(|id| frame.reference_position(id)))
}

fn resolve_slot<'a>(slot: &'a Slot, names: &'a NameTable) -> Option<SlotView<'a>> {
    match slot.value() {
        SlotValue::Literal(text) => Some(SlotView {
            name: slot.own_name()?,
            value: slot.value(),
            text: text.as_str(),
        }),
        SlotValue::Reference(target) => {
            let name = names.name_of(*target)?;
            Some(SlotView {
                name,
                value: slot.value(),
                text: name,
            })
        }
    }
}
