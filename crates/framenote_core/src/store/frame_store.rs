//! Frame store: the top-level container of the frame model.
//!
//! # Responsibility
//! - Own every frame, its position and the global name table.
//! - Enforce name uniqueness and cross-frame consistency on each mutation.
//!
//! # Invariants
//! - No two frames share a name.
//! - Every reference slot targets a frame present in the store.
//! - Erasing a frame cascades: link slots pointing at it are removed first.
//! - Renaming a frame keeps links intact; they are bound by `FrameId`.
//! - Failed operations leave the store unchanged.

use crate::model::frame::Frame;
use crate::model::position::Position;
use crate::model::slot::{FrameId, SlotValue};
use crate::store::error::{StoreError, StoreResult};
use crate::store::handle::{FrameMut, FrameView};
use crate::store::names::{normalize_name, NameTable};
use crate::store::snapshot::StoreSnapshot;
use log::debug;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub(crate) struct FrameRecord {
    pub(crate) frame: Frame,
    pub(crate) position: Position,
}

/// Summary of a removed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErasedFrame {
    pub id: FrameId,
    pub name: String,
    pub position: Position,
    /// Link slots removed from other frames because they targeted this one.
    pub cascaded_slots: usize,
}

/// In-memory frame model.
#[derive(Debug, Clone, Default)]
pub struct FrameStore {
    names: NameTable,
    records: HashMap<FrameId, FrameRecord>,
}

impl FrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.len() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn frame_id(&self, name: &str) -> Option<FrameId> {
        self.names.id_of(name)
    }

    /// Current name of the frame with `id`.
    pub fn frame_name(&self, id: FrameId) -> Option<&str> {
        self.names.name_of(id)
    }

    /// Creates an empty frame.
    ///
    /// # Errors
    /// - `InvalidName` for a blank name.
    /// - `DuplicateFrameName` when the name is taken.
    pub fn add_frame(
        &mut self,
        name: impl Into<String>,
        position: Position,
    ) -> StoreResult<FrameId> {
        let name = normalize_name(name)?;
        if self.names.contains(&name) {
            return Err(StoreError::DuplicateFrameName(name));
        }

        let frame = Frame::new();
        let id = frame.id();
        self.records.insert(id, FrameRecord { frame, position });
        self.names.insert(name, id);

        debug!(
            "event=frame_add module=store status=ok frames={}",
            self.len()
        );
        Ok(id)
    }

    /// Removes a frame and every link slot that targets it.
    ///
    /// # Errors
    /// - `FrameNotFound` when no frame has this name.
    pub fn erase_frame(&mut self, name: &str) -> StoreResult<ErasedFrame> {
        let id = self.require_id(name)?;
        let record = self
            .records
            .remove(&id)
            .ok_or_else(|| StoreError::FrameNotFound(name.to_string()))?;
        let name = self.names.remove(id).unwrap_or_else(|| name.to_string());

        let cascaded_slots: usize = self
            .records
            .values_mut()
            .map(|other| other.frame.remove_references_to(id))
            .sum();

        debug!(
            "event=frame_erase module=store status=ok frames={} cascaded_slots={}",
            self.len(),
            cascaded_slots
        );
        Ok(ErasedFrame {
            id,
            name,
            position: record.position,
            cascaded_slots,
        })
    }

    /// Renames a frame; links to it follow automatically.
    ///
    /// Renaming a frame to its current name is a no-op.
    ///
    /// # Errors
    /// - `FrameNotFound` when `old_name` is absent.
    /// - `InvalidName` for a blank new name.
    /// - `DuplicateFrameName` when `new_name` is taken.
    /// - `SelfReferentialName` when the frame owns a literal slot `new_name`.
    /// - `DuplicateSlotName` when a frame linking here already owns a literal
    ///   slot `new_name`.
    pub fn replace_frame_name(
        &mut self,
        old_name: &str,
        new_name: impl Into<String>,
    ) -> StoreResult<()> {
        let id = self.require_id(old_name)?;
        let new_name = normalize_name(new_name)?;
        if new_name == old_name {
            return Ok(());
        }
        if self.names.contains(&new_name) {
            return Err(StoreError::DuplicateFrameName(new_name));
        }

        let record = self.require_record(id, old_name)?;
        if record.frame.literal_position(&new_name).is_some() {
            return Err(StoreError::SelfReferentialName(old_name.to_string()));
        }

        for (other_name, other_id) in self.names.iter() {
            let Some(other) = self.records.get(&other_id) else {
                continue;
            };
            if other.frame.references(id) && other.frame.literal_position(&new_name).is_some() {
                return Err(StoreError::DuplicateSlotName {
                    frame: other_name.to_string(),
                    slot: new_name,
                });
            }
        }

        self.names.rename(id, new_name);
        debug!("event=frame_rename module=store status=ok");
        Ok(())
    }

    /// Moves a frame using textual coordinates.
    ///
    /// An axis whose text is not an integer keeps its current value.
    /// Returns the resulting position.
    ///
    /// # Errors
    /// - `FrameNotFound` when no frame has this name.
    pub fn replace_frame_coords(
        &mut self,
        name: &str,
        x_text: &str,
        y_text: &str,
    ) -> StoreResult<Position> {
        let record = self.record_mut(name)?;
        record.position = record.position.with_text(x_text, y_text);
        Ok(record.position)
    }

    pub fn set_position(&mut self, name: &str, position: Position) -> StoreResult<()> {
        self.record_mut(name)?.position = position;
        Ok(())
    }

    pub fn position(&self, name: &str) -> StoreResult<Position> {
        Ok(self.at(name)?.position())
    }

    /// Looks up a frame by name.
    ///
    /// # Errors
    /// - `FrameNotFound` when no frame has this name.
    pub fn at(&self, name: &str) -> StoreResult<FrameView<'_>> {
        let id = self.require_id(name)?;
        self.view(id)
            .ok_or_else(|| StoreError::FrameNotFound(name.to_string()))
    }

    /// Looks up a frame by id.
    pub fn view(&self, id: FrameId) -> Option<FrameView<'_>> {
        let name = self.names.name_of(id)?;
        let record = self.records.get(&id)?;
        Some(FrameView::new(name, record, &self.names))
    }

    /// Returns a mutable handle for slot operations on one frame.
    ///
    /// # Errors
    /// - `FrameNotFound` when no frame has this name.
    pub fn frame_mut(&mut self, name: &str) -> StoreResult<FrameMut<'_>> {
        let id = self.require_id(name)?;
        let stored_name = self
            .names
            .name_of(id)
            .ok_or_else(|| StoreError::FrameNotFound(name.to_string()))?;
        let record = self
            .records
            .get_mut(&id)
            .ok_or_else(|| StoreError::FrameNotFound(name.to_string()))?;
        Ok(FrameMut::new(stored_name, record, &self.names))
    }

    /// All frames in store order (ascending by name).
    pub fn frames(&self) -> impl Iterator<Item = FrameView<'_>> + '_ {
        self.names.iter().filter_map(move |(name, id)| {
            self.records
                .get(&id)
                .map(|record| FrameView::new(name, record, &self.names))
        })
    }

    /// Owned copy of the whole model for presentation layers.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::capture(self)
    }

    /// Checks every store invariant.
    ///
    /// Returns `false` if any name, link or slot rule is violated.
    pub fn is_consistent(&self) -> bool {
        if !self.names.is_consistent() || self.names.len() != self.records.len() {
            return false;
        }

        self.names.iter().all(|(name, id)| {
            let Some(record) = self.records.get(&id) else {
                return false;
            };
            if record.frame.id() != id {
                return false;
            }

            let mut seen = HashSet::new();
            record.frame.slots().iter().all(|slot| {
                let slot_name = match slot.value() {
                    SlotValue::Literal(_) => slot.own_name(),
                    SlotValue::Reference(target) if *target != id => self.names.name_of(*target),
                    SlotValue::Reference(_) => None,
                };
                match slot_name {
                    Some(slot_name) => slot_name != name && seen.insert(slot_name),
                    None => false,
                }
            })
        })
    }

    fn require_id(&self, name: &str) -> StoreResult<FrameId> {
        self.names
            .id_of(name)
            .ok_or_else(|| StoreError::FrameNotFound(name.to_string()))
    }

    fn require_record(&self, id: FrameId, name: &str) -> StoreResult<&FrameRecord> {
        self.records
            .get(&id)
            .ok_or_else(|| StoreError::FrameNotFound(name.to_string()))
    }

    fn record_mut(&mut self, name: &str) -> StoreResult<&mut FrameRecord> {
        let id = self.require_id(name)?;
        self.records
            .get_mut(&id)
            .ok_or_else(|| StoreError::FrameNotFound(name.to_string()))
    }
}
