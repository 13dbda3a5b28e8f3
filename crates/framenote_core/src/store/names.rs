//! Frame name table.
//!
//! # Invariants
//! - `by_name` and `by_id` always hold the same set of pairs.
//! - Iteration follows `by_name` key order, which is the store order.

use crate::model::slot::FrameId;
use crate::store::error::{StoreError, StoreResult};
use std::collections::{BTreeMap, HashMap};

/// Bidirectional map between frame names and frame ids.
#[derive(Debug, Clone, Default)]
pub(crate) struct NameTable {
    by_name: BTreeMap<String, FrameId>,
    by_id: HashMap<FrameId, String>,
}

impl NameTable {
    pub(crate) fn id_of(&self, name: &str) -> Option<FrameId> {
        self.by_name.get(name).copied()
    }

    pub(crate) fn name_of(&self, id: FrameId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.by_name.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, FrameId)> {
        self.by_name.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub(crate) fn insert(&mut self, name: String, id: FrameId) {
        self.by_id.insert(id, name.clone());
        self.by_name.insert(name, id);
    }

    pub(crate) fn remove(&mut self, id: FrameId) -> Option<String> {
        let name = self.by_id.remove(&id)?;
        self.by_name.remove(&name);
        Some(name)
    }

    pub(crate) fn rename(&mut self, id: FrameId, new_name: String) {
        if let Some(old_name) = self.by_id.insert(id, new_name.clone()) {
            self.by_name.remove(&old_name);
        }
        self.by_name.insert(new_name, id);
    }

    /// Returns whether both directions agree.
    pub(crate) fn is_consistent(&self) -> bool {
        self.by_name.len() == self.by_id.len()
            && self
                .by_name
                .iter()
                .all(|(name, id)| self.by_id.get(id) == Some(name))
    }
}

/// Trims a frame or slot name and rejects unusable input.
///
/// # Errors
/// - `InvalidName` when the name is blank or contains a line break.
pub fn normalize_name(raw: impl Into<String>) -> StoreResult<String> {
    let raw = raw.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains(['\n', '\r']) {
        return Err(StoreError::InvalidName(raw));
    }
    if trimmed.len() == raw.len() {
        return Ok(raw);
    }
    Ok(trimmed.to_string())
}
