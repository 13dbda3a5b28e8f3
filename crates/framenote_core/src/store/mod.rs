//! Frame store and its mutation contracts.
//!
//! # Responsibility
//! - Hold the frame model as the single source of truth.
//! - Centralize name uniqueness and referential integrity checks.
//!
//! # Invariants
//! - Frames are created only by `FrameStore::add_frame` and destroyed only by
//!   `FrameStore::erase_frame`.
//! - Slots are changed only through `FrameMut`, which sees the global names.

pub mod error;
pub mod frame_store;
pub mod handle;
mod names;
pub mod snapshot;

pub use names::normalize_name;
