//! Frame-model data types.
//!
//! # Responsibility
//! - Define the raw records held by the store: frames, slots and positions.
//! - Keep slot values as an explicit literal-or-reference union.
//!
//! # Invariants
//! - Types here carry data only; name uniqueness and cross-frame rules are
//!   enforced by `store`, which is the only code allowed to mutate them.
//! - A reference slot never stores its own name; it is derived from the
//!   target frame's current name.

pub mod frame;
pub mod position;
pub mod slot;
