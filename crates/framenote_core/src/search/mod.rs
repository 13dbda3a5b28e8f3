//! Frame search entry points.
//!
//! # Responsibility
//! - Expose syntax (slot name) and semantic (slot value) search over a store.
//! - Keep criteria parsing and result shaping inside core.

pub mod query;
