//! Model file persistence.
//!
//! # Responsibility
//! - Read and write the whole frame store at load/save boundaries.
//! - Keep the on-disk record format inside core.
//!
//! # Invariants
//! - Files written here can always be read back: frame records precede the
//!   slot records that depend on them.

pub mod text;
