//! Core use-case services.
//!
//! # Responsibility
//! - Turn raw editor input into store, codec and search calls.
//! - Keep presentation layers free of model-file and validation details.

pub mod session;
