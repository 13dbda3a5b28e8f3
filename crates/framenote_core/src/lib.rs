//! Core domain logic for FrameNote.
//! This crate is the single source of truth for frame-model invariants.

pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use codec::text::{
    load_file_into, load_from_file, load_into, save, save_to_file, CodecError, CodecResult,
    LoadSummary, FILLER_CHAR, LINK_MARKER,
};
pub use config::CoreConfig;
pub use logging::{
    default_log_level, init_from_config, init_logging, logging_status, LoggingError,
};
pub use model::frame::Frame;
pub use model::position::Position;
pub use model::slot::{FrameId, Slot, SlotValue, EMPTY_SLOT_VALUE};
pub use search::query::{
    search, semantic_search, syntax_search, SearchError, SearchMode, SearchOutcome, SearchQuery,
    SearchResult,
};
pub use service::session::{EditorSession, SessionError, SessionResult};
pub use store::error::{StoreError, StoreResult};
pub use store::frame_store::{ErasedFrame, FrameStore};
pub use store::handle::{FrameMut, FrameView, SlotView};
pub use store::snapshot::{FrameSnapshot, SlotSnapshot, SlotSnapshotValue, StoreSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
