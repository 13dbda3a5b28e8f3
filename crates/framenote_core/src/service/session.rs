//! Editor session over one model file.
//!
//! # Responsibility
//! - Load the model file once and save it on request.
//! - Validate raw text input from editor forms before touching the store.
//! - Run text searches typed by the user.
//!
//! # Invariants
//! - Blank optional fields mean "leave unchanged".
//! - `edit_frame` moves the frame before renaming it; a rejected rename keeps
//!   the move.
//! - The session never writes the model file implicitly.

use crate::codec::text::{load_file_into, save_to_file, CodecError};
use crate::config::CoreConfig;
use crate::model::position::Position;
use crate::model::slot::FrameId;
use crate::search::query::{search, SearchError, SearchMode, SearchOutcome, SearchQuery};
use crate::store::error::StoreError;
use crate::store::frame_store::FrameStore;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Result type for session APIs.
pub type SessionResult<T> = Result<T, SessionError>;

/// Service error for editor use-cases.
#[derive(Debug)]
pub enum SessionError {
    /// Required form field was left blank.
    MissingInput(&'static str),
    /// Coordinate text is not an integer.
    InvalidCoordinate(String),
    Store(StoreError),
    Codec(CodecError),
    Search(SearchError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInput(field) => write!(f, "`{field}` must not be empty"),
            Self::InvalidCoordinate(text) => write!(f, "invalid coordinate `{text}`"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
            Self::Search(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::Search(err) => Some(err),
            Self::MissingInput(_) | Self::InvalidCoordinate(_) => None,
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<CodecError> for SessionError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

impl From<SearchError> for SessionError {
    fn from(value: SearchError) -> Self {
        Self::Search(value)
    }
}

/// A frame store bound to the file it was loaded from.
#[derive(Debug)]
pub struct EditorSession {
    path: PathBuf,
    store: FrameStore,
}

impl EditorSession {
    /// Loads `path`; a missing file opens an empty model.
    ///
    /// # Errors
    /// - `Codec` when the file exists but cannot be read back.
    pub fn open(path: impl Into<PathBuf>) -> SessionResult<Self> {
        match Self::open_partial(path) {
            (session, None) => Ok(session),
            (_, Some(err)) => Err(err.into()),
        }
    }

    /// Loads `path`, keeping the frames and slots read before a bad line.
    ///
    /// The returned error, if any, describes the line that stopped the read.
    pub fn open_partial(path: impl Into<PathBuf>) -> (Self, Option<CodecError>) {
        let path = path.into();
        let mut store = FrameStore::new();
        let err = load_file_into(&mut store, &path).err();
        (Self { path, store }, err)
    }

    /// Opens the model file named by `config`.
    pub fn from_config(config: &CoreConfig) -> SessionResult<Self> {
        Self::open(config.model_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FrameStore {
        &mut self.store
    }

    /// Writes the whole model back to the session file.
    pub fn save(&self) -> SessionResult<()> {
        save_to_file(&self.store, &self.path)?;
        Ok(())
    }

    /// Creates a frame from the add-frame form.
    ///
    /// # Errors
    /// - `MissingInput` when the name or either coordinate is blank.
    /// - `InvalidCoordinate` when a coordinate is not an integer.
    /// - `Store` when the store rejects the name.
    pub fn add_frame_from_input(
        &mut self,
        name: &str,
        x_text: &str,
        y_text: &str,
    ) -> SessionResult<FrameId> {
        let name = required("name", name)?;
        let x = parse_coordinate(required("x", x_text)?)?;
        let y = parse_coordinate(required("y", y_text)?)?;
        Ok(self.store.add_frame(name, Position::new(x, y))?)
    }

    /// Applies the edit-frame form to `name`.
    ///
    /// Non-integer coordinate text keeps that axis. A blank `new_name` skips
    /// the rename.
    pub fn edit_frame(
        &mut self,
        name: &str,
        new_name: Option<&str>,
        x_text: &str,
        y_text: &str,
    ) -> SessionResult<Position> {
        let position = self.store.replace_frame_coords(name, x_text, y_text)?;
        if let Some(new_name) = optional(new_name) {
            self.store.replace_frame_name(name, new_name)?;
        }
        Ok(position)
    }

    /// Applies the edit-slot form to `slot` of `frame`.
    ///
    /// The rename runs first; the value is then written to the renamed slot.
    pub fn edit_slot(
        &mut self,
        frame: &str,
        slot: &str,
        new_name: Option<&str>,
        new_value: Option<&str>,
    ) -> SessionResult<()> {
        let mut handle = self.store.frame_mut(frame)?;
        let mut current = slot.trim().to_string();
        if let Some(new_name) = optional(new_name) {
            handle.replace_slot_name(&current, new_name)?;
            current = new_name.trim().to_string();
        }
        if let Some(new_value) = new_value {
            handle.replace_slot_value(&current, new_value)?;
        }
        Ok(())
    }

    /// Parses `;`-separated criteria and runs the search.
    pub fn search_text(&self, mode: SearchMode, text: &str) -> SessionResult<SearchOutcome> {
        let query = SearchQuery::parse(mode, text)?;
        Ok(search(&self.store, &query)?)
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> SessionResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SessionError::MissingInput(field));
    }
    Ok(value)
}

fn optional(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_coordinate(text: &str) -> SessionResult<i32> {
    Position::parse_axis(text).ok_or_else(|| SessionError::InvalidCoordinate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{EditorSession, SessionError};
    use crate::model::position::Position;
    use crate::store::error::StoreError;

    fn session() -> (tempfile::TempDir, EditorSession) {
        let dir = tempfile::tempdir().unwrap();
        let session = EditorSession::open(dir.path().join("model.fm")).unwrap();
        (dir, session)
    }

    #[test]
    fn add_frame_requires_every_field() {
        let (_dir, mut session) = session();
        let err = session.add_frame_from_input("Dog", " ", "1").unwrap_err();
        assert!(matches!(err, SessionError::MissingInput("x")));
        let err = session.add_frame_from_input("Dog", "1", "north").unwrap_err();
        assert!(matches!(err, SessionError::InvalidCoordinate(_)));
        assert!(session.store().is_empty());
    }

    #[test]
    fn rejected_rename_keeps_the_move() {
        let (_dir, mut session) = session();
        session.add_frame_from_input("Dog", "1", "2").unwrap();
        session.add_frame_from_input("Cat", "3", "4").unwrap();

        let err = session
            .edit_frame("Dog", Some("Cat"), "10", "oops")
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Store(StoreError::DuplicateFrameName(_))
        ));
        assert_eq!(session.store().position("Dog").unwrap(), Position::new(10, 2));
    }

    #[test]
    fn edit_slot_renames_then_sets_value() {
        let (_dir, mut session) = session();
        session.add_frame_from_input("Dog", "0", "0").unwrap();
        session
            .store_mut()
            .frame_mut("Dog")
            .unwrap()
            .add_literal_slot("sound", "bark")
            .unwrap();

        session
            .edit_slot("Dog", "sound", Some("voice"), Some("woof"))
            .unwrap();

        let dog = session.store().at("Dog").unwrap();
        assert!(!dog.contains("sound"));
        assert_eq!(dog.slot_value_text("voice"), Some("woof"));
    }
}
