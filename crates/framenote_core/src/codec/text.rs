//! Line-oriented text codec for the frame model file.
//!
//! One record per line, fields separated by single spaces:
//!
//! ```text
//! Frame <name> <x> <y>
//! Slot <slotName> Value <value|Frame-slot> OwnerFrame <ownerName>
//! ```
//!
//! Spaces inside names and values are written as `_`. A link slot stores the
//! marker `Frame-slot` as its value; its slot name is the target frame name.
//!
//! # Invariants
//! - Writes emit every `Frame` record before any `Slot` record.
//! - Reads abort on the first bad line; lines before it stay applied.
//! - A missing file loads as an empty store.

use crate::model::position::Position;
use crate::model::slot::SlotValue;
use crate::store::error::StoreError;
use crate::store::frame_store::FrameStore;
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use std::time::Instant;

/// Stands in for a space inside a name or value.
pub const FILLER_CHAR: char = '_';
/// Value token marking a link slot.
pub const LINK_MARKER: &str = "Frame-slot";

const FRAME_KEYWORD: &str = "Frame";
const SLOT_KEYWORD: &str = "Slot";

static FRAME_RECORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Frame ([^ ]+) (-?\d+) (-?\d+)$").expect("valid frame record regex")
});
static SLOT_RECORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Slot ([^ ]+) Value ([^ ]+) OwnerFrame ([^ ]+)$")
        .expect("valid slot record regex")
});

/// Result type for codec APIs.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors from reading or writing the model file.
#[derive(Debug)]
pub enum CodecError {
    Io(std::io::Error),
    /// Line does not match any record shape.
    MalformedRecord { line: usize, reason: String },
    /// Slot record names a frame not declared by an earlier line.
    UnknownFrameReference { line: usize, name: String },
    /// Record is well-formed but the store rejected it.
    Store { line: usize, source: StoreError },
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::MalformedRecord { line, reason } => {
                write!(f, "malformed record at line {line}: {reason}")
            }
            Self::UnknownFrameReference { line, name } => {
                write!(f, "line {line} references undeclared frame `{name}`")
            }
            Self::Store { line, source } => write!(f, "line {line}: {source}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Store { source, .. } => Some(source),
            Self::MalformedRecord { .. } => None,
            Self::UnknownFrameReference { .. } => None,
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Counts of records applied by one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub frames: usize,
    pub slots: usize,
}

/// Reads records from `reader` into `store`.
///
/// Blank lines are skipped. On error, records read before the failing line
/// remain in `store`.
///
/// # Errors
/// - `MalformedRecord` for unknown record kinds or bad fields.
/// - `UnknownFrameReference` when a slot's owner or link target is undeclared.
/// - `Store` when the store rejects a record (duplicate names and similar).
/// - `Io` for read failures.
pub fn load_into<R: BufRead>(store: &mut FrameStore, reader: R) -> CodecResult<LoadSummary> {
    let mut summary = LoadSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let record = line.trim_end_matches('\r');
        if record.trim().is_empty() {
            continue;
        }

        match record.split(' ').next() {
            Some(FRAME_KEYWORD) => {
                read_frame_record(store, record, line_no)?;
                summary.frames += 1;
            }
            Some(SLOT_KEYWORD) => {
                read_slot_record(store, record, line_no)?;
                summary.slots += 1;
            }
            _ => {
                return Err(CodecError::MalformedRecord {
                    line: line_no,
                    reason: "unknown record kind".to_string(),
                });
            }
        }
    }

    Ok(summary)
}

/// Loads `path` into `store`; a missing file leaves the store unchanged.
pub fn load_file_into(
    store: &mut FrameStore,
    path: impl AsRef<Path>,
) -> CodecResult<LoadSummary> {
    let started_at = Instant::now();
    info!("event=model_load module=codec status=start");

    let file = match File::open(path.as_ref()) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                "event=model_load module=codec status=ok missing_file=true duration_ms={}",
                started_at.elapsed().as_millis()
            );
            return Ok(LoadSummary::default());
        }
        Err(err) => {
            error!(
                "event=model_load module=codec status=error error_code=open_failed error={}",
                err
            );
            return Err(err.into());
        }
    };

    match load_into(store, BufReader::new(file)) {
        Ok(summary) => {
            info!(
                "event=model_load module=codec status=ok frames={} slots={} duration_ms={}",
                summary.frames,
                summary.slots,
                started_at.elapsed().as_millis()
            );
            Ok(summary)
        }
        Err(err) => {
            error!(
                "event=model_load module=codec status=error error_code=bad_record duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Loads a fresh store from `path`; a missing file yields an empty store.
///
/// On error the partially read store is dropped. Use [`load_file_into`] to
/// keep the records read before the failing line.
pub fn load_from_file(path: impl AsRef<Path>) -> CodecResult<FrameStore> {
    let mut store = FrameStore::new();
    load_file_into(&mut store, path)?;
    Ok(store)
}

/// Writes every frame record, then every slot record grouped by owner.
pub fn save<W: Write>(store: &FrameStore, mut writer: W) -> CodecResult<()> {
    for frame in store.frames() {
        let position = frame.position();
        writeln!(
            writer,
            "{FRAME_KEYWORD} {} {} {}",
            encode_field(frame.name()),
            position.x,
            position.y
        )?;
    }

    for frame in store.frames() {
        let owner = encode_field(frame.name());
        for slot in frame.slots() {
            let value = match slot.value() {
                SlotValue::Literal(text) => encode_field(text),
                SlotValue::Reference(_) => LINK_MARKER.to_string(),
            };
            writeln!(
                writer,
                "{SLOT_KEYWORD} {} Value {} OwnerFrame {}",
                encode_field(slot.name()),
                value,
                owner
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Saves `store` to `path`, creating the file and missing parent folders.
pub fn save_to_file(store: &FrameStore, path: impl AsRef<Path>) -> CodecResult<()> {
    let started_at = Instant::now();
    let path = path.as_ref();

    let result = write_file(store, path);

    match &result {
        Ok(()) => info!(
            "event=model_save module=codec status=ok frames={} duration_ms={}",
            store.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=model_save module=codec status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn write_file(store: &FrameStore, path: &Path) -> CodecResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    save(store, BufWriter::new(File::create(path)?))
}

fn read_frame_record(store: &mut FrameStore, record: &str, line: usize) -> CodecResult<()> {
    let captures = FRAME_RECORD_RE
        .captures(record)
        .ok_or_else(|| malformed(line, "expected `Frame <name> <x> <y>`"))?;
    let x = parse_coordinate(&captures[2], line)?;
    let y = parse_coordinate(&captures[3], line)?;

    store
        .add_frame(decode_field(&captures[1]), Position::new(x, y))
        .map_err(|source| CodecError::Store { line, source })?;
    Ok(())
}

fn read_slot_record(store: &mut FrameStore, record: &str, line: usize) -> CodecResult<()> {
    let captures = SLOT_RECORD_RE.captures(record).ok_or_else(|| {
        malformed(
            line,
            "expected `Slot <name> Value <value> OwnerFrame <owner>`",
        )
    })?;
    let slot_name = decode_field(&captures[1]);
    let owner = decode_field(&captures[3]);

    let mut frame = store
        .frame_mut(&owner)
        .map_err(|_| CodecError::UnknownFrameReference {
            line,
            name: owner.clone(),
        })?;

    let result = if &captures[2] == LINK_MARKER {
        match frame.add_reference_slot(&slot_name) {
            Err(StoreError::FrameNotFound(name)) => {
                return Err(CodecError::UnknownFrameReference { line, name });
            }
            other => other,
        }
    } else {
        frame.add_literal_slot(slot_name, decode_field(&captures[2]))
    };
    result.map_err(|source| CodecError::Store { line, source })
}

fn parse_coordinate(text: &str, line: usize) -> CodecResult<i32> {
    text.parse::<i32>()
        .map_err(|err| malformed(line, &format!("invalid coordinate `{text}`: {err}")))
}

fn malformed(line: usize, reason: &str) -> CodecError {
    CodecError::MalformedRecord {
        line,
        reason: reason.to_string(),
    }
}

fn encode_field(value: &str) -> String {
    value.replace(' ', &FILLER_CHAR.to_string())
}

fn decode_field(value: &str) -> String {
    value.replace(FILLER_CHAR, " ")
}

#[cfg(test)]
mod tests {
    use super::{decode_field, encode_field, load_into, save, CodecError};
    use crate::model::position::Position;
    use crate::store::frame_store::FrameStore;

    #[test]
    fn fields_swap_spaces_and_filler() {
        assert_eq!(encode_field("warm blooded"), "warm_blooded");
        assert_eq!(decode_field("warm_blooded"), "warm blooded");
    }

    #[test]
    fn save_writes_frames_before_slots() {
        let mut store = FrameStore::new();
        store.add_frame("Dog", Position::new(1125, 150)).unwrap();
        store.add_frame("Mammal", Position::new(10, 20)).unwrap();
        {
            let mut dog = store.frame_mut("Dog").unwrap();
            dog.add_literal_slot("sound", "loud bark").unwrap();
            dog.add_reference_slot("Mammal").unwrap();
        }

        let mut out = Vec::new();
        save(&store, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Frame Dog 1125 150\n\
             Frame Mammal 10 20\n\
             Slot sound Value loud_bark OwnerFrame Dog\n\
             Slot Mammal Value Frame-slot OwnerFrame Dog\n"
        );
    }

    #[test]
    fn unknown_record_kind_is_malformed() {
        let mut store = FrameStore::new();
        let err = load_into(&mut store, "Frame A 1 2\nEdge A B\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CodecError::MalformedRecord { line: 2, .. }));
        assert!(store.contains("A"));
    }
}
