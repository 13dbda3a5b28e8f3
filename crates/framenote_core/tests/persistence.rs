use framenote_core::{
    load_file_into, load_from_file, load_into, save, save_to_file, CodecError, FrameStore,
    LoadSummary, Position, StoreError,
};
use std::fs;

fn sample_store() -> FrameStore {
    let mut store = FrameStore::new();
    store.add_frame("Big Dog", Position::new(1125, 150)).unwrap();
    store.add_frame("Mammal", Position::new(-10, 20)).unwrap();
    store.add_frame("Stone", Position::new(0, 0)).unwrap();
    {
        let mut dog = store.frame_mut("Big Dog").unwrap();
        dog.add_literal_slot("sound", "loud bark").unwrap();
        dog.add_literal_slot("fur", "").unwrap();
        dog.add_reference_slot("Mammal").unwrap();
    }
    store
        .frame_mut("Mammal")
        .unwrap()
        .add_literal_slot("blood", "warm")
        .unwrap();
    store
}

#[test]
fn save_then_load_reproduces_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("model.fm");
    let store = sample_store();

    save_to_file(&store, &path).unwrap();
    let loaded = load_from_file(&path).unwrap();

    assert_eq!(loaded.snapshot(), store.snapshot());
    assert!(loaded.is_consistent());
}

#[test]
fn saved_text_encodes_spaces_and_links() {
    let mut out = Vec::new();
    save(&sample_store(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Frame Big_Dog 1125 150\n"));
    assert!(text.contains("Frame Mammal -10 20\n"));
    assert!(text.contains("Slot sound Value loud_bark OwnerFrame Big_Dog\n"));
    assert!(text.contains("Slot Mammal Value Frame-slot OwnerFrame Big_Dog\n"));

    let kinds = text
        .lines()
        .map(|line| line.split(' ').next().unwrap())
        .collect::<Vec<_>>();
    let first_slot = kinds.iter().position(|kind| *kind == "Slot").unwrap();
    assert!(kinds[..first_slot].iter().all(|kind| *kind == "Frame"));
    assert!(kinds[first_slot..].iter().all(|kind| *kind == "Slot"));
    assert_eq!(kinds.len(), 7);
}

#[test]
fn missing_file_loads_empty_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.fm");

    let store = load_from_file(&path).unwrap();
    assert!(store.is_empty());

    let mut store = sample_store();
    let summary = load_file_into(&mut store, &path).unwrap();
    assert_eq!(summary, LoadSummary::default());
    assert_eq!(store.len(), 3);
}

#[test]
fn load_skips_blank_lines_and_carriage_returns() {
    let text = "Frame Dog 1 2\r\n\r\nFrame Mammal 3 4\r\nSlot Mammal Value Frame-slot OwnerFrame Dog\r\n";
    let mut store = FrameStore::new();

    let summary = load_into(&mut store, text.as_bytes()).unwrap();
    assert_eq!(summary, LoadSummary { frames: 2, slots: 1 });
    assert_eq!(store.position("Mammal").unwrap(), Position::new(3, 4));
    assert!(store.at("Dog").unwrap().slot("Mammal").unwrap().is_reference());
}

#[test]
fn slot_before_owner_is_rejected_and_earlier_lines_stay() {
    let text = "Frame A 0 0\nSlot B Value Frame-slot OwnerFrame A\nFrame B 5 5\n";
    let mut store = FrameStore::new();

    let err = load_into(&mut store, text.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        CodecError::UnknownFrameReference { line: 2, ref name } if name == "B"
    ));
    assert!(store.contains("A"));
    assert!(!store.contains("B"));

    let err = load_into(&mut FrameStore::new(), "Slot x Value 1 OwnerFrame Z\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, CodecError::UnknownFrameReference { line: 1, .. }));
}

#[test]
fn bad_records_report_their_line() {
    let err = load_into(&mut FrameStore::new(), "Frame A x 1\n".as_bytes()).unwrap_err();
    assert!(matches!(err, CodecError::MalformedRecord { line: 1, .. }));

    let err = load_into(
        &mut FrameStore::new(),
        "Frame A 0 0\nFrame A 1 1\n".as_bytes(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CodecError::Store {
            line: 2,
            source: StoreError::DuplicateFrameName(_)
        }
    ));

    let err = load_into(
        &mut FrameStore::new(),
        "Frame A 0 0\nSlot A Value 1 OwnerFrame A\n".as_bytes(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CodecError::Store {
            line: 2,
            source: StoreError::SelfReferentialName(_)
        }
    ));
}

#[test]
fn save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.fm");
    fs::write(&path, "stale content that is not a record\n").unwrap();

    let mut store = FrameStore::new();
    store.add_frame("Only", Position::new(1, 1)).unwrap();
    save_to_file(&store, &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Frame Only 1 1\n");
}
