use framenote_core::{FrameStore, Position, SlotValue, StoreError, EMPTY_SLOT_VALUE};

fn store_with(names: &[&str]) -> FrameStore {
    let mut store = FrameStore::new();
    for name in names {
        store.add_frame(*name, Position::default()).unwrap();
    }
    store
}

fn slot_names(store: &FrameStore, frame: &str) -> Vec<String> {
    store
        .at(frame)
        .unwrap()
        .slots()
        .map(|slot| slot.name().to_string())
        .collect()
}

#[test]
fn literal_slots_normalize_their_text() {
    let mut store = store_with(&["Dog"]);
    let mut dog = store.frame_mut("Dog").unwrap();
    dog.add_literal_slot("sound", "").unwrap();
    dog.add_literal_slot("bio", "loyal\nand\r\nloud").unwrap();

    let dog = store.at("Dog").unwrap();
    assert_eq!(dog.slot_value_text("sound"), Some(EMPTY_SLOT_VALUE));
    assert_eq!(dog.slot_value_text("bio"), Some("loyal and loud"));
}

#[test]
fn slot_names_cannot_repeat_or_echo_the_owner() {
    let mut store = store_with(&["Dog"]);
    let mut dog = store.frame_mut("Dog").unwrap();
    dog.add_literal_slot("sound", "bark").unwrap();

    assert_eq!(
        dog.add_literal_slot("sound", "woof").unwrap_err(),
        StoreError::DuplicateSlotName {
            frame: "Dog".to_string(),
            slot: "sound".to_string(),
        }
    );
    assert_eq!(
        dog.add_literal_slot("Dog", "me").unwrap_err(),
        StoreError::SelfReferentialName("Dog".to_string())
    );
    assert!(matches!(
        dog.add_literal_slot(" ", "x").unwrap_err(),
        StoreError::InvalidName(_)
    ));
    assert_eq!(dog.view().len(), 1);
}

#[test]
fn reference_slots_follow_targets() {
    let mut store = store_with(&["Dog", "Mammal"]);
    let mammal = store.frame_id("Mammal").unwrap();
    let mut dog = store.frame_mut("Dog").unwrap();

    dog.add_reference_slot("Mammal").unwrap();
    assert_eq!(
        dog.add_reference_slot("Mammal").unwrap_err(),
        StoreError::DuplicateSlotName {
            frame: "Dog".to_string(),
            slot: "Mammal".to_string(),
        }
    );
    assert_eq!(
        dog.add_reference_slot("Dog").unwrap_err(),
        StoreError::SelfReferentialName("Dog".to_string())
    );
    assert_eq!(
        dog.add_reference_slot("Cat").unwrap_err(),
        StoreError::FrameNotFound("Cat".to_string())
    );

    let view = store.at("Dog").unwrap();
    let slot = view.slot("Mammal").unwrap();
    assert!(slot.is_reference());
    assert_eq!(slot.value(), &SlotValue::Reference(mammal));
    assert_eq!(slot.value_text(), "Mammal");
}

#[test]
fn literal_named_like_a_linked_frame_is_a_duplicate() {
    let mut store = store_with(&["Dog", "Mammal"]);
    let mut dog = store.frame_mut("Dog").unwrap();
    dog.add_reference_slot("Mammal").unwrap();

    assert!(matches!(
        dog.add_literal_slot("Mammal", "x").unwrap_err(),
        StoreError::DuplicateSlotName { .. }
    ));
}

#[test]
fn rename_slot_keeps_value_and_order() {
    let mut store = store_with(&["Dog"]);
    let mut dog = store.frame_mut("Dog").unwrap();
    dog.add_literal_slot("a", "1").unwrap();
    dog.add_literal_slot("b", "2").unwrap();
    dog.add_literal_slot("c", "3").unwrap();

    dog.replace_slot_name("b", "beta").unwrap();

    assert_eq!(slot_names(&store, "Dog"), vec!["a", "beta", "c"]);
    assert_eq!(store.at("Dog").unwrap().slot_value_text("beta"), Some("2"));
}

#[test]
fn rename_slot_guards() {
    let mut store = store_with(&["Dog", "Mammal", "Cat"]);
    let mut dog = store.frame_mut("Dog").unwrap();
    dog.add_literal_slot("sound", "bark").unwrap();
    dog.add_literal_slot("size", "big").unwrap();
    dog.add_reference_slot("Mammal").unwrap();

    assert_eq!(
        dog.replace_slot_name("Mammal", "kind").unwrap_err(),
        StoreError::SlotIsReference {
            frame: "Dog".to_string(),
            slot: "Mammal".to_string(),
        }
    );
    assert_eq!(
        dog.replace_slot_name("sound", "Cat").unwrap_err(),
        StoreError::SlotNameShadowsFrame("Cat".to_string())
    );
    assert_eq!(
        dog.replace_slot_name("sound", "Dog").unwrap_err(),
        StoreError::SelfReferentialName("Dog".to_string())
    );
    assert!(matches!(
        dog.replace_slot_name("sound", "size").unwrap_err(),
        StoreError::DuplicateSlotName { .. }
    ));
    assert!(matches!(
        dog.replace_slot_name("tail", "tails").unwrap_err(),
        StoreError::SlotNotFound { .. }
    ));
    assert_eq!(slot_names(&store, "Dog"), vec!["sound", "size", "Mammal"]);
}

#[test]
fn replace_slot_value_applies_to_literals_only() {
    let mut store = store_with(&["Dog", "Mammal"]);
    let mut dog = store.frame_mut("Dog").unwrap();
    dog.add_literal_slot("sound", "bark").unwrap();
    dog.add_reference_slot("Mammal").unwrap();

    dog.replace_slot_value("sound", "").unwrap();
    assert!(matches!(
        dog.replace_slot_value("Mammal", "x").unwrap_err(),
        StoreError::SlotIsReference { .. }
    ));

    let dog = store.at("Dog").unwrap();
    assert_eq!(dog.slot_value_text("sound"), Some(EMPTY_SLOT_VALUE));
    assert_eq!(dog.slot_value_text("Mammal"), Some("Mammal"));
}

#[test]
fn erase_slot_removes_either_kind() {
    let mut store = store_with(&["Dog", "Mammal"]);
    let mut dog = store.frame_mut("Dog").unwrap();
    dog.add_literal_slot("sound", "bark").unwrap();
    dog.add_reference_slot("Mammal").unwrap();

    dog.erase_slot("Mammal").unwrap();
    dog.erase_slot("sound").unwrap();
    assert!(matches!(
        dog.erase_slot("sound").unwrap_err(),
        StoreError::SlotNotFound { .. }
    ));

    assert!(store.at("Dog").unwrap().is_empty());
    assert!(store.contains("Mammal"));
}
