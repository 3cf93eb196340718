use multimap_r_drive::MultimapStore;
use tempfile::{TempDir, tempdir};

fn create_temp_store() -> (TempDir, MultimapStore) {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("store.bin");
    let store = MultimapStore::open_at(&path).expect("failed to open store");
    (dir, store)
}

#[test]
fn value_of_length_one_is_accepted() {
    let (_dir, store) = create_temp_store();
    store.add(b"u", &[b"a"]).unwrap();
    assert_eq!(store.get(b"u"), vec![b"a".to_vec()]);
}

#[test]
fn value_of_length_255_is_accepted() {
    let (_dir, store) = create_temp_store();
    let value = vec![b'x'; 255];
    store.add(b"u", &[&value]).unwrap();
    assert_eq!(store.get(b"u"), vec![value]);
}

#[test]
fn value_of_length_zero_is_rejected() {
    let (_dir, store) = create_temp_store();
    let err = store.add(b"u", &[b""]).unwrap_err();
    assert!(matches!(err, multimap_r_drive::Error::ValueTooLarge(0)));
}

#[test]
fn value_of_length_256_is_rejected() {
    let (_dir, store) = create_temp_store();
    let value = vec![b'x'; 256];
    let err = store.add(b"u", &[&value]).unwrap_err();
    assert!(matches!(err, multimap_r_drive::Error::ValueTooLarge(256)));
}

#[test]
fn multi_value_add_validates_every_value_before_writing_any() {
    let (_dir, store) = create_temp_store();
    let too_big = vec![0u8; 300];

    let err = store.add(b"u", &[b"fine", &too_big]).unwrap_err();
    assert!(matches!(err, multimap_r_drive::Error::ValueTooLarge(300)));

    // Nothing was written, not even the value that came before the
    // oversized one.
    assert_eq!(store.get(b"u"), Vec::<Vec<u8>>::new());
    assert!(!store.exist(b"u"));
}

#[test]
fn key_of_length_255_round_trips() {
    let (_dir, store) = create_temp_store();
    let key = vec![b'k'; 255];
    store.add(&key, &[b"v"]).unwrap();
    assert_eq!(store.get(&key), vec![b"v".to_vec()]);
}
