use multimap_r_drive::MultimapStore;
use tempfile::{TempDir, tempdir};

fn create_temp_store() -> (TempDir, MultimapStore) {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("store.bin");
    let store = MultimapStore::open_at(&path).expect("failed to open store");
    (dir, store)
}

#[test]
fn update_replaces_all_live_values() {
    let (_dir, store) = create_temp_store();
    store.add(b"u", &[b"a", b"b", b"c"]).unwrap();

    store.update(b"u", &[b"x", b"y"]).unwrap();

    assert_eq!(store.get(b"u"), vec![b"x".to_vec(), b"y".to_vec()]);
}

#[test]
fn update_on_unknown_key_behaves_like_add() {
    let (_dir, store) = create_temp_store();
    store.update(b"ghost", &[b"a"]).unwrap();
    assert_eq!(store.get(b"ghost"), vec![b"a".to_vec()]);
}

#[test]
fn update_with_oversized_value_leaves_chain_tombstoned_empty() {
    let (_dir, store) = create_temp_store();
    store.add(b"u", &[b"a", b"b"]).unwrap();

    let too_big = vec![0u8; 256];
    let err = store.update(b"u", &[&too_big]).unwrap_err();
    assert!(matches!(err, multimap_r_drive::Error::ValueTooLarge(256)));

    // Tombstoning happens unconditionally before the new values are
    // validated, so the old values do not survive a failed Add phase.
    assert_eq!(store.get(b"u"), Vec::<Vec<u8>>::new());
}

#[test]
fn exist_is_true_for_a_live_key() {
    let (_dir, store) = create_temp_store();
    store.add(b"u", &[b"a"]).unwrap();
    assert!(store.exist(b"u"));
}

#[test]
fn exist_is_false_and_then_stays_false_for_an_unknown_key() {
    let (_dir, store) = create_temp_store();
    assert!(!store.exist(b"ghost"));
    // Second call hits the negative-cache sentinel installed by the first.
    assert!(!store.exist(b"ghost"));
}

#[test]
fn exist_stays_true_after_all_values_deleted() {
    let (_dir, store) = create_temp_store();
    store.add(b"u", &[b"a"]).unwrap();
    store.del(b"u", &[b"a"]);

    // The chain still exists in the index (it has an offset), but has no
    // live values; Exist only checks whether the index holds a real offset.
    assert!(store.exist(b"u"));
    assert_eq!(store.get(b"u"), Vec::<Vec<u8>>::new());
}
