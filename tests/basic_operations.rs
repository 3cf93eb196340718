use multimap_r_drive::MultimapStore;
use tempfile::{TempDir, tempdir};

fn create_temp_store() -> (TempDir, MultimapStore) {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("store.bin");
    let store = MultimapStore::open_at(&path).expect("failed to open store");
    (dir, store)
}

#[test]
fn unknown_key_returns_empty() {
    let (_dir, store) = create_temp_store();
    assert_eq!(store.get(b"nope"), Vec::<Vec<u8>>::new());
}

#[test]
fn create_and_read() {
    let (_dir, store) = create_temp_store();
    store.add(b"u", &[b"a", b"b", b"c"]).unwrap();

    assert_eq!(
        store.get(b"u"),
        vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]
    );
}

#[test]
fn simple_delete() {
    let (_dir, store) = create_temp_store();
    store.add(b"u", &[b"a", b"b", b"c"]).unwrap();
    store.del(b"u", &[b"b"]);

    assert_eq!(store.get(b"u"), vec![b"a".to_vec(), b"c".to_vec()]);
}

#[test]
fn prefix_delete() {
    let (_dir, store) = create_temp_store();
    store
        .add(b"u", &[b"alice", b"alan", b"bob"])
        .unwrap();
    store.del_by_prefix(b"u", &[b"al"]);

    assert_eq!(store.get(b"u"), vec![b"bob".to_vec()]);
}

#[test]
fn multiple_keys_are_independent() {
    let (_dir, store) = create_temp_store();
    store.add(b"u1", &[b"a"]).unwrap();
    store.add(b"u2", &[b"x", b"y"]).unwrap();

    assert_eq!(store.get(b"u1"), vec![b"a".to_vec()]);
    assert_eq!(store.get(b"u2"), vec![b"x".to_vec(), b"y".to_vec()]);
}

#[test]
fn delete_is_idempotent() {
    let (_dir, store) = create_temp_store();
    store.add(b"u", &[b"a", b"b"]).unwrap();

    store.del(b"u", &[b"a"]);
    let once = store.get(b"u");

    store.del(b"u", &[b"a"]);
    let twice = store.get(b"u");

    assert_eq!(once, twice);
    assert_eq!(once, vec![b"b".to_vec()]);
}

#[test]
fn deleting_from_unknown_key_is_a_no_op() {
    let (_dir, store) = create_temp_store();
    store.del(b"ghost", &[b"a"]);
    assert_eq!(store.get(b"ghost"), Vec::<Vec<u8>>::new());
}

#[test]
fn add_with_empty_values_is_a_no_op() {
    let (_dir, store) = create_temp_store();
    let empty: &[&[u8]] = &[];
    store.add(b"u", empty).unwrap();
    assert_eq!(store.get(b"u"), Vec::<Vec<u8>>::new());
    assert!(!store.exist(b"u"));
}

#[test]
fn reopening_a_populated_file_is_refused() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("store.bin");

    {
        let store = MultimapStore::open_at(&path).unwrap();
        store.add(b"u", &[b"a"]).unwrap();
    }

    assert!(MultimapStore::open_at(&path).is_err());
}
