//! # Multimap R Drive
//!
//! An embedded, single-process key → multi-value store backed by a
//! memory-mapped append-only file. A key maps to an ordered multiset of
//! short (1..=255 byte) string values; callers add, delete, and list values
//! per key, and can delete values by prefix. The design goal is very high
//! read throughput on corpora too large to fit comfortably in RAM, while
//! keeping the authoritative state on disk — for example, incrementally
//! searching a user's followers by nickname, where each principal owns
//! anywhere from a handful to millions of short values.
//!
//! ## Example
//! ```rust
//! use multimap_r_drive::MultimapStore;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().expect("failed to create temp dir");
//! let store = MultimapStore::open_at(dir.path().join("followers.bin")).unwrap();
//!
//! store.add(b"alice", &[b"bob", b"carol"]).unwrap();
//! assert_eq!(store.get(b"alice"), vec![b"bob".to_vec(), b"carol".to_vec()]);
//!
//! store.del(b"alice", &[b"bob"]);
//! assert_eq!(store.get(b"alice"), vec![b"carol".to_vec()]);
//!
//! store.update(b"alice", &[b"dan"]).unwrap();
//! assert_eq!(store.get(b"alice"), vec![b"dan".to_vec()]);
//!
//! assert!(store.exist(b"alice"));
//! assert!(!store.exist(b"nobody"));
//! ```
//!
//! ## Concurrency
//! A single reader/writer lock guards all engine state — the index, the
//! append position, and the contents of the mapped region. `get` takes the
//! lock in shared mode; every other operation takes it exclusive.
//!
//! ## Non-goals
//! Crash-consistent durability (no journaling or fsync protocol), compaction
//! of deleted record space, values or keys over 255 bytes, ordered key
//! range scans, iteration over all keys, multi-process access, and anything
//! beyond exact-match/prefix matching.
//!
//! ## License
//! This project is licensed under the Apache-2.0 License.

mod append_log;
mod config;
mod digest;
mod error;
mod mapped_region;
mod simd_copy;
mod store;

pub use config::{DEFAULT_MAPPING_LENGTH, StoreConfig};
pub use error::Error;
pub use store::{MAX_KEY_LEN, MAX_VALUE_LEN, MIN_KEY_LEN, MIN_VALUE_LEN, MultimapStore};
