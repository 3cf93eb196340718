use std::collections::HashMap;

use crate::digest::Xxh3BuildHasher;

/// What the index knows about a key: either the head offset of its chain, or
/// a negative-cache hint installed by a prior `Exist` that found nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndexSlot {
    Offset(u64),
    NotPresent,
}

/// In-memory key → [`IndexSlot`] map. Keyed by owned key bytes rather than a
/// hash, so a hash collision in the bucket function can never make a lookup
/// resolve to the wrong chain; the xxh3-backed `BuildHasher` is chosen purely
/// to speed up bucket dispatch, the same family the teacher's own indexes use.
pub(crate) type KeyIndex = HashMap<Box<[u8]>, IndexSlot, Xxh3BuildHasher>;

pub(crate) fn new_index() -> KeyIndex {
    HashMap::with_hasher(Xxh3BuildHasher)
}
