mod index;
mod record;

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use memmap2::MmapOptions;
use tracing::{debug, info};

use crate::append_log::AppendLog;
use crate::config::StoreConfig;
use crate::error::Error;
use crate::mapped_region::MappedRegion;

use index::{IndexSlot, KeyIndex, new_index};

pub use record::{MAX_KEY_LEN, MAX_VALUE_LEN, MIN_KEY_LEN, MIN_VALUE_LEN};

struct EngineState {
    file: BufWriter<File>,
    mapped: MappedRegion,
    index: KeyIndex,
    end_offset: u64,
}

/// An embedded, single-process key to multi-value store backed by a
/// memory-mapped append-only file.
///
/// A key maps to an ordered multiset of short (1..=255 byte) values. Values
/// are appended, deleted (individually or by prefix), listed, and
/// atomically replaced; see [`Self::add`], [`Self::del`],
/// [`Self::del_by_prefix`], [`Self::get`], [`Self::update`], [`Self::exist`].
///
/// A single reader/writer lock guards all mutable state — the index, the
/// append position, and the mapped region's contents. `get` holds it
/// shared; every mutating call holds it exclusive.
pub struct MultimapStore {
    state: RwLock<EngineState>,
    path: PathBuf,
}

impl MultimapStore {
    /// Opens (creating if absent) the backing file named by `config.file`
    /// and maps `config.length` (or the 64 GiB default) bytes of it.
    ///
    /// Refuses to open a non-empty backing file: the index is never
    /// persisted, so reopening a populated file would silently start with an
    /// empty index while `end_offset` still needs rebuilding from the file's
    /// contents — a recovery scan this engine does not implement. Start
    /// every store from an empty (or brand new) file.
    pub fn open(config: StoreConfig) -> Result<Self, Error> {
        let path = config.file.clone();
        let mapping_length = config.resolved_length();

        let mut open_options = OpenOptions::new();
        open_options.read(true).write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            open_options.mode(0o644);
        }

        let mut file = open_options.open(&path).map_err(Error::Open)?;

        let file_len = file.metadata().map_err(Error::Open)?.len();
        if file_len != 0 {
            return Err(Error::Open(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "refusing to open non-empty backing file {}: cold-start index recovery is not implemented",
                    path.display()
                ),
            )));
        }

        file.seek(SeekFrom::End(0)).map_err(Error::Open)?;

        let mmap = unsafe {
            MmapOptions::new()
                .len(mapping_length as usize)
                .map_mut(&file)
        }
        .map_err(Error::Mapping)?;

        info!(
            path = %path.display(),
            mapping_length,
            "opened multimap store"
        );

        Ok(Self {
            state: RwLock::new(EngineState {
                file: BufWriter::new(file),
                mapped: MappedRegion::new(mmap),
                index: new_index(),
                end_offset: 0,
            }),
            path,
        })
    }

    /// Convenience constructor for the common case: default mapping length
    /// at `path`.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::open(StoreConfig::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `values` to `key`'s chain. Empty `values` is a no-op. Fails
    /// without writing anything if any value's length is 0 or exceeds 255
    /// bytes.
    ///
    /// When exactly one value is given, the engine first looks for a gap
    /// freed by an earlier delete; otherwise (and whenever more than one
    /// value is given) a new record is appended and linked onto the chain.
    pub fn add(&self, key: &[u8], values: &[&[u8]]) -> Result<(), Error> {
        if values.is_empty() {
            return Ok(());
        }
        record::validate_values(values)?;

        let mut state = self.state.write().expect("engine lock poisoned");
        Self::add_locked(&mut state, key, values)
    }

    fn add_locked(state: &mut EngineState, key: &[u8], values: &[&[u8]]) -> Result<(), Error> {
        if values.is_empty() {
            return Ok(());
        }
        record::validate_values(values)?;

        let existing_head = match state.index.get(key) {
            Some(IndexSlot::Offset(offset)) => Some(*offset),
            _ => None,
        };

        if let Some(head) = existing_head {
            if values.len() == 1 {
                if let Some((gap_start, _gap_end)) =
                    record::find_usable_gap(&state.mapped, head, values[0].len())
                {
                    record::write_slot(&mut state.mapped, gap_start, values[0]);
                    debug!(key_len = key.len(), head, gap_start, "reused gap for add");
                    return Ok(());
                }
            }

            let tail = record::find_tail(&state.mapped, head);
            let new_head = Self::append_record(state, key, values)?;
            record::set_next(&mut state.mapped, tail, new_head);
            debug!(key_len = key.len(), head, tail, new_head, "extended chain");
        } else {
            let new_head = Self::append_record(state, key, values)?;
            state
                .index
                .insert(key.to_vec().into_boxed_slice(), IndexSlot::Offset(new_head));
            debug!(key_len = key.len(), new_head, "started chain");
        }

        Ok(())
    }

    /// Builds a new record for `key`/`values` and appends it, returning the
    /// offset the engine should publish (either as the index's head offset
    /// or as the previous tail's `next`).
    fn append_record(state: &mut EngineState, key: &[u8], values: &[&[u8]]) -> Result<u64, Error> {
        let mut builder = record::RecordBuilder::new(key);
        for value in values {
            builder.push_value(value)?;
        }

        let offset_before = state.end_offset;
        let bytes = builder.finish(offset_before);

        if offset_before + bytes.len() as u64 > state.mapped.len() {
            panic!(
                "mapped region exhausted: offset {} + record {} exceeds mapping length {}",
                offset_before,
                bytes.len(),
                state.mapped.len()
            );
        }

        let mut log = AppendLog::new(&mut state.file, &mut state.end_offset);
        log.append(&bytes)?;

        Ok(offset_before)
    }

    /// Returns all live values for `key` in chain order, or an empty vector
    /// if the key is unknown. Never fails.
    pub fn get(&self, key: &[u8]) -> Vec<Vec<u8>> {
        let state = self.state.read().expect("engine lock poisoned");
        match state.index.get(key) {
            Some(IndexSlot::Offset(head)) => record::collect_values(&state.mapped, *head),
            _ => Vec::new(),
        }
    }

    /// Tombstones every live slot under `key` whose value byte-equals one of
    /// `values`. Unknown key and empty `values` are no-ops. Never fails.
    pub fn del(&self, key: &[u8], values: &[&[u8]]) {
        if values.is_empty() {
            return;
        }
        let mut state = self.state.write().expect("engine lock poisoned");
        if let Some(IndexSlot::Offset(head)) = state.index.get(key).copied() {
            record::tombstone_matching(&mut state.mapped, head, |v| {
                values.iter().any(|x| *x == v)
            });
            debug!(key_len = key.len(), head, "deleted values");
        }
    }

    /// Tombstones every live slot under `key` whose value starts with one of
    /// `prefixes` (byte-prefix, not code-point). Unknown key and empty
    /// `prefixes` are no-ops. Never fails.
    pub fn del_by_prefix(&self, key: &[u8], prefixes: &[&[u8]]) {
        if prefixes.is_empty() {
            return;
        }
        let mut state = self.state.write().expect("engine lock poisoned");
        if let Some(IndexSlot::Offset(head)) = state.index.get(key).copied() {
            record::tombstone_matching(&mut state.mapped, head, |v| {
                prefixes.iter().any(|p| v.starts_with(p))
            });
            debug!(key_len = key.len(), head, "deleted by prefix");
        }
    }

    /// Atomically (under the exclusive lock) replaces `key`'s values: every
    /// currently-live value is tombstoned unconditionally, then `values` is
    /// added as if by `add`. Tombstoning happens before `values` is
    /// validated, so a `ValueTooLarge` error from the Add phase still leaves
    /// the chain tombstoned-empty rather than restoring the old values.
    pub fn update(&self, key: &[u8], values: &[&[u8]]) -> Result<(), Error> {
        let mut state = self.state.write().expect("engine lock poisoned");
        if let Some(IndexSlot::Offset(head)) = state.index.get(key).copied() {
            record::tombstone_matching(&mut state.mapped, head, |_| true);
        }

        Self::add_locked(&mut state, key, values)?;
        debug!(key_len = key.len(), "updated values");
        Ok(())
    }

    /// True if `key` has a real offset in the index. A `false` result
    /// installs the `NOT_PRESENT` negative-cache sentinel, so this call
    /// always takes the exclusive lock even though it never changes the
    /// chain itself.
    pub fn exist(&self, key: &[u8]) -> bool {
        let mut state = self.state.write().expect("engine lock poisoned");
        match state.index.get(key) {
            Some(IndexSlot::Offset(_)) => true,
            Some(IndexSlot::NotPresent) => false,
            None => {
                state
                    .index
                    .insert(key.to_vec().into_boxed_slice(), IndexSlot::NotPresent);
                false
            }
        }
    }
}
