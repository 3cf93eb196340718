//! On-disk record layout and the chain/gap operations that walk it.
//!
//! ```text
//! | total: 8B | klen: 1B | key: klen B | value slots... | self_end: 8B | next: 8B |
//! ```
//!
//! A value slot is either live (`[vlen: 1B][payload: vlen B]`, `vlen in 1..=255`)
//! or tombstone padding (one or more `0x00` bytes). All multi-byte integers
//! are big-endian.

use crate::error::Error;
use crate::mapped_region::MappedRegion;

pub(crate) const TRAILER_SIZE: u64 = 16;
pub const MIN_KEY_LEN: usize = 1;
pub const MAX_KEY_LEN: usize = 255;
pub const MIN_VALUE_LEN: usize = 1;
pub const MAX_VALUE_LEN: usize = 255;

#[inline]
fn total(region: &MappedRegion, offset: u64) -> u64 {
    region.read_u64(offset)
}

#[inline]
fn klen(region: &MappedRegion, offset: u64) -> u8 {
    region.read_u8(offset + 8)
}

#[inline]
fn value_area(offset: u64, total: u64, klen: u8) -> (u64, u64) {
    let start = offset + 9 + klen as u64;
    let end = offset + total - TRAILER_SIZE;
    (start, end)
}

#[inline]
fn next_field_offset(offset: u64, total: u64) -> u64 {
    offset + total - 8
}

#[inline]
fn next(region: &MappedRegion, offset: u64, total: u64) -> u64 {
    region.read_u64(next_field_offset(offset, total))
}

/// Overwrites a record's `next` field in place, extending the chain.
pub(crate) fn set_next(region: &mut MappedRegion, offset: u64, new_next: u64) {
    let total = total(region, offset);
    region.write_u64(next_field_offset(offset, total), new_next);
}

/// Forward-walks `next` links starting at `head` until reaching the tail
/// (the record whose `next` is 0), and returns its offset.
pub(crate) fn find_tail(region: &MappedRegion, head: u64) -> u64 {
    let mut cur = head;
    loop {
        let t = total(region, cur);
        let n = next(region, cur, t);
        if n == 0 {
            return cur;
        }
        cur = n;
    }
}

/// Scans the chain head to tail for the first usable gap for a value of
/// `needed_len` bytes. A gap is usable when `needed_len < gap_len` (the
/// strict inequality reserves at least one byte so the reused slot can never
/// grow past the gap it was carved from). Returns the gap's `[start, end)`.
pub(crate) fn find_usable_gap(
    region: &MappedRegion,
    head: u64,
    needed_len: usize,
) -> Option<(u64, u64)> {
    let needed_len = needed_len as u64;
    let mut cur = head;
    loop {
        let t = total(region, cur);
        let k = klen(region, cur);
        let (area_start, area_end) = value_area(cur, t, k);

        let mut p = area_start;
        while p < area_end {
            let b = region.read_u8(p);
            if b == 0 {
                let gap_start = p;
                let mut q = p;
                while q < area_end && region.read_u8(q) == 0 {
                    q += 1;
                }
                if needed_len < q - gap_start {
                    return Some((gap_start, q));
                }
                p = q;
            } else {
                p += 1 + b as u64;
            }
        }

        let n = next(region, cur, t);
        if n == 0 {
            return None;
        }
        cur = n;
    }
}

/// Writes a live slot at `start`: `[vlen][value bytes]`. Any residual gap
/// bytes following the slot are left untouched (still `0x00`, still reusable).
pub(crate) fn write_slot(region: &mut MappedRegion, start: u64, value: &[u8]) {
    region.write_u8(start, value.len() as u8);
    region.write(start + 1, value);
}

/// Collects every live value in the chain, in chain order then intra-record
/// slot order, copying bytes out of the mapping so the result can outlive
/// the lock that guarded the read.
pub(crate) fn collect_values(region: &MappedRegion, head: u64) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut cur = head;
    loop {
        let t = total(region, cur);
        let k = klen(region, cur);
        let (area_start, area_end) = value_area(cur, t, k);

        let mut p = area_start;
        while p < area_end {
            let b = region.read_u8(p);
            if b == 0 {
                p += 1;
                continue;
            }
            let vlen = b as u64;
            out.push(region.read(p + 1, vlen as usize).to_vec());
            p += 1 + vlen;
        }

        let n = next(region, cur, t);
        if n == 0 {
            break;
        }
        cur = n;
    }
    out
}

/// Walks the chain tombstoning every live slot whose payload satisfies
/// `matches`: both the `vlen` byte and the payload are zeroed, merging the
/// slot into whatever gap surrounds it.
pub(crate) fn tombstone_matching(
    region: &mut MappedRegion,
    head: u64,
    mut matches: impl FnMut(&[u8]) -> bool,
) {
    let mut cur = head;
    loop {
        let t = total(region, cur);
        let k = klen(region, cur);
        let (area_start, area_end) = value_area(cur, t, k);

        let mut p = area_start;
        while p < area_end {
            let b = region.read_u8(p);
            if b == 0 {
                p += 1;
                continue;
            }
            let vlen = b as u64;
            if matches(region.read(p + 1, vlen as usize)) {
                for i in p..(p + 1 + vlen) {
                    region.write_u8(i, 0);
                }
            }
            p += 1 + vlen;
        }

        let n = next(region, cur, t);
        if n == 0 {
            break;
        }
        cur = n;
    }
}

fn validate_value_len(value: &[u8]) -> Result<(), Error> {
    if value.is_empty() || value.len() > MAX_VALUE_LEN {
        return Err(Error::ValueTooLarge(value.len()));
    }
    Ok(())
}

/// Assembles a new record in a scratch buffer: header, then one `[vlen][value]`
/// slot per pushed value, then a 16-byte trailer. `total` and `self_end` are
/// backfilled once every value has been pushed and the final size is known.
pub(crate) struct RecordBuilder {
    buf: Vec<u8>,
}

impl RecordBuilder {
    pub fn new(key: &[u8]) -> Self {
        debug_assert!((MIN_KEY_LEN..=MAX_KEY_LEN).contains(&key.len()));

        let mut buf = Vec::with_capacity(32 + key.len());
        buf.extend_from_slice(&0u64.to_be_bytes()); // total, backfilled in finish()
        buf.push(key.len() as u8);
        buf.extend_from_slice(key);
        Self { buf }
    }

    /// Validates and appends one value slot. The scratch buffer grows via
    /// `Vec`'s own amortized-doubling strategy; callers that need a partial
    /// failure to roll back nothing should validate every value up front
    /// (see `MultimapStore::add`), since a builder is never rolled back once
    /// a value lands in it.
    pub fn push_value(&mut self, value: &[u8]) -> Result<(), Error> {
        validate_value_len(value)?;
        self.buf.push(value.len() as u8);
        self.buf.extend_from_slice(value);
        Ok(())
    }

    /// Closes out the record at the given append offset: writes the trailer,
    /// then backfills `total` and `self_end`. `next` is left at 0 (this
    /// record starts life as a tail).
    pub fn finish(mut self, offset: u64) -> Vec<u8> {
        self.buf.extend_from_slice(&0u64.to_be_bytes()); // self_end placeholder
        self.buf.extend_from_slice(&0u64.to_be_bytes()); // next = 0 (tail)

        let total = self.buf.len() as u64;
        self.buf[0..8].copy_from_slice(&total.to_be_bytes());

        let self_end = offset + total;
        let self_end_at = self.buf.len() - 16;
        self.buf[self_end_at..self_end_at + 8].copy_from_slice(&self_end.to_be_bytes());

        self.buf
    }
}

pub(crate) fn validate_values(values: &[&[u8]]) -> Result<(), Error> {
    for value in values {
        validate_value_len(value)?;
    }
    Ok(())
}
