use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Owns the append position: a writing handle to the backing file positioned
/// at end-of-file, plus the `end_offset` it advances on every successful
/// append.
///
/// `append` writes bytes to the file *before* the caller is allowed to
/// publish their offset anywhere (the index, a `next` link) — this is what
/// guarantees a reader taking the shared lock after publication always sees
/// well-formed bytes.
pub(crate) struct AppendLog<'a> {
    file: &'a mut BufWriter<File>,
    end_offset: &'a mut u64,
}

impl<'a> AppendLog<'a> {
    pub fn new(file: &'a mut BufWriter<File>, end_offset: &'a mut u64) -> Self {
        Self { file, end_offset }
    }

    /// Writes `bytes` at the current end of file and returns the offset they
    /// start at. `end_offset` only advances once the full write has landed;
    /// a short write from the platform is looped over by `write_all`, never
    /// surfaced as a partial append.
    pub fn append(&mut self, bytes: &[u8]) -> io::Result<u64> {
        let start = *self.end_offset;
        self.file.write_all(bytes)?;
        self.file.flush()?;
        *self.end_offset += bytes.len() as u64;
        Ok(start)
    }
}
