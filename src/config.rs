use std::path::{Path, PathBuf};

/// Default mapping length when `length <= 0`: 64 GiB.
///
/// This is a virtual reservation, not an up-front disk allocation; see
/// [`crate::mapped_region`].
pub const DEFAULT_MAPPING_LENGTH: u64 = 64 * 1024 * 1024 * 1024;

/// The two external configuration knobs a [`crate::MultimapStore`] accepts.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the backing file. Created with mode 0644 if absent.
    pub file: PathBuf,

    /// Mapping length in bytes. `<= 0` resolves to [`DEFAULT_MAPPING_LENGTH`].
    pub length: i64,
}

impl StoreConfig {
    /// A config pointing at `file` with the default mapping length.
    pub fn new(file: impl AsRef<Path>) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            length: 0,
        }
    }

    /// Same as [`Self::new`] but with an explicit mapping length in bytes.
    pub fn with_length(file: impl AsRef<Path>, length: i64) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            length,
        }
    }

    pub(crate) fn resolved_length(&self) -> u64 {
        if self.length <= 0 {
            DEFAULT_MAPPING_LENGTH
        } else {
            self.length as u64
        }
    }
}
