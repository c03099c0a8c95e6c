//! Loaded BVH file contents.

use crate::error::{PlaybackError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Immutable contents of a loaded BVH file.
///
/// The whole file is read into memory once at startup and owned for the
/// lifetime of the process. Sessions share it read-only behind an `Arc`,
/// so no synchronization exists after load — there is nothing left to
/// write.
pub struct MotionData {
    data: Vec<u8>,
    path: PathBuf,
}

impl MotionData {
    /// Load a BVH file into memory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)
            .map_err(|e| PlaybackError::file_error(path.to_path_buf(), e))?;

        info!("Loaded {} ({} bytes)", path.display(), data.len());

        Ok(Self { data, path: path.to_path_buf() })
    }

    /// Create MotionData from bytes (for testing).
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into(), path: PathBuf::from("<memory>") }
    }

    /// The raw file bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Total length of the loaded file.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the file was empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The path this buffer was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
