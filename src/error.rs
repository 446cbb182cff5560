//! Error types for hive reading and comparison.
//!
//! Every failure while opening or walking a hive is fatal for a comparison:
//! a half-built path set would make the difference meaningless, so errors
//! propagate to the caller unchanged.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur while reading or comparing hives.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// I/O error occurred while reading the hive file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A named hive file could not be opened as a hive.
    #[error("cannot open hive {}: {source}", path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: Box<RegistryError>,
    },

    /// Invalid magic signature in header or structure.
    #[error("Invalid signature: expected {expected:?}, found {found:?}")]
    InvalidSignature {
        expected: Vec<u8>,
        found: Vec<u8>,
    },

    /// Invalid hive format or corrupted data.
    #[error("Invalid hive format: {0}")]
    InvalidFormat(String),

    /// Cell offset is out of bounds.
    #[error("Invalid cell offset: {offset:#x} (hive size: {hive_size:#x})")]
    InvalidOffset {
        offset: u32,
        hive_size: usize,
    },

    /// Cell size is invalid or corrupted.
    #[error("Invalid cell size: {size} at offset {offset:#x}")]
    InvalidCellSize {
        size: i32,
        offset: u32,
    },

    /// Hive is too small to be valid.
    #[error("Hive too small: {size} bytes (minimum: {minimum} bytes)")]
    HiveTooSmall {
        size: usize,
        minimum: usize,
    },

    /// Checksum mismatch in hive header.
    #[error("Checksum mismatch: expected {expected:#x}, calculated {calculated:#x}")]
    ChecksumMismatch {
        expected: u32,
        calculated: u32,
    },

    /// Unsupported hive version.
    #[error("Unsupported hive version: {major}.{minor}")]
    UnsupportedVersion {
        major: u32,
        minor: u32,
    },

    /// Data truncated or incomplete.
    #[error("Truncated data at offset {offset:#x}: expected {expected} bytes, got {actual} bytes")]
    TruncatedData {
        offset: u32,
        expected: usize,
        actual: usize,
    },

    /// Invalid subkey list type.
    #[error("Invalid subkey list type {list_type:?} at offset {offset:#x}")]
    InvalidSubkeyList {
        list_type: [u8; 2],
        offset: u32,
    },

    /// A traversal worker thread panicked.
    #[error("hive walk for {} panicked", path.display())]
    WorkerPanicked {
        /// Hive the worker was walking.
        path: PathBuf,
    },
}

impl RegistryError {
    /// Creates an invalid signature error with context.
    pub fn invalid_signature(expected: &[u8], found: &[u8]) -> Self {
        Self::InvalidSignature {
            expected: expected.to_vec(),
            found: found.to_vec(),
        }
    }

    /// Creates an invalid offset error with context.
    ///
    /// # Arguments
    ///
    /// * `offset` - The invalid offset
    /// * `hive_size` - Total size of the hive for context
    pub fn invalid_offset(offset: u32, hive_size: usize) -> Self {
        Self::InvalidOffset { offset, hive_size }
    }

    /// Creates an invalid cell size error with context.
    pub fn invalid_cell_size(size: i32, offset: u32) -> Self {
        Self::InvalidCellSize { size, offset }
    }

    /// Wraps an error raised while opening `path`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use reg_diff::error::RegistryError;
    /// let err = RegistryError::open(
    ///     "/evidence/SYSTEM",
    ///     RegistryError::HiveTooSmall { size: 12, minimum: 4096 },
    /// );
    /// assert!(err.to_string().contains("/evidence/SYSTEM"));
    /// ```
    pub fn open(path: impl Into<PathBuf>, source: RegistryError) -> Self {
        Self::Open {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Returns true if this error means the input is not a readable hive
    /// at all, as opposed to a hive that is damaged further in.
    pub fn is_open_failure(&self) -> bool {
        matches!(
            self,
            Self::Open { .. }
                | Self::Io(_)
                | Self::HiveTooSmall { .. }
                | Self::InvalidSignature { .. }
                | Self::ChecksumMismatch { .. }
                | Self::UnsupportedVersion { .. }
        )
    }
}
