//! Error types for scanning and rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience type for fallible scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Failures that abort a whole scan.
///
/// Access problems below the root never show up here: they are rendered
/// inline as placeholder lines instead.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The ignore file exists but could not be read or is not valid UTF-8.
    #[error("failed to read ignore file '{path}': {source}")]
    IgnoreFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An ignore line produced a pattern the regex engine rejected.
    #[error("invalid ignore pattern '{line}': {source}")]
    PatternCompile {
        line: String,
        #[source]
        source: regex::Error,
    },

    /// The root directory could not be resolved.
    #[error("cannot access '{path}': {source}")]
    RootAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),

    /// Listing a directory failed for a reason other than permissions or
    /// the directory vanishing.
    #[error("failed to list '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Creates a directory listing error with the path for context.
    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }
}
