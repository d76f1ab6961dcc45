//! Error types for sweep operations.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use std::path::{Path, PathBuf};

use omni_io::IoError;
use thiserror::Error;

/// Error types for search, replace and count operations.
///
/// `InvalidPattern`, `InvalidCountExpression` and `InvalidRoot` are raised
/// before any file is opened. `Walk` and `FileRead` surface as `Err` only
/// when fail-fast is configured. Otherwise they, like `FileWrite`, are
/// recorded on the report with their `Display` text as the message.
#[derive(Error, Debug)]
pub enum SweepError {
    /// A query, path or ignore regex failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern text.
        pattern: String,
        /// Compiler diagnostic.
        #[source]
        source: regex::Error,
    },

    /// Count comparison could not be parsed.
    #[error("Invalid count expression: {0}")]
    InvalidCountExpression(String),

    /// Root directory missing or not a directory.
    #[error("Root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// A file could not be read.
    #[error("Cannot read {}: {source}", .path.display())]
    FileRead {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: IoError,
    },

    /// A file (or its backup) could not be written.
    #[error("Cannot write {}: {source}", .path.display())]
    FileWrite {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: IoError,
    },

    /// A directory could not be traversed (unreadable, symlink loop).
    #[error("Cannot walk {}: {source}", .path.display())]
    Walk {
        /// Directory (or entry) the walk failed at.
        path: PathBuf,
        /// Underlying traversal failure.
        #[source]
        source: IoError,
    },
}

impl SweepError {
    /// Lift an error from setting up the walk of `root`. Pattern failures
    /// keep their pre-flight meaning; anything else is a walk failure at
    /// the root.
    pub(crate) fn walk_setup(root: &Path, err: IoError) -> Self {
        match err {
            IoError::Pattern { pattern, source } => Self::InvalidPattern { pattern, source },
            other => Self::Walk {
                path: root.to_path_buf(),
                source: other,
            },
        }
    }
}
