#![allow(clippy::doc_markdown)]

//! omni-io - Safe file I/O for omni-sweep
//!
//! Reads text files whole, rewrites them whole, keeps backups, and walks
//! directory trees with pattern-based pruning.
//!
//! # Features
//!
//! - **Safety**: Binary detection, size limits, strict UTF-8 (no lossy round trip)
//! - **Backups**: Timestamped `<file>~<tag><stamp>~` copies before a rewrite
//! - **Walking**: Deterministic depth-first walk with directory ignore patterns
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-io/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # IoError enum
//! ├── detect.rs   # Binary detection & decoding
//! ├── sync.rs     # Read / write-back API
//! ├── backup.rs   # Backup naming and copying
//! └── walk.rs     # PathFilter + FileWalker
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_io::{FileWalker, PathFilter, read_text_safe};
//!
//! let filter = PathFilter::new([r"[/\\]\.git[/\\]"], false)?;
//! let walker = FileWalker::new("/project".as_ref(), r"\.rs$", filter, false)?;
//! for path in walker.walk() {
//!     let content = read_text_safe(path?, 1024 * 1024)?;
//! }
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod backup;
mod detect;
mod error;
mod sync;
mod walk;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use backup::{BACKUP_TIMESTAMP_FORMAT, backup_path, create_backup};
pub use error::IoError;
pub use sync::{read_text_safe, write_text};
pub use walk::{FileWalker, PathFilter, normalize_root};

// Re-export detection utilities for advanced use
pub use detect::{decode_buffer, is_binary};
