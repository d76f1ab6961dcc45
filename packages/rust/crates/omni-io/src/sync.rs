//! Synchronous file I/O operations.
//!
//! Every file is read whole into memory and, when written, rewritten whole.

use std::fs as std_fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::detect::decode_buffer;
use crate::error::IoError;

/// Read text from a file with size, binary and encoding checks.
///
/// # Arguments
/// * `path` - Path to the file
/// * `max_bytes` - Maximum file size in bytes
///
/// # Returns
/// Decoded text content or an error.
///
/// # Example
///
/// ```rust,ignore
/// use omni_io::read_text_safe;
///
/// let content = read_text_safe("README.md", 1024 * 1024)?;
/// ```
///
/// # Errors
/// See [`IoError`]; binary and non-UTF-8 files are rejected.
pub fn read_text_safe<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata = std_fs::metadata(path)
        .map_err(|_| IoError::NotFound(path.to_string_lossy().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = std_fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or_default());
    file.read_to_end(&mut buffer)?;

    decode_buffer(buffer)
}

/// Overwrite `path` with `content` in full.
///
/// The file is truncated and rewritten; no temporary file or rename is used,
/// so a failure part-way leaves whatever the filesystem kept.
///
/// # Errors
/// `IoError::System` when the file cannot be opened or written.
pub fn write_text<P: AsRef<Path>>(path: P, content: &str) -> Result<(), IoError> {
    let mut file = std_fs::File::create(path.as_ref())?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(())
}
