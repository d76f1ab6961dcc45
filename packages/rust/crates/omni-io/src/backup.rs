//! Backup copies made before a file is rewritten in place.
//!
//! Backup names have the form `<original>~<tag><timestamp>~` with a
//! second-resolution timestamp. Two backups of the same file with the same
//! tag inside one second share a name; the later copy overwrites the earlier.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::error::IoError;

/// Timestamp layout used in backup names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Build the backup path for `original` without touching the filesystem.
#[must_use]
pub fn backup_path(original: &Path, tag: &str, stamp: NaiveDateTime) -> PathBuf {
    let mut name: OsString = original.as_os_str().to_owned();
    name.push("~");
    name.push(tag);
    name.push(stamp.format(BACKUP_TIMESTAMP_FORMAT).to_string());
    name.push("~");
    PathBuf::from(name)
}

/// Copy `original` next to itself under a timestamped backup name.
///
/// # Errors
/// `IoError::System` when the copy fails.
pub fn create_backup(original: &Path, tag: &str) -> Result<PathBuf, IoError> {
    let target = backup_path(original, tag, Local::now().naive_local());
    fs::copy(original, &target)?;
    tracing::debug!(
        original = %original.display(),
        backup = %target.display(),
        "backup created"
    );
    Ok(target)
}
