//! Tests for backup module - timestamped copies before rewrite.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;

use omni_io::{backup_path, create_backup, write_text};

#[test]
fn test_backup_keeps_original_bytes_after_rewrite() {
    let dir = TempDir::new().expect("Create temp dir");
    let file = dir.path().join("data.cfg");
    fs::write(&file, "port = 80\n").expect("Write file");

    let backup = create_backup(&file, "sweep-replace-").expect("Backup");
    write_text(&file, "port = 8080\n").expect("Rewrite");

    assert_eq!(fs::read_to_string(&backup).expect("Read backup"), "port = 80\n");
    assert_eq!(fs::read_to_string(&file).expect("Read file"), "port = 8080\n");
}

#[test]
fn test_backup_tags_are_distinct() {
    let stamp = NaiveDate::from_ymd_opt(2025, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .expect("valid timestamp");
    let plain = backup_path(Path::new("f.txt"), "sweep-replace-", stamp);
    let regex = backup_path(Path::new("f.txt"), "sweep-regex-replace-", stamp);

    assert_eq!(plain, Path::new("f.txt~sweep-replace-20251231235959~"));
    assert_ne!(plain, regex);
}

#[test]
fn test_backup_of_missing_file_fails() {
    let dir = TempDir::new().expect("Create temp dir");
    assert!(create_backup(&dir.path().join("nope"), "t-").is_err());
}
