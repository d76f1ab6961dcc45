//! Tests for count operations - comparison filtering over a tree.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use omni_sweep::{Comparison, CountFilter, CountRequest, Query, SweepError, Sweeper};

fn tree(dir: &Path) {
    fs::write(dir.join("zero.txt"), "nothing here").expect("Write file");
    fs::write(dir.join("two_a.txt"), "tok tok").expect("Write file");
    fs::write(dir.join("two_b.txt"), "tok\ntok").expect("Write file");
    fs::write(dir.join("five.txt"), "tok tok tok tok tok").expect("Write file");
}

fn count(dir: &Path, filter: CountFilter) -> Vec<String> {
    let report = Sweeper::default()
        .count(&CountRequest {
            query: Query::literal("tok"),
            filter,
            root: dir.to_path_buf(),
            path_pattern: r"\.txt$".to_string(),
        })
        .expect("Count");
    report
        .files()
        .iter()
        .filter_map(|f| f.path.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect()
}

#[test]
fn test_equal_two_scenario() {
    let dir = TempDir::new().expect("Create temp dir");
    tree(dir.path());
    assert_eq!(
        count(dir.path(), CountFilter::new(Comparison::Equal, 2)),
        vec!["two_a.txt", "two_b.txt"]
    );
}

#[test]
fn test_greater_and_zero() {
    let dir = TempDir::new().expect("Create temp dir");
    tree(dir.path());
    assert_eq!(
        count(dir.path(), CountFilter::new(Comparison::Greater, 2)),
        vec!["five.txt"]
    );
    assert_eq!(
        count(dir.path(), "= 0".parse().expect("Parse")),
        vec!["zero.txt"]
    );
}

#[test]
fn test_count_report_keeps_counts() {
    let dir = TempDir::new().expect("Create temp dir");
    tree(dir.path());
    let report = Sweeper::default()
        .count(&CountRequest {
            query: Query::literal("tok"),
            filter: CountFilter::new(Comparison::GreaterOrEqual, 5),
            root: dir.path().to_path_buf(),
            path_pattern: r"\.txt$".to_string(),
        })
        .expect("Count");
    assert_eq!(report.total_occurrences(), 5);
    assert_eq!(report.summary().files_scanned, 4);
}

#[test]
fn test_invalid_count_expression() {
    assert!(matches!(
        CountFilter::parse_parts("=<", "2"),
        Err(SweepError::InvalidCountExpression(_))
    ));
    assert!(matches!(
        CountFilter::parse_parts(">", "two"),
        Err(SweepError::InvalidCountExpression(_))
    ));
}
