//! Tests for render module - annotated stream and navigation index.

use std::fs;

use tempfile::TempDir;

use omni_sweep::{
    ContextLevel, FILE_MARKER, MATCH_MARKER, NavKind, Query, REPLACEMENT_MARKER,
    ReplaceRequest, ReportRenderer, SearchRequest, SweepConfig, Sweeper,
};

fn sweeper() -> Sweeper {
    Sweeper::new(SweepConfig {
        context_before: 4,
        context_after: 4,
        ..Default::default()
    })
}

#[test]
fn test_search_stream_layout() {
    let dir = TempDir::new().expect("Create temp dir");
    fs::write(dir.path().join("a.txt"), "one key two key").expect("Write file");

    let report = sweeper()
        .search(&SearchRequest {
            query: Query::literal("key"),
            root: dir.path().to_path_buf(),
            path_pattern: r"\.txt$".to_string(),
            context: ContextLevel::Full,
        })
        .expect("Search");
    let rendered = ReportRenderer::render(&report);

    assert!(rendered.text.starts_with("── sweep: search ──"));
    assert!(rendered.text.contains("query:   \"key\" (literal, case-sensitive)"));
    assert!(rendered.text.contains("◆ 1:5 one ⟦key⟧ two"));
    assert!(rendered.text.contains("◆ 1:13 two ⟦key⟧\n"));
    assert_eq!(rendered.text.matches(FILE_MARKER).count(), 1);
    assert_eq!(rendered.text.matches(MATCH_MARKER).count(), 2);

    let targets: Vec<_> = rendered
        .index
        .iter()
        .filter(|e| e.kind == NavKind::Match)
        .map(|e| e.target.offset)
        .collect();
    assert_eq!(targets, vec![4, 12]);
}

#[test]
fn test_written_replace_targets_new_offsets() {
    let dir = TempDir::new().expect("Create temp dir");
    let file = dir.path().join("a.txt");
    fs::write(&file, "ab ab").expect("Write file");

    let report = sweeper()
        .replace(&ReplaceRequest {
            query: Query::literal("ab"),
            replacement: "abcd".to_string(),
            root: dir.path().to_path_buf(),
            path_pattern: r"\.txt$".to_string(),
            write: true,
            preserve_case: false,
            backup: false,
        })
        .expect("Replace");
    let rendered = ReportRenderer::render(&report);
    let written = fs::read_to_string(&file).expect("Read file");

    assert_eq!(rendered.text.matches(REPLACEMENT_MARKER).count(), 2);
    for entry in rendered.index.iter().filter(|e| e.kind == NavKind::Replacement) {
        assert!(written[entry.target.offset..].starts_with("abcd"));
    }
    let last = rendered
        .index
        .iter()
        .rfind(|e| e.kind == NavKind::Replacement)
        .expect("Replacement entry");
    assert_eq!(last.target.offset, 5);
}

#[test]
fn test_index_serializes() {
    let dir = TempDir::new().expect("Create temp dir");
    fs::write(dir.path().join("a.txt"), "x").expect("Write file");
    let report = sweeper()
        .search(&SearchRequest {
            query: Query::literal("x"),
            root: dir.path().to_path_buf(),
            path_pattern: ".".to_string(),
            context: ContextLevel::Full,
        })
        .expect("Search");

    let json = serde_json::to_value(ReportRenderer::navigation_index(&report)).expect("JSON");
    assert_eq!(json[1]["kind"], "match");
    assert_eq!(json[1]["target"]["line"], 1);
    let report_json = serde_json::to_value(&report).expect("JSON");
    assert_eq!(report_json["header"]["operation"], "search");
}
