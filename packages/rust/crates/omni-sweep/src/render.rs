//! Report rendering: an annotated text stream plus a navigation index.
//!
//! Stream layout:
//!
//! ```text
//! ── sweep: replace ──
//!   time:    2026-10-18 09:30:00
//!   root:    /project/
//!   files:   \.rs$
//!   query:   "foo" (literal, case-sensitive)
//!   replace: "bar"
//!   context: full
//!   scanned 3 files (0 skipped), 1 matched, 2 occurrences, 0 failed
//! ════════════════════════════════════════
//! ▶ /project/src/a.rs
//! ────────────────────
//! ◆ 3:5 ctx⟦foo⟧ctx
//! ◇ 3:5 ctx⟪bar⟫ctx
//! ────────────────────
//!   2 occurrences in /project/src/a.rs
//! ════════════════════════════════════════
//! ✖ read: Cannot read /project/b.rs: File too large: 11534336 bytes (limit: 10485760)
//! ════════════════════════════════════════
//! ```
//!
//! `▶`, `◆`, `◇` and `✖` open file, occurrence, replacement and failure
//! blocks. File and failure blocks appear in walk order. Context is copied verbatim, newlines included, so viewers should
//! rely on the navigation index rather than on line splitting.

use std::fmt::Write as _;
use std::ops::Range;
use std::path::PathBuf;

use serde::Serialize;

use crate::report::{FileFailure, FileResult, Report, ReportBlock};
use crate::types::{ContextLevel, Location, Occurrence};

/// Opens a file-path line.
pub const FILE_MARKER: &str = "▶ ";
/// Opens an occurrence block.
pub const MATCH_MARKER: &str = "◆ ";
/// Opens a replacement block.
pub const REPLACEMENT_MARKER: &str = "◇ ";
/// Opens a failure line.
pub const FAILURE_MARKER: &str = "✖ ";
/// Brackets matched text.
pub const MATCH_OPEN: &str = "⟦";
/// Closes matched text.
pub const MATCH_CLOSE: &str = "⟧";
/// Brackets replacement text.
pub const REPLACEMENT_OPEN: &str = "⟪";
/// Closes replacement text.
pub const REPLACEMENT_CLOSE: &str = "⟫";
/// Between occurrence blocks.
pub const OCCURRENCE_SEPARATOR: &str = "────────────────────";
/// Between file blocks.
pub const FILE_SEPARATOR: &str = "════════════════════════════════════════";

/// What a navigation entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavKind {
    /// File-path line.
    File,
    /// Occurrence block.
    Match,
    /// Replacement block.
    Replacement,
    /// Failure line.
    Failure,
}

/// Maps a byte range of the rendered stream to a place in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Byte range in the rendered text.
    pub range: Range<usize>,
    /// Block kind.
    pub kind: NavKind,
    /// File to open.
    pub path: PathBuf,
    /// Where to put the cursor in that file as it is on disk now.
    pub target: Location,
}

/// Rendered text and its navigation index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderedReport {
    /// Annotated report text.
    pub text: String,
    /// One entry per file line, occurrence, replacement and failure.
    pub index: Vec<NavEntry>,
}

/// Serializes a [`Report`] for the external viewer.
pub struct ReportRenderer;

impl ReportRenderer {
    /// Render text and navigation index together.
    #[must_use]
    pub fn render(report: &Report) -> RenderedReport {
        let mut out = RenderedReport::default();
        Self::header(report, &mut out.text);
        for block in report.blocks() {
            match block {
                ReportBlock::File(file) => Self::file_block(file, report.header.context, &mut out),
                ReportBlock::Failure(failure) => Self::failure_line(failure, &mut out),
            }
        }
        out
    }

    /// Rendered text only.
    #[must_use]
    pub fn render_text(report: &Report) -> String {
        Self::render(report).text
    }

    /// Navigation index only.
    #[must_use]
    pub fn navigation_index(report: &Report) -> Vec<NavEntry> {
        Self::render(report).index
    }

    fn header(report: &Report, text: &mut String) {
        let header = &report.header;
        let summary = report.summary();
        let _ = writeln!(text, "── sweep: {} ──", header.operation.name());
        let _ = writeln!(
            text,
            "  time:    {}",
            header.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(text, "  root:    {}", header.root.display());
        let _ = writeln!(text, "  files:   {}", header.path_pattern);
        let _ = writeln!(
            text,
            "  query:   {:?} ({})",
            header.query.pattern,
            header.query.describe()
        );
        if let Some(replacement) = &header.replacement {
            let mode = if header.write { "written" } else { "preview" };
            let _ = writeln!(text, "  replace: {replacement:?} ({mode})");
        }
        if let Some(filter) = &header.count_filter {
            let _ = writeln!(text, "  filter:  count {filter}");
        }
        let _ = writeln!(text, "  context: {}", header.context.as_str());
        let _ = writeln!(
            text,
            "  scanned {} files ({} skipped), {} matched, {} occurrences, {} failed",
            summary.files_scanned,
            summary.files_skipped,
            summary.files_matched,
            summary.occurrences,
            summary.failures
        );
        if header.replacement.is_some() && header.write {
            let _ = writeln!(
                text,
                "  wrote {} files, {} backups",
                summary.files_written, summary.backups
            );
        }
        let _ = writeln!(text, "{FILE_SEPARATOR}");
    }

    fn failure_line(failure: &FileFailure, out: &mut RenderedReport) {
        let start = out.text.len();
        let _ = writeln!(
            out.text,
            "{FAILURE_MARKER}{}: {}",
            failure.stage.as_str(),
            failure.message
        );
        out.index.push(NavEntry {
            range: start..out.text.len(),
            kind: NavKind::Failure,
            path: failure.path.clone(),
            target: Location::default(),
        });
        let _ = writeln!(out.text, "{FILE_SEPARATOR}");
    }

    fn file_block(file: &FileResult, level: ContextLevel, out: &mut RenderedReport) {
        let start = out.text.len();
        let _ = writeln!(out.text, "{FILE_MARKER}{}", file.path.display());
        out.index.push(NavEntry {
            range: start..out.text.len(),
            kind: NavKind::File,
            path: file.path.clone(),
            target: Location::default(),
        });
        if let Some(backup) = &file.backup {
            let _ = writeln!(out.text, "  backup: {}", backup.display());
        }

        if level != ContextLevel::None && !file.occurrences.is_empty() {
            let _ = writeln!(out.text, "{OCCURRENCE_SEPARATOR}");
            for occurrence in &file.occurrences {
                Self::occurrence_block(occurrence, file.written, out);
                let _ = writeln!(out.text, "{OCCURRENCE_SEPARATOR}");
            }
        }

        let count = file.match_count();
        let noun = if count == 1 { "occurrence" } else { "occurrences" };
        let _ = writeln!(out.text, "  {count} {noun} in {}", file.path.display());
        let _ = writeln!(out.text, "{FILE_SEPARATOR}");
    }

    fn occurrence_block(occurrence: &Occurrence, written: bool, out: &mut RenderedReport) {
        // Once a file is rewritten, the snapshot offsets no longer exist on
        // disk; jump to the inserted text instead.
        let target = match (&occurrence.replacement, written) {
            (Some(replacement), true) => replacement.location,
            _ => occurrence.location,
        };

        let start = out.text.len();
        let _ = writeln!(
            out.text,
            "{MATCH_MARKER}{}:{} {}{MATCH_OPEN}{}{MATCH_CLOSE}{}",
            occurrence.location.line,
            occurrence.location.column,
            occurrence.context_before,
            occurrence.matched_text,
            occurrence.context_after
        );
        out.index.push(NavEntry {
            range: start..out.text.len(),
            kind: NavKind::Match,
            path: occurrence.path.clone(),
            target,
        });

        if let Some(replacement) = &occurrence.replacement {
            let start = out.text.len();
            let _ = writeln!(
                out.text,
                "{REPLACEMENT_MARKER}{}:{} {}{REPLACEMENT_OPEN}{}{REPLACEMENT_CLOSE}{}",
                replacement.location.line,
                replacement.location.column,
                occurrence.context_before,
                replacement.text,
                occurrence.context_after
            );
            out.index.push(NavEntry {
                range: start..out.text.len(),
                kind: NavKind::Replacement,
                path: occurrence.path.clone(),
                target,
            });
        }
    }
}
