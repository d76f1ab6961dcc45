//! Report model: per-file results in walk order plus run metadata.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::count::CountFilter;
use crate::query::Query;
use crate::types::{ContextLevel, Occurrence};

/// The operation a report was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Literal search.
    Search,
    /// Regex search.
    RegexSearch,
    /// Literal replace.
    Replace,
    /// Regex replace.
    RegexReplace,
    /// Count filter.
    Count,
}

impl Operation {
    /// Stable operation name; also used in backup file tags.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::RegexSearch => "regex-search",
            Self::Replace => "replace",
            Self::RegexReplace => "regex-replace",
            Self::Count => "count",
        }
    }

    /// Search or replace variant matching the query kind.
    #[must_use]
    pub fn for_query(query: &Query, replace: bool) -> Self {
        match (query.is_regex(), replace) {
            (false, false) => Self::Search,
            (true, false) => Self::RegexSearch,
            (false, true) => Self::Replace,
            (true, true) => Self::RegexReplace,
        }
    }
}

/// Run metadata shown at the top of a report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportHeader {
    /// Operation performed.
    pub operation: Operation,
    /// When the run started.
    pub timestamp: DateTime<Local>,
    /// Normalized root directory (trailing separator).
    pub root: PathBuf,
    /// Regex filtering file paths.
    pub path_pattern: String,
    /// Query searched for.
    pub query: Query,
    /// Replacement text, for replace operations.
    pub replacement: Option<String>,
    /// Count predicate, for count operations.
    pub count_filter: Option<CountFilter>,
    /// Context level occurrences were captured at.
    pub context: ContextLevel,
    /// Whether replace results were written to disk.
    pub write: bool,
}

/// All occurrences found in one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    /// File path as produced by the walk.
    pub path: PathBuf,
    /// Occurrences in file order.
    pub occurrences: Vec<Occurrence>,
    /// The file was overwritten with replaced content.
    pub written: bool,
    /// Backup made before the overwrite.
    pub backup: Option<PathBuf>,
}

impl FileResult {
    /// Seal the occurrences of one file.
    #[must_use]
    pub fn new(path: &Path, occurrences: Vec<Occurrence>) -> Self {
        Self {
            path: path.to_path_buf(),
            occurrences,
            written: false,
            backup: None,
        }
    }

    /// Number of matches; always the number of recorded occurrences.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.occurrences.len()
    }
}

/// Stage at which a file failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    /// Directory traversal.
    Walk,
    /// Reading or decoding.
    Read,
    /// Backup copy or write-back.
    Write,
}

impl FailureStage {
    /// Lower-case label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

/// A per-file error recorded instead of aborting the run.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    /// File (or directory) concerned.
    pub path: PathBuf,
    /// Where it failed.
    pub stage: FailureStage,
    /// Error text.
    pub message: String,
}

/// Aggregate numbers for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Files read (including skipped binaries).
    pub files_scanned: usize,
    /// Binary files skipped.
    pub files_skipped: usize,
    /// Files listed in the report.
    pub files_matched: usize,
    /// Sum of match counts over listed files.
    pub occurrences: usize,
    /// Files that failed.
    pub failures: usize,
    /// Files overwritten.
    pub files_written: usize,
    /// Backups created.
    pub backups: usize,
}

/// One entry of a report in walk order.
#[derive(Debug, Clone, Copy)]
pub enum ReportBlock<'a> {
    /// A file with results.
    File(&'a FileResult),
    /// A file that failed.
    Failure(&'a FileFailure),
}

/// Accumulated results of one operation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Run metadata.
    pub header: ReportHeader,
    files: Vec<FileResult>,
    failures: Vec<FileFailure>,
    /// Number of file results added before each failure.
    #[serde(skip)]
    failure_slots: Vec<usize>,
    files_scanned: usize,
    files_skipped: usize,
}

impl Report {
    /// Empty report for a run described by `header`.
    #[must_use]
    pub fn new(header: ReportHeader) -> Self {
        Self {
            header,
            files: Vec::new(),
            failures: Vec::new(),
            failure_slots: Vec::new(),
            files_scanned: 0,
            files_skipped: 0,
        }
    }

    /// Append a sealed file result. Order of calls is report order.
    pub fn add_file(&mut self, result: FileResult) {
        self.files.push(result);
    }

    /// Record a per-file failure.
    pub fn add_failure(&mut self, path: &Path, stage: FailureStage, message: impl Into<String>) {
        self.failure_slots.push(self.files.len());
        self.failures.push(FileFailure {
            path: path.to_path_buf(),
            stage,
            message: message.into(),
        });
    }

    /// Count a file as read.
    pub fn record_scanned(&mut self) {
        self.files_scanned += 1;
    }

    /// Count a file as read but skipped (binary).
    pub fn record_skipped(&mut self) {
        self.files_scanned += 1;
        self.files_skipped += 1;
    }

    /// File results in insertion (walk) order.
    #[must_use]
    pub fn files(&self) -> &[FileResult] {
        &self.files
    }

    /// Per-file failures in the order they happened.
    #[must_use]
    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    /// File results and failures interleaved in the order they were added.
    #[must_use]
    pub fn blocks(&self) -> Vec<ReportBlock<'_>> {
        let mut blocks = Vec::with_capacity(self.files.len() + self.failures.len());
        let mut failures = self.failures.iter().zip(&self.failure_slots).peekable();
        for (index, file) in self.files.iter().enumerate() {
            while let Some((failure, _)) = failures.next_if(|(_, slot)| **slot <= index) {
                blocks.push(ReportBlock::Failure(failure));
            }
            blocks.push(ReportBlock::File(file));
        }
        blocks.extend(failures.map(|(failure, _)| ReportBlock::Failure(failure)));
        blocks
    }

    /// Number of files listed.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Sum of match counts over listed files.
    #[must_use]
    pub fn total_occurrences(&self) -> usize {
        self.files.iter().map(FileResult::match_count).sum()
    }

    /// Aggregate numbers.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            files_scanned: self.files_scanned,
            files_skipped: self.files_skipped,
            files_matched: self.file_count(),
            occurrences: self.total_occurrences(),
            failures: self.failures.len(),
            files_written: self.files.iter().filter(|f| f.written).count(),
            backups: self.files.iter().filter(|f| f.backup.is_some()).count(),
        }
    }
}
