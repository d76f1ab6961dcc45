//! Operation orchestration: walk, read, match or replace, write, report.
//!
//! Files are processed strictly one at a time. Every pattern is compiled and
//! the root is checked before the first file is opened, so a bad pattern
//! never yields a partial report.

use std::path::{Path, PathBuf};

use chrono::Local;
use omni_io::{FileWalker, IoError, PathFilter, create_backup, read_text_safe, write_text};

use crate::config::SweepConfig;
use crate::count::CountFilter;
use crate::error::SweepError;
use crate::matcher::search_content;
use crate::query::Query;
use crate::replace::ReplaceEngine;
use crate::report::{FailureStage, FileResult, Operation, Report, ReportHeader};
use crate::types::ContextLevel;

/// Parameters of a search (literal or regex, by `query.kind`).
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// What to look for.
    pub query: Query,
    /// Directory to walk.
    pub root: PathBuf,
    /// Regex a file path must match to be scanned.
    pub path_pattern: String,
    /// How much context to capture and show.
    pub context: ContextLevel,
}

/// Parameters of a replace (literal or regex, by `query.kind`).
#[derive(Debug, Clone)]
pub struct ReplaceRequest {
    /// What to replace.
    pub query: Query,
    /// Replacement text, or capture template for regex queries.
    pub replacement: String,
    /// Directory to walk.
    pub root: PathBuf,
    /// Regex a file path must match to be scanned.
    pub path_pattern: String,
    /// Overwrite files on disk; otherwise only report.
    pub write: bool,
    /// Mirror the case of each match (literal queries only).
    pub preserve_case: bool,
    /// Copy each file to a timestamped backup before overwriting it.
    pub backup: bool,
}

/// Parameters of a count.
#[derive(Debug, Clone)]
pub struct CountRequest {
    /// What to count.
    pub query: Query,
    /// Files are listed when their count satisfies this.
    pub filter: CountFilter,
    /// Directory to walk.
    pub root: PathBuf,
    /// Regex a file path must match to be scanned.
    pub path_pattern: String,
}

/// Runs search, replace and count operations under one configuration.
#[derive(Debug, Clone, Default)]
pub struct Sweeper {
    config: SweepConfig,
}

impl Sweeper {
    /// Create a sweeper.
    #[must_use]
    pub fn new(config: SweepConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Search every matching file; only files with matches are listed.
    ///
    /// # Errors
    /// Pre-flight errors, or the first read failure when fail-fast is set.
    pub fn search(&self, request: &SearchRequest) -> Result<Report, SweepError> {
        let matcher = request.query.compile()?;
        let walker = self.walker(&request.root, &request.path_pattern)?;
        let window = request
            .context
            .window(self.config.context_before, self.config.context_after);

        let mut report = Report::new(Self::header(
            &walker,
            Operation::for_query(&request.query, false),
            &request.query,
            &request.path_pattern,
            request.context,
        ));

        self.for_each_file(&walker, &mut report, |path, content, report| {
            let occurrences = search_content(path, &content, &matcher, window);
            tracing::debug!(path = %path.display(), matches = occurrences.len(), "scanned");
            if !occurrences.is_empty() {
                report.add_file(FileResult::new(path, occurrences));
            }
        })?;

        Self::log_summary(&report);
        Ok(report)
    }

    /// Replace in every matching file.
    ///
    /// The replaced content is always computed in memory. Only when
    /// `write` is set and a file has matches is it backed up (optionally)
    /// and overwritten in full.
    ///
    /// # Errors
    /// Pre-flight errors, or the first read failure when fail-fast is set.
    /// Write failures are recorded on the report.
    pub fn replace(&self, request: &ReplaceRequest) -> Result<Report, SweepError> {
        let matcher = request.query.compile()?;
        let walker = self.walker(&request.root, &request.path_pattern)?;
        let operation = Operation::for_query(&request.query, true);
        let window =
            ContextLevel::Full.window(self.config.context_before, self.config.context_after);
        if request.preserve_case && request.query.is_regex() {
            tracing::debug!("case preservation applies to literal replace only; ignored");
        }
        let engine = ReplaceEngine::new(&matcher, &request.replacement)
            .preserve_case(request.preserve_case)
            .window(window);
        let backup_tag = format!("{}-{}-", self.config.backup_tag, operation.name());

        let mut header = Self::header(
            &walker,
            operation,
            &request.query,
            &request.path_pattern,
            ContextLevel::Full,
        );
        header.replacement = Some(request.replacement.clone());
        header.write = request.write;
        let mut report = Report::new(header);

        self.for_each_file(&walker, &mut report, |path, content, report| {
            let replaced = engine.replace_all(path, &content);
            if replaced.count() == 0 {
                return;
            }
            tracing::debug!(path = %path.display(), replacements = replaced.count(), "replaced");
            let mut result = FileResult::new(path, replaced.occurrences);

            if request.write {
                if request.backup {
                    match create_backup(path, &backup_tag) {
                        Ok(backup) => result.backup = Some(backup),
                        Err(error) => {
                            // No backup, no overwrite.
                            report.add_file(result);
                            Self::record_write_failure(report, path, error, "backup failed");
                            return;
                        }
                    }
                }
                let written = write_text(path, &replaced.content);
                result.written = written.is_ok();
                report.add_file(result);
                if let Err(error) = written {
                    Self::record_write_failure(report, path, error, "write failed");
                }
            } else {
                report.add_file(result);
            }
        })?;

        Self::log_summary(&report);
        Ok(report)
    }

    /// Count matches per file and list files whose count satisfies the
    /// filter, zero-count files included.
    ///
    /// # Errors
    /// Pre-flight errors, or the first read failure when fail-fast is set.
    pub fn count(&self, request: &CountRequest) -> Result<Report, SweepError> {
        let matcher = request.query.compile()?;
        let walker = self.walker(&request.root, &request.path_pattern)?;

        let mut header = Self::header(
            &walker,
            Operation::Count,
            &request.query,
            &request.path_pattern,
            ContextLevel::None,
        );
        header.count_filter = Some(request.filter);
        let mut report = Report::new(header);

        self.for_each_file(&walker, &mut report, |path, content, report| {
            let occurrences =
                search_content(path, &content, &matcher, ContextLevel::None.window(0, 0));
            if request.filter.matches(occurrences.len()) {
                report.add_file(FileResult::new(path, occurrences));
            }
        })?;

        Self::log_summary(&report);
        Ok(report)
    }

    /// Compile the path filter and walker, and check the root.
    fn walker(&self, root: &Path, path_pattern: &str) -> Result<FileWalker, SweepError> {
        let lift = |err| SweepError::walk_setup(root, err);
        let filter = PathFilter::new(&self.config.ignore_patterns, self.config.case_fold_paths)
            .map_err(lift)?;
        let walker = FileWalker::new(root, path_pattern, filter, self.config.case_fold_paths)
            .map_err(lift)?
            .follow_symlinks(self.config.follow_symlinks);
        if !root.is_dir() {
            return Err(SweepError::InvalidRoot(root.to_path_buf()));
        }
        Ok(walker)
    }

    fn header(
        walker: &FileWalker,
        operation: Operation,
        query: &Query,
        path_pattern: &str,
        context: ContextLevel,
    ) -> ReportHeader {
        ReportHeader {
            operation,
            timestamp: Local::now(),
            root: walker.root().to_path_buf(),
            path_pattern: path_pattern.to_string(),
            query: query.clone(),
            replacement: None,
            count_filter: None,
            context,
            write: false,
        }
    }

    /// Read each walked file and hand its content to `visit`.
    ///
    /// Binary files are counted and skipped. Walk and read errors are
    /// recorded, or returned immediately under fail-fast.
    fn for_each_file<F>(
        &self,
        walker: &FileWalker,
        report: &mut Report,
        mut visit: F,
    ) -> Result<(), SweepError>
    where
        F: FnMut(&Path, String, &mut Report),
    {
        for entry in walker.walk() {
            let path = match entry {
                Ok(path) => path,
                Err(error) => {
                    let path = match &error {
                        IoError::Walk(walk) => walk.path().map(Path::to_path_buf),
                        _ => None,
                    }
                    .unwrap_or_else(|| walker.root().to_path_buf());
                    tracing::warn!(path = %path.display(), error = %error, "walk error");
                    let error = SweepError::Walk {
                        path: path.clone(),
                        source: error,
                    };
                    if self.config.fail_fast {
                        return Err(error);
                    }
                    report.add_failure(&path, FailureStage::Walk, error.to_string());
                    continue;
                }
            };

            match read_text_safe(&path, self.config.max_file_size) {
                Ok(content) => {
                    report.record_scanned();
                    visit(&path, content, report);
                }
                Err(IoError::BinaryFile) => {
                    tracing::debug!(path = %path.display(), "binary file skipped");
                    report.record_skipped();
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), error = %error, "read failed");
                    let error = SweepError::FileRead {
                        path: path.clone(),
                        source: error,
                    };
                    if self.config.fail_fast {
                        return Err(error);
                    }
                    report.add_failure(&path, FailureStage::Read, error.to_string());
                }
            }
        }
        Ok(())
    }

    fn record_write_failure(report: &mut Report, path: &Path, error: IoError, what: &str) {
        tracing::warn!(path = %path.display(), error = %error, "{what}");
        let error = SweepError::FileWrite {
            path: path.to_path_buf(),
            source: error,
        };
        report.add_failure(path, FailureStage::Write, error.to_string());
    }

    fn log_summary(report: &Report) {
        let summary = report.summary();
        tracing::info!(
            operation = report.header.operation.name(),
            files_scanned = summary.files_scanned,
            files_matched = summary.files_matched,
            occurrences = summary.occurrences,
            failures = summary.failures,
            "sweep finished"
        );
    }
}
