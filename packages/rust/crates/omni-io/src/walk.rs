//! Directory walking with subtree pruning.
//!
//! [`PathFilter`] decides which directories are pruned; [`FileWalker`] yields
//! the regular files below a root whose full path matches a path pattern.
//! Sibling entries are visited in file-name order so a walk over an unchanged
//! tree is reproducible.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use regex::{Regex, RegexBuilder};
use walkdir::WalkDir;

use crate::error::IoError;

fn compile(pattern: &str, case_fold: bool) -> Result<Regex, IoError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_fold)
        .build()
        .map_err(|source| IoError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn ends_with_separator(path: &str) -> bool {
    path.ends_with('/') || path.ends_with(MAIN_SEPARATOR)
}

/// Append a trailing separator to `root` unless it already has one.
#[must_use]
pub fn normalize_root(root: &Path) -> PathBuf {
    let mut raw = root.as_os_str().to_owned();
    if !ends_with_separator(&root.to_string_lossy()) {
        raw.push(MAIN_SEPARATOR.to_string());
    }
    PathBuf::from(raw)
}

/// Ordered set of directory ignore patterns.
///
/// A directory is ignored when any pattern finds a match anywhere in its
/// path. Directory paths are tested with a trailing separator, so
/// `[/\\]target[/\\]` prunes `target/` without touching `targets.rs`.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    patterns: Vec<Regex>,
}

impl PathFilter {
    /// Compile every pattern; the first one that fails aborts construction.
    ///
    /// # Errors
    /// `IoError::Pattern` naming the pattern that did not compile.
    pub fn new<I, S>(patterns: I, case_fold: bool) -> Result<Self, IoError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| compile(p.as_ref(), case_fold))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Number of patterns held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when the filter never ignores anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether the directory at `dir` should be pruned from the walk.
    #[must_use]
    pub fn should_ignore(&self, dir: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let mut text = dir.to_string_lossy().into_owned();
        if !ends_with_separator(&text) {
            text.push(MAIN_SEPARATOR);
        }
        self.patterns.iter().any(|re| re.is_match(&text))
    }
}

/// Depth-first enumeration of regular files under a root.
#[derive(Debug, Clone)]
pub struct FileWalker {
    root: PathBuf,
    path_pattern: Regex,
    filter: PathFilter,
    follow_symlinks: bool,
}

impl FileWalker {
    /// Build a walker; `path_pattern` is a regex searched in each file's full path.
    ///
    /// # Errors
    /// `IoError::Pattern` when `path_pattern` does not compile.
    pub fn new(
        root: &Path,
        path_pattern: &str,
        filter: PathFilter,
        case_fold: bool,
    ) -> Result<Self, IoError> {
        Ok(Self {
            root: normalize_root(root),
            path_pattern: compile(path_pattern, case_fold)?,
            filter,
            follow_symlinks: true,
        })
    }

    /// Toggle symlink following. Followed links are checked against their
    /// ancestors, so a link cycle surfaces as an [`IoError::Walk`] item
    /// instead of an endless walk.
    #[must_use]
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// The normalized root (always ends with a separator).
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a file path passes the path pattern.
    #[must_use]
    pub fn matches_path(&self, path: &Path) -> bool {
        self.path_pattern.is_match(&path.to_string_lossy())
    }

    /// Lazily yield matching file paths in walk order.
    ///
    /// Unreadable directories and symlink loops are yielded as errors so the
    /// caller decides whether to skip them or stop.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, IoError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                let pruned = entry.depth() > 0
                    && entry.file_type().is_dir()
                    && self.filter.should_ignore(entry.path());
                if pruned {
                    tracing::debug!(dir = %entry.path().display(), "directory ignored");
                }
                !pruned
            })
            .filter_map(move |result| match result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        return None;
                    }
                    let path = entry.into_path();
                    self.matches_path(&path).then_some(Ok(path))
                }
                Err(err) => Some(Err(IoError::Walk(err))),
            })
    }
}
