//! Core types for the sweep pipeline.
//!
//! Spans and locations are byte offsets into one file's in-memory snapshot;
//! they are never valid against any other version of the file.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` into a content snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchSpan {
    /// First byte of the match.
    pub start: usize,
    /// One past the last byte of the match.
    pub end: usize,
}

impl MatchSpan {
    /// Create a span. `end` must not precede `start`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end >= start, "span end {end} before start {start}");
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for zero-width matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The text this span covers in `content`.
    #[must_use]
    pub fn slice<'a>(&self, content: &'a str) -> &'a str {
        &content[self.start..self.end]
    }
}

/// Position of a span start, for jumping to it in an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Byte offset.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column in characters (1-indexed).
    pub column: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// How much surrounding text each occurrence carries and shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextLevel {
    /// Context before and after every match.
    #[default]
    Full,
    /// Matched text only.
    MatchOnly,
    /// Counts only; occurrences are recorded but not rendered.
    None,
}

impl ContextLevel {
    /// Stable name used in reports and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::MatchOnly => "match-only",
            Self::None => "none",
        }
    }

    /// The context window this level implies, given the configured lengths.
    #[must_use]
    pub fn window(self, before: usize, after: usize) -> ContextWindow {
        match self {
            Self::Full => ContextWindow { before, after },
            Self::MatchOnly | Self::None => ContextWindow::default(),
        }
    }
}

impl FromStr for ContextLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "full-context" => Ok(Self::Full),
            "match-only" | "match" => Ok(Self::MatchOnly),
            "none" | "count" => Ok(Self::None),
            other => Err(format!("unknown context level: {other}")),
        }
    }
}

/// Number of characters of context taken on each side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextWindow {
    /// Characters before the match.
    pub before: usize,
    /// Characters after the match.
    pub after: usize,
}

/// Text inserted in place of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// Inserted text after template expansion and case handling.
    pub text: String,
    /// Span of the inserted text in the new content.
    pub span: MatchSpan,
    /// Where the inserted text starts in the new content.
    pub location: Location,
}

/// One reported match: the atomic reporting unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// File the match was found in.
    pub path: PathBuf,
    /// Match span in the snapshot that was scanned.
    pub span: MatchSpan,
    /// Where the match starts in that snapshot.
    pub location: Location,
    /// Up to `before` characters preceding the match.
    pub context_before: String,
    /// The matched text.
    pub matched_text: String,
    /// Up to `after` characters following the match.
    pub context_after: String,
    /// Present for replace operations.
    pub replacement: Option<Replacement>,
}
