#![allow(clippy::doc_markdown)]

//! omni-sweep - Span-oriented find/replace for Omni DevEnv
//!
//! Searches, replaces and counts across a directory tree, treating each
//! file as one unstructured span of characters rather than a list of lines.
//! Multi-line, Unicode-heavy and backslash-heavy text is matched and
//! replaced without any shell escaping.
//!
//! # Features
//!
//! - **Literal & Regex**: Leftmost-first, non-overlapping matching with case folding
//! - **Forward Replace**: One pass per file with offset tracking and capture templates
//! - **Safe Writes**: Preview by default, optional timestamped backups, whole-file rewrite
//! - **Navigable Reports**: Annotated text stream plus a byte-range navigation index
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-sweep/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # SweepError enum (thiserror)
//! ├── types.rs    # MatchSpan, Location, Occurrence, ContextLevel
//! ├── query.rs    # Query → Matcher compilation
//! ├── matcher.rs  # Match engine and occurrence scan
//! ├── context.rs  # Context windows, line tracking
//! ├── capture.rs  # Capture expansion, case preservation
//! ├── replace.rs  # ReplaceEngine forward pass
//! ├── count.rs    # Count comparison filter
//! ├── report.rs   # Report model
//! ├── render.rs   # Text stream + navigation index
//! ├── config.rs   # SweepConfig / YAML settings
//! └── sweeper.rs  # Operation orchestration
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_sweep::{Query, ReplaceRequest, ReportRenderer, SweepConfig, Sweeper};
//!
//! let report = Sweeper::new(SweepConfig::default()).replace(&ReplaceRequest {
//!     query: Query::literal("old_name"),
//!     replacement: "new_name".to_string(),
//!     root: "/project".into(),
//!     path_pattern: r"\.py$".to_string(),
//!     write: false,
//!     preserve_case: true,
//!     backup: true,
//! })?;
//! print!("{}", ReportRenderer::render_text(&report));
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod capture;
mod config;
mod context;
mod count;
mod error;
mod matcher;
mod query;
mod render;
mod replace;
mod report;
mod sweeper;
mod types;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use config::{
    DEFAULT_IGNORE_PATTERNS, PROJECT_SETTINGS_FILE, SweepConfig, SweepSettings,
    load_layered_settings, user_settings_path,
};
pub use count::{Comparison, CountFilter};
pub use error::SweepError;
pub use matcher::{Matcher, search_content};
pub use query::{Query, QueryKind};
pub use render::{NavEntry, NavKind, RenderedReport, ReportRenderer};
pub use replace::{ReplaceEngine, Replaced};
pub use report::{
    FailureStage, FileFailure, FileResult, Operation, Report, ReportBlock, ReportHeader, Summary,
};
pub use sweeper::{CountRequest, ReplaceRequest, SearchRequest, Sweeper};
pub use types::{ContextLevel, ContextWindow, Location, MatchSpan, Occurrence, Replacement};

// Marker glyphs for viewers parsing the rendered stream
pub use render::{
    FAILURE_MARKER, FILE_MARKER, FILE_SEPARATOR, MATCH_CLOSE, MATCH_MARKER, MATCH_OPEN,
    OCCURRENCE_SEPARATOR, REPLACEMENT_CLOSE, REPLACEMENT_MARKER, REPLACEMENT_OPEN,
};

// Context helpers for callers building their own occurrence views
pub use capture::preserve_case;
pub use context::{context_after, context_before};
