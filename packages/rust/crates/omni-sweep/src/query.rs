//! Query values and their compilation into matchers.

use memchr::memmem::Finder;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::SweepError;
use crate::matcher::Matcher;

/// How a query pattern is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Exact substring.
    Literal,
    /// Regular expression with capture groups.
    Regex,
}

/// What to look for. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Literal text or regex source.
    pub pattern: String,
    /// Interpretation of `pattern`.
    pub kind: QueryKind,
    /// Ignore letter case when comparing.
    pub case_fold: bool,
}

impl Query {
    /// Case-sensitive literal query.
    #[must_use]
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: QueryKind::Literal,
            case_fold: false,
        }
    }

    /// Case-sensitive regex query.
    #[must_use]
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: QueryKind::Regex,
            case_fold: false,
        }
    }

    /// Set the case-fold flag.
    #[must_use]
    pub fn case_fold(mut self, case_fold: bool) -> Self {
        self.case_fold = case_fold;
        self
    }

    /// Whether this is a regex query.
    #[must_use]
    pub fn is_regex(&self) -> bool {
        self.kind == QueryKind::Regex
    }

    /// Compile into a [`Matcher`].
    ///
    /// Regex queries use multi-line anchors: `^` and `$` match at line
    /// boundaries; `.` does not cross newlines unless the pattern sets `(?s)`.
    ///
    /// # Errors
    /// `SweepError::InvalidPattern` for a regex that does not compile. Literal
    /// queries always compile.
    pub fn compile(&self) -> Result<Matcher, SweepError> {
        match self.kind {
            QueryKind::Regex => {
                let regex = build_regex(&self.pattern, self.case_fold)?;
                Ok(Matcher::Regex(regex))
            }
            QueryKind::Literal if self.pattern.is_empty() => Ok(Matcher::Empty),
            QueryKind::Literal if self.case_fold => {
                let regex = build_regex(&regex::escape(&self.pattern), true)?;
                Ok(Matcher::FoldedLiteral(regex))
            }
            QueryKind::Literal => Ok(Matcher::Literal(
                Finder::new(self.pattern.as_bytes()).into_owned(),
            )),
        }
    }

    /// Short human-readable label, e.g. `literal, case-fold`.
    #[must_use]
    pub fn describe(&self) -> String {
        let kind = match self.kind {
            QueryKind::Literal => "literal",
            QueryKind::Regex => "regex",
        };
        let case = if self.case_fold {
            "case-fold"
        } else {
            "case-sensitive"
        };
        format!("{kind}, {case}")
    }
}

fn build_regex(pattern: &str, case_fold: bool) -> Result<Regex, SweepError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_fold)
        .multi_line(true)
        .build()
        .map_err(|source| SweepError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}
