//! Match engine: ordered, non-overlapping spans over a whole-file snapshot.
//!
//! Content is treated as one unstructured span of characters; nothing here
//! is line-oriented. Every variant follows leftmost-first semantics and the
//! next search starts at the end of the previous match.

use std::path::Path;

use memchr::memmem::Finder;
use regex::Regex;

use crate::context::{LineTracker, context_after, context_before};
use crate::types::{ContextWindow, MatchSpan, Occurrence};

/// A compiled [`Query`](crate::Query).
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Case-sensitive literal, searched with `memmem`.
    Literal(Finder<'static>),
    /// Case-folded literal, compiled as an escaped case-insensitive regex.
    FoldedLiteral(Regex),
    /// User regex.
    Regex(Regex),
    /// Empty literal; never matches.
    Empty,
}

impl Matcher {
    /// All matches in `content`, left to right.
    #[must_use]
    pub fn find_all(&self, content: &str) -> Vec<MatchSpan> {
        match self {
            Self::Literal(finder) => {
                let needle = finder.needle().len();
                let bytes = content.as_bytes();
                let mut spans = Vec::new();
                let mut from = 0;
                while let Some(pos) = finder.find(&bytes[from..]) {
                    let start = from + pos;
                    spans.push(MatchSpan::new(start, start + needle));
                    from = start + needle;
                }
                spans
            }
            Self::FoldedLiteral(regex) | Self::Regex(regex) => regex
                .find_iter(content)
                .map(|m| MatchSpan::new(m.start(), m.end()))
                .collect(),
            Self::Empty => Vec::new(),
        }
    }

    /// The user regex, when this matcher came from a regex query.
    ///
    /// Case-folded literals also run on a regex internally but are not
    /// returned here: their replacement text is never template-expanded.
    #[must_use]
    pub fn user_regex(&self) -> Option<&Regex> {
        match self {
            Self::Regex(regex) => Some(regex),
            _ => None,
        }
    }
}

/// Scan one file snapshot and build an occurrence per match.
#[must_use]
pub fn search_content(
    path: &Path,
    content: &str,
    matcher: &Matcher,
    window: ContextWindow,
) -> Vec<Occurrence> {
    let mut lines = LineTracker::new();
    matcher
        .find_all(content)
        .into_iter()
        .map(|span| Occurrence {
            path: path.to_path_buf(),
            span,
            location: lines.locate(content, span.start),
            context_before: context_before(content, span.start, window.before).to_string(),
            matched_text: span.slice(content).to_string(),
            context_after: context_after(content, span.end, window.after).to_string(),
            replacement: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;

    fn spans(query: &Query, content: &str) -> Vec<(usize, usize)> {
        query
            .compile()
            .expect("Should compile")
            .find_all(content)
            .into_iter()
            .map(|s| (s.start, s.end))
            .collect()
    }

    #[test]
    fn test_repeated_literal() {
        assert_eq!(
            spans(&Query::literal("abc"), "abcabcabc"),
            vec![(0, 3), (3, 6), (6, 9)]
        );
    }

    #[test]
    fn test_overlapping_literal_not_double_counted() {
        assert_eq!(spans(&Query::literal("aa"), "aaa"), vec![(0, 2)]);
        assert_eq!(spans(&Query::literal("aa"), "aaaa"), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn test_case_fold_literal() {
        let query = Query::literal("foo").case_fold(true);
        assert_eq!(spans(&query, "Foo fOO foo"), vec![(0, 3), (4, 7), (8, 11)]);
        assert_eq!(spans(&Query::literal("foo"), "Foo fOO foo"), vec![(8, 11)]);
    }

    #[test]
    fn test_case_fold_literal_escapes_metachars() {
        let query = Query::literal("a.B").case_fold(true);
        assert_eq!(spans(&query, "axb A.b"), vec![(4, 7)]);
    }

    #[test]
    fn test_regex_leftmost_first() {
        assert_eq!(spans(&Query::regex("a|ab"), "ab"), vec![(0, 1)]);
        assert_eq!(spans(&Query::regex(r"\d+"), "a12b345"), vec![(1, 3), (4, 7)]);
    }

    #[test]
    fn test_regex_spans_multiple_lines() {
        let content = "begin\n  body\nend";
        assert_eq!(spans(&Query::regex(r"(?s)begin.*end"), content), vec![(0, 16)]);
        assert_eq!(spans(&Query::regex("^end$"), content), vec![(13, 16)]);
    }

    #[test]
    fn test_empty_literal_never_matches() {
        assert!(spans(&Query::literal(""), "anything").is_empty());
    }

    #[test]
    fn test_search_content_context_and_location() {
        let matcher = Query::literal("needle").compile().expect("Should compile");
        let content = "needle at start\nthen a needle";
        let window = ContextWindow {
            before: 4,
            after: 3,
        };
        let found = search_content(Path::new("f.txt"), content, &matcher, window);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].context_before, "");
        assert_eq!(found[0].context_after, " at");
        assert_eq!((found[0].location.line, found[0].location.column), (1, 1));
        assert_eq!(found[1].context_before, "n a ");
        assert_eq!(found[1].context_after, "");
        assert_eq!((found[1].location.line, found[1].location.column), (2, 8));
    }
}
