//! Replace engine: one forward pass per file.
//!
//! Matches are found against the immutable snapshot, then substituted left
//! to right while the new content is built. Each replacement's position in
//! the new content is the snapshot position plus the running length delta
//! of all earlier substitutions, so no match is skipped or rematched when
//! replacements are longer or shorter than what they replace.

use std::path::Path;

use crate::capture::{expand_captures, preserve_case};
use crate::context::{LineTracker, context_after, context_before};
use crate::matcher::Matcher;
use crate::types::{ContextWindow, MatchSpan, Occurrence, Replacement};

/// New content plus one occurrence per substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    /// Content after every substitution.
    pub content: String,
    /// Occurrences in substitution order.
    pub occurrences: Vec<Occurrence>,
}

impl Replaced {
    /// Number of substitutions made.
    #[must_use]
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }
}

/// Substitutes every match of a compiled query in a content snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ReplaceEngine<'a> {
    matcher: &'a Matcher,
    replacement: &'a str,
    preserve_case: bool,
    window: ContextWindow,
}

impl<'a> ReplaceEngine<'a> {
    /// `replacement` is a capture template for regex queries and verbatim
    /// text for literal queries.
    #[must_use]
    pub fn new(matcher: &'a Matcher, replacement: &'a str) -> Self {
        Self {
            matcher,
            replacement,
            preserve_case: false,
            window: ContextWindow::default(),
        }
    }

    /// Mirror the case of each match in its replacement (literal queries only).
    #[must_use]
    pub fn preserve_case(mut self, preserve: bool) -> Self {
        self.preserve_case = preserve;
        self
    }

    /// Context captured around each occurrence.
    #[must_use]
    pub fn window(mut self, window: ContextWindow) -> Self {
        self.window = window;
        self
    }

    fn planned(&self, content: &str) -> Vec<(MatchSpan, String)> {
        if let Some(regex) = self.matcher.user_regex() {
            let mut planned = Vec::new();
            for caps in regex.captures_iter(content) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                let text = expand_captures(self.replacement, &caps);
                planned.push((MatchSpan::new(whole.start(), whole.end()), text));
            }
            return planned;
        }
        self.matcher
            .find_all(content)
            .into_iter()
            .map(|span| {
                let text = if self.preserve_case {
                    preserve_case(span.slice(content), self.replacement)
                } else {
                    self.replacement.to_string()
                };
                (span, text)
            })
            .collect()
    }

    /// Replace every match in `content`.
    ///
    /// Context before an occurrence is read from the new content built so
    /// far, so it already shows earlier substitutions; context after is read
    /// from the untouched remainder of the snapshot.
    #[must_use]
    pub fn replace_all(&self, path: &Path, content: &str) -> Replaced {
        let planned = self.planned(content);
        if planned.is_empty() {
            return Replaced {
                content: content.to_string(),
                occurrences: Vec::new(),
            };
        }

        let mut out = String::with_capacity(content.len());
        let mut occurrences = Vec::with_capacity(planned.len());
        let mut old_lines = LineTracker::new();
        let mut new_lines = LineTracker::new();
        let mut cursor = 0;

        for (span, text) in planned {
            out.push_str(&content[cursor..span.start]);
            let context_before = context_before(&out, out.len(), self.window.before).to_string();

            let new_span = MatchSpan::new(out.len(), out.len() + text.len());
            let new_location = new_lines.locate(&out, new_span.start);
            out.push_str(&text);

            occurrences.push(Occurrence {
                path: path.to_path_buf(),
                span,
                location: old_lines.locate(content, span.start),
                context_before,
                matched_text: span.slice(content).to_string(),
                context_after: context_after(content, span.end, self.window.after).to_string(),
                replacement: Some(Replacement {
                    text,
                    span: new_span,
                    location: new_location,
                }),
            });
            cursor = span.end;
        }
        out.push_str(&content[cursor..]);

        Replaced {
            content: out,
            occurrences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;

    fn replace(query: &Query, content: &str, replacement: &str) -> Replaced {
        let matcher = query.compile().expect("Should compile");
        ReplaceEngine::new(&matcher, replacement).replace_all(Path::new("t.txt"), content)
    }

    #[test]
    fn test_longer_replacement_shifts_spans() {
        let result = replace(&Query::literal("foo"), "xfooyfooz", "barbaz");

        assert_eq!(result.content, "xbarbazybarbazz");
        assert_eq!(result.count(), 2);
        let new_spans: Vec<_> = result
            .occurrences
            .iter()
            .filter_map(|o| o.replacement.as_ref())
            .map(|r| (r.span.start, r.span.end))
            .collect();
        assert_eq!(new_spans, vec![(1, 7), (8, 14)]);
        for occ in &result.occurrences {
            let rep = occ.replacement.as_ref().expect("Replacement recorded");
            assert_eq!(rep.span.slice(&result.content), rep.text);
            assert_eq!(occ.span.slice("xfooyfooz"), "foo");
        }
    }

    #[test]
    fn test_shorter_replacement() {
        let result = replace(&Query::literal("long"), "long long long", "s");
        assert_eq!(result.content, "s s s");
        assert_eq!(result.count(), 3);
    }

    #[test]
    fn test_replacement_containing_query_not_rematched() {
        let result = replace(&Query::literal("a"), "aaa", "aa");
        assert_eq!(result.content, "aaaaaa");
        assert_eq!(result.count(), 3);
    }

    #[test]
    fn test_regex_capture_template() {
        let result = replace(&Query::regex(r"(\w+)@(\w+)"), "a@b, c@d", "$2@$1");
        assert_eq!(result.content, "b@a, d@c");
    }

    #[test]
    fn test_regex_empty_matches() {
        let result = replace(&Query::regex("x*"), "ab", "-");
        assert_eq!(result.content, "-a-b-");
    }

    #[test]
    fn test_preserve_case_literal_only() {
        let matcher = Query::literal("hello").case_fold(true).compile().expect("Compile");
        let result = ReplaceEngine::new(&matcher, "bye")
            .preserve_case(true)
            .replace_all(Path::new("t"), "hello Hello HELLO");
        assert_eq!(result.content, "bye Bye BYE");

        let regex = Query::regex("(?i)hello").compile().expect("Compile");
        let result = ReplaceEngine::new(&regex, "bye")
            .preserve_case(true)
            .replace_all(Path::new("t"), "Hello");
        assert_eq!(result.content, "bye");
    }

    #[test]
    fn test_literal_replacement_is_verbatim() {
        let result = replace(&Query::literal("x"), "x", r"$1 \n \\");
        assert_eq!(result.content, r"$1 \n \\");
    }

    #[test]
    fn test_context_reflects_earlier_substitutions() {
        let matcher = Query::literal("o").compile().expect("Compile");
        let result = ReplaceEngine::new(&matcher, "0")
            .window(ContextWindow {
                before: 3,
                after: 3,
            })
            .replace_all(Path::new("t"), "foo");

        assert_eq!(result.occurrences[0].context_before, "f");
        assert_eq!(result.occurrences[0].context_after, "o");
        assert_eq!(result.occurrences[1].context_before, "f0");
        assert_eq!(result.occurrences[1].context_after, "");
    }

    #[test]
    fn test_no_match_returns_original() {
        let result = replace(&Query::literal("zzz"), "abc", "y");
        assert_eq!(result.content, "abc");
        assert_eq!(result.count(), 0);
    }
}
