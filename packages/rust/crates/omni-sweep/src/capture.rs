//! Replacement text construction.
//!
//! Handles both regex capture expansion (`$1`, `${name}`, `$$`) and
//! case-preserving literal replacement.

use regex::Captures;

/// Expand a replacement template against one regex match.
#[must_use]
pub fn expand_captures(template: &str, caps: &Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    caps.expand(template, &mut out);
    out
}

/// Letter-case shape of a matched string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseShape {
    /// Two or more letters, none lower-case.
    Upper,
    /// Every word starts upper-case and continues lower-case.
    Capitalized,
    /// First letter upper-case, nothing else to say.
    InitialUpper,
    /// Anything else, including text without letters.
    Verbatim,
}

impl CaseShape {
    fn of(text: &str) -> Self {
        let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
        let Some(first) = letters.first() else {
            return Self::Verbatim;
        };
        if letters.len() > 1 && letters.iter().all(|c| !c.is_lowercase()) {
            return Self::Upper;
        }
        let capitalized = words(text).all(|word| {
            let mut chars = word.chars();
            chars.next().is_some_and(char::is_uppercase) && chars.all(|c| !c.is_uppercase())
        });
        if capitalized {
            Self::Capitalized
        } else if first.is_uppercase() {
            Self::InitialUpper
        } else {
            Self::Verbatim
        }
    }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().any(char::is_alphabetic))
}

fn upcase_initials(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

fn upcase_first_letter(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut done = false;
    for c in text.chars() {
        if !done && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            done = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Adapt `replacement` to the case pattern of `matched`.
///
/// - `FOO` → replacement upper-cased
/// - `Foo Bar` → initial of every replacement word upper-cased
/// - `FooBar` → first letter of the replacement upper-cased
/// - otherwise the replacement is used verbatim
#[must_use]
pub fn preserve_case(matched: &str, replacement: &str) -> String {
    match CaseShape::of(matched) {
        CaseShape::Upper => replacement.to_uppercase(),
        CaseShape::Capitalized => upcase_initials(replacement),
        CaseShape::InitialUpper => upcase_first_letter(replacement),
        CaseShape::Verbatim => replacement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_expand_numbered_and_named() {
        let re = Regex::new(r"(?P<key>\w+)=(\w+)").expect("Should compile");
        let caps = re.captures("port=80").expect("Should match");
        assert_eq!(expand_captures("${2}:$key", &caps), "80:port");
        assert_eq!(expand_captures("$$1", &caps), "$1");
    }

    #[test]
    fn test_expand_keeps_backslashes() {
        let re = Regex::new(r"(\w+)").expect("Should compile");
        let caps = re.captures("path").expect("Should match");
        assert_eq!(expand_captures(r"C:\dir\$1", &caps), r"C:\dir\path");
    }

    #[test]
    fn test_preserve_upper() {
        assert_eq!(preserve_case("FOO", "bar baz"), "BAR BAZ");
        assert_eq!(preserve_case("FOO_1", "bar"), "BAR");
    }

    #[test]
    fn test_preserve_capitalized() {
        assert_eq!(preserve_case("Foo", "bar"), "Bar");
        assert_eq!(preserve_case("Foo Bar", "new thing"), "New Thing");
        assert_eq!(preserve_case("F", "bar"), "Bar");
    }

    #[test]
    fn test_preserve_initial_upper() {
        assert_eq!(preserve_case("FooBar", "new thing"), "New thing");
    }

    #[test]
    fn test_preserve_verbatim() {
        assert_eq!(preserve_case("foo", "BaR"), "BaR");
        assert_eq!(preserve_case("fOO", "bar"), "bar");
        assert_eq!(preserve_case("123", "bar"), "bar");
    }
}
