//! Count filter: keep files whose match count satisfies a comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::SweepError;

/// Comparison operator applied as `count <op> threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `<`
    Less,
    /// `<=` / `≤`
    LessOrEqual,
    /// `=` / `==`
    Equal,
    /// `!=` / `≠` / `/=`
    NotEqual,
    /// `>=` / `≥`
    GreaterOrEqual,
    /// `>`
    Greater,
}

impl Comparison {
    /// Canonical ASCII symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
        }
    }

    /// Evaluate `left <op> right`.
    #[must_use]
    pub fn holds(self, left: usize, right: usize) -> bool {
        match self {
            Self::Less => left < right,
            Self::LessOrEqual => left <= right,
            Self::Equal => left == right,
            Self::NotEqual => left != right,
            Self::GreaterOrEqual => left >= right,
            Self::Greater => left > right,
        }
    }
}

impl FromStr for Comparison {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<" => Ok(Self::Less),
            "<=" | "≤" => Ok(Self::LessOrEqual),
            "=" | "==" => Ok(Self::Equal),
            "!=" | "≠" | "/=" => Ok(Self::NotEqual),
            ">=" | "≥" => Ok(Self::GreaterOrEqual),
            ">" => Ok(Self::Greater),
            other => Err(SweepError::InvalidCountExpression(format!(
                "unknown operator '{other}'"
            ))),
        }
    }
}

/// `count <op> threshold` predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountFilter {
    /// Operator.
    pub comparison: Comparison,
    /// Right-hand side.
    pub threshold: usize,
}

impl CountFilter {
    /// Build a filter from a typed operator and threshold.
    #[must_use]
    pub fn new(comparison: Comparison, threshold: usize) -> Self {
        Self {
            comparison,
            threshold,
        }
    }

    /// Build a filter from separate operator and threshold strings.
    ///
    /// # Errors
    /// `SweepError::InvalidCountExpression` for an unknown operator or a
    /// threshold that is not a non-negative integer.
    pub fn parse_parts(operator: &str, threshold: &str) -> Result<Self, SweepError> {
        let comparison = operator.parse()?;
        let threshold = threshold.trim().parse::<usize>().map_err(|_| {
            SweepError::InvalidCountExpression(format!(
                "threshold '{}' is not a non-negative integer",
                threshold.trim()
            ))
        })?;
        Ok(Self::new(comparison, threshold))
    }

    /// Whether `count` satisfies the filter.
    #[must_use]
    pub fn matches(&self, count: usize) -> bool {
        self.comparison.holds(count, self.threshold)
    }
}

impl FromStr for CountFilter {
    type Err = SweepError;

    /// Parse a compact expression such as `=2`, `>= 3` or `≠0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit() || c == '-' || c == '+')
            .ok_or_else(|| SweepError::InvalidCountExpression(format!("missing threshold in '{s}'")))?;
        let (operator, threshold) = s.split_at(split);
        Self::parse_parts(operator, threshold)
    }
}

impl fmt::Display for CountFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.comparison.symbol(), self.threshold)
    }
}

impl Serialize for CountFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact() {
        let filter: CountFilter = ">= 3".parse().expect("Should parse");
        assert_eq!(filter, CountFilter::new(Comparison::GreaterOrEqual, 3));
        let filter: CountFilter = "≠0".parse().expect("Should parse");
        assert_eq!(filter.comparison, Comparison::NotEqual);
    }

    #[test]
    fn test_every_operator() {
        let cases = [
            ("<", 3, true),
            ("<", 2, false),
            ("<=", 2, true),
            ("<=", 1, false),
            ("=", 2, true),
            ("=", 3, false),
            ("!=", 3, true),
            ("!=", 2, false),
            (">=", 2, true),
            (">=", 3, false),
            (">", 1, true),
            (">", 2, false),
        ];
        for (op, threshold, expected) in cases {
            let filter = CountFilter::parse_parts(op, &threshold.to_string()).expect("Parse");
            assert_eq!(filter.matches(2), expected, "2 {op} {threshold}");
        }
    }

    #[test]
    fn test_invalid_expressions() {
        assert!(matches!(
            CountFilter::parse_parts("~", "2"),
            Err(SweepError::InvalidCountExpression(_))
        ));
        assert!(matches!(
            CountFilter::parse_parts("=", "-1"),
            Err(SweepError::InvalidCountExpression(_))
        ));
        assert!(matches!(
            "=".parse::<CountFilter>(),
            Err(SweepError::InvalidCountExpression(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(CountFilter::new(Comparison::LessOrEqual, 4).to_string(), "<= 4");
    }
}
