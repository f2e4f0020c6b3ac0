//! Natural ("human") ordering of test names
//!
//! A name is split into alternating text and digit runs; digit runs compare
//! as integers of arbitrary length, text runs compare by code point.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Failed to compile digit pattern"));

/// One run of a natural sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NaturalChunk {
    Text(String),
    /// Digits with leading zeros stripped
    Number(String),
}

impl Ord for NaturalChunk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // Keys always alternate text/number from a leading text run, so
            // mixed pairs only show up for hand-built keys.
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for NaturalChunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the sort key of `name`: `text, number, text, ..., text`
pub fn natural_key(name: &str) -> Vec<NaturalChunk> {
    let mut key = Vec::new();
    let mut last = 0;

    for run in DIGIT_RUN.find_iter(name) {
        key.push(NaturalChunk::Text(name[last..run.start()].to_string()));
        let digits = run.as_str().trim_start_matches('0');
        key.push(NaturalChunk::Number(digits.to_string()));
        last = run.end();
    }
    key.push(NaturalChunk::Text(name[last..].to_string()));

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        names.sort_by_cached_key(|n| natural_key(n));
        names
    }

    #[test]
    fn test_numbers_compare_as_integers() {
        assert_eq!(sorted(&["t2", "t10", "t1"]), vec!["t1", "t2", "t10"]);
    }

    #[test]
    fn test_mixed_runs() {
        assert_eq!(
            sorted(&["b1", "a10b2", "a2b10", "a2b9", "a"]),
            vec!["a", "a2b9", "a2b10", "a10b2", "b1"]
        );
    }

    #[test]
    fn test_leading_zeros_and_huge_numbers() {
        assert_eq!(natural_key("007"), natural_key("7"));
        assert_eq!(
            sorted(&["99999999999999999999999999", "100000000000000000000000000", "5"]),
            vec![
                "5",
                "99999999999999999999999999",
                "100000000000000000000000000"
            ]
        );
    }

    #[test]
    fn test_key_shape() {
        assert_eq!(
            natural_key("t12x"),
            vec![
                NaturalChunk::Text("t".to_string()),
                NaturalChunk::Number("12".to_string()),
                NaturalChunk::Text("x".to_string()),
            ]
        );
    }
}
