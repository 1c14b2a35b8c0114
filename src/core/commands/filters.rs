//! Text filters (head, tail, grep, wc).
//!
//! These operate on file content from the scripted filesystem. Content is
//! split on `\n`, so joining the resulting lines with `\n` restores it.

use std::fmt;

use crate::config::DEFAULT_HEAD_TAIL_LINES;

/// Split file content into lines. Empty content has no lines.
pub fn content_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(str::to_string).collect()
}

/// Take first n lines.
pub fn head(text: &str, n: usize) -> Vec<String> {
    content_lines(text).into_iter().take(n).collect()
}

/// Take last n lines.
pub fn tail(text: &str, n: usize) -> Vec<String> {
    let lines = content_lines(text);
    let skip = lines.len().saturating_sub(n);
    lines.into_iter().skip(skip).collect()
}

/// Lines containing `pattern` (literal, case-sensitive).
pub fn grep(text: &str, pattern: &str) -> Vec<String> {
    content_lines(text)
        .into_iter()
        .filter(|line| line.contains(pattern))
        .collect()
}

/// Line, word and character counts of a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordCount {
    pub lines: usize,
    pub words: usize,
    pub chars: usize,
}

impl WordCount {
    pub fn of(text: &str) -> Self {
        Self {
            lines: content_lines(text).len(),
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
        }
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>6} {:>6} {:>6}", self.lines, self.words, self.chars)
    }
}

/// Parse a count argument like "5", "-5" or "-n5".
///
/// Zero or anything unparsable falls back to the default of 10.
pub fn parse_count(arg: &str) -> usize {
    try_parse_count(arg).unwrap_or(DEFAULT_HEAD_TAIL_LINES)
}

/// Like [`parse_count`], but `None` when `arg` is not a count at all.
pub fn try_parse_count(arg: &str) -> Option<usize> {
    let digits = arg
        .strip_prefix("-n")
        .or_else(|| arg.strip_prefix('-'))
        .unwrap_or(arg);
    digits.parse().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRUIT: &str = "apple\nbanana\ncherry\ndate\nelderberry";

    #[test]
    fn test_content_lines_round_trip() {
        let lines = content_lines("a\n\nb\n");
        assert_eq!(lines, vec!["a", "", "b", ""]);
        assert_eq!(lines.join("\n"), "a\n\nb\n");
        assert!(content_lines("").is_empty());
    }

    #[test]
    fn test_head() {
        assert_eq!(head(FRUIT, 2), vec!["apple", "banana"]);
        assert_eq!(head(FRUIT, 10).len(), 5);
    }

    #[test]
    fn test_tail() {
        assert_eq!(tail(FRUIT, 2), vec!["date", "elderberry"]);
        assert_eq!(tail(FRUIT, 10).len(), 5);
    }

    #[test]
    fn test_grep_case_sensitive() {
        assert_eq!(grep(FRUIT, "an"), vec!["banana"]);
        assert!(grep(FRUIT, "APPLE").is_empty());
        assert_eq!(grep(FRUIT, "e").len(), 4);
    }

    #[test]
    fn test_word_count() {
        let wc = WordCount::of("hello world\nbye");
        assert_eq!(
            wc,
            WordCount {
                lines: 2,
                words: 3,
                chars: 15
            }
        );
        assert_eq!(wc.to_string(), "     2      3     15");
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("5"), 5);
        assert_eq!(parse_count("-5"), 5);
        assert_eq!(parse_count("-n5"), 5);
        assert_eq!(parse_count("0"), 10);
        assert_eq!(parse_count("abc"), 10);
        assert_eq!(try_parse_count("README.md"), None);
    }
}
