//! Tab autocomplete for command names.
//!
//! Only the first word of the input is completed, against a fixed list of
//! common commands. The front ends apply a completion only when exactly one
//! command matches; ghost text hints show the first candidate while typing.

use crate::config::COMPLETION_COMMANDS;

// ============================================================================
// Public Types
// ============================================================================

/// Result of an autocomplete attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum AutocompleteResult {
    /// Single match - complete with this value.
    Single(String),
    /// Multiple matches - (common_prefix, all_matches).
    Multiple(String, Vec<String>),
    /// No matches found.
    None,
}

// ============================================================================
// Public API
// ============================================================================

/// Perform autocomplete on Tab press.
///
/// Matching is a case-insensitive prefix test. Input that already contains
/// arguments is not completed.
pub fn autocomplete(input: &str) -> AutocompleteResult {
    let Some(partial) = command_prefix(input) else {
        return AutocompleteResult::None;
    };

    let matches = matching_commands(&partial);
    match matches.len() {
        0 => AutocompleteResult::None,
        1 => AutocompleteResult::Single(matches[0].clone()),
        _ => {
            let common = find_common_prefix(&matches);
            AutocompleteResult::Multiple(common, matches)
        }
    }
}

/// Get autocomplete suggestion for ghost text hint (while typing).
///
/// Returns the suffix that would complete the current input.
pub fn get_hint(input: &str) -> Option<String> {
    let partial = command_prefix(input)?;
    matching_commands(&partial)
        .into_iter()
        .find(|cmd| cmd.len() > partial.len())
        .map(|cmd| cmd[partial.len()..].to_string())
}

// ============================================================================
// Helpers
// ============================================================================

/// Lowercased first word, if the input is a single non-empty word.
fn command_prefix(input: &str) -> Option<String> {
    let input = input.trim_start();
    if input.is_empty() || input.contains(char::is_whitespace) {
        return None;
    }
    Some(input.to_lowercase())
}

fn matching_commands(partial: &str) -> Vec<String> {
    COMPLETION_COMMANDS
        .iter()
        .filter(|cmd| cmd.starts_with(partial))
        .map(|s| s.to_string())
        .collect()
}

/// Longest shared prefix of all candidates (ASCII command names).
fn find_common_prefix(strings: &[String]) -> String {
    let Some(first) = strings.first() else {
        return String::new();
    };

    let len = strings[1..].iter().fold(first.len(), |len, s| {
        first
            .bytes()
            .zip(s.bytes())
            .take(len)
            .take_while(|(a, b)| a == b)
            .count()
    });
    first[..len].to_string()
}

// ============================================================================
// Tests
// ============================================================================
