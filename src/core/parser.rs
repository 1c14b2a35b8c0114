//! Command line parsing.
//!
//! Lines are split on whitespace only: there is no quoting, variable
//! expansion, or piping. The one piece of shell syntax understood here is
//! history recall:
//! - `!!` - the last command
//! - `!n` or `! n` - the nth command (1-indexed)

// =============================================================================
// Parsed Command
// =============================================================================

/// A command line split into its name and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Split a line on runs of whitespace. Returns `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace().map(str::to_string);
        let name = words.next()?;
        Some(Self {
            name,
            args: words.collect(),
        })
    }
}

// =============================================================================
// History Events
// =============================================================================

/// A reference to an earlier command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// `!!`
    Last,
    /// `!n` / `! n`, holding the text after `!` as typed
    Index(String),
}

impl HistoryEvent {
    /// Recognize a history event at the start of a line.
    ///
    /// Anything after the event designator is ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let first = words.next()?;

        if first == "!!" {
            return Some(Self::Last);
        }
        if first == "!" {
            return Some(Self::Index(words.next().unwrap_or("").to_string()));
        }
        first
            .strip_prefix('!')
            .map(|rest| Self::Index(rest.to_string()))
    }

    /// Look the event up in `history`.
    ///
    /// On failure, returns the error line shown to the user.
    pub fn resolve(&self, history: &[String]) -> Result<String, String> {
        match self {
            Self::Last => history
                .last()
                .cloned()
                .ok_or_else(|| "!!: event not found".to_string()),
            Self::Index(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=history.len()).contains(n))
                .map(|n| history[n - 1].clone())
                .ok_or_else(|| format!("!: {}: event not found", raw)),
        }
    }
}
