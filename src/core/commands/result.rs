//! Command execution result type.

/// Session change requested by a command.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Effect {
    #[default]
    None,
    /// Move to a new working directory (absolute, known to exist)
    ChangeDir(String),
    /// Remove every block from the screen
    ClearBlocks,
}

/// Result of executing a command.
///
/// Commands never fail: error messages are ordinary output lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Output lines to display
    pub output: Vec<String>,
    /// Change to apply to the session after the block is recorded
    pub effect: Effect,
}

impl CommandResult {
    /// Create a result with just output.
    pub fn output(lines: Vec<String>) -> Self {
        Self {
            output: lines,
            effect: Effect::None,
        }
    }

    /// Create a result with a single output line.
    pub fn line(line: impl Into<String>) -> Self {
        Self::output(vec![line.into()])
    }

    pub fn change_dir(path: impl Into<String>) -> Self {
        Self {
            output: Vec::new(),
            effect: Effect::ChangeDir(path.into()),
        }
    }

    pub fn clear() -> Self {
        Self {
            output: Vec::new(),
            effect: Effect::ClearBlocks,
        }
    }
}
