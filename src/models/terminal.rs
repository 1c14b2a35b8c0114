//! Terminal-related data types for command blocks and output rendering.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use crate::config::BLOCK_ID_PREFIX;

// Global counter for generating unique block IDs
static BLOCK_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Unique identifier of a [`CommandBlock`], rendered as `blk-<n>`.
///
/// IDs increase in allocation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct BlockId(usize);

impl BlockId {
    /// Allocate a fresh ID.
    pub fn next() -> Self {
        Self(BLOCK_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", BLOCK_ID_PREFIX, self.0)
    }
}

impl From<BlockId> for String {
    fn from(id: BlockId) -> Self {
        id.to_string()
    }
}

/// One rendered unit pairing a submitted command line with its output.
///
/// A block is terminal once `streaming` is false: its output and duration
/// never change again. While streaming, only `partial` grows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommandBlock {
    pub id: BlockId,
    /// Working directory at the time the command was submitted
    pub cwd: String,
    pub command: String,
    pub output: Vec<String>,
    pub duration_ms: Option<f64>,
    pub streaming: bool,
    /// Text revealed so far by the streaming simulator
    pub partial: Option<String>,
}

impl CommandBlock {
    /// A finished block.
    pub fn completed(
        cwd: impl Into<String>,
        command: impl Into<String>,
        output: Vec<String>,
        duration_ms: f64,
    ) -> Self {
        Self {
            id: BlockId::next(),
            cwd: cwd.into(),
            command: command.into(),
            output,
            duration_ms: Some(duration_ms),
            streaming: false,
            partial: None,
        }
    }

    /// An open block waiting for streamed output.
    pub fn streaming(cwd: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: BlockId::next(),
            cwd: cwd.into(),
            command: command.into(),
            output: Vec::new(),
            duration_ms: None,
            streaming: true,
            partial: Some(String::new()),
        }
    }

    /// Text for the "Copy Output" action.
    pub fn output_text(&self) -> String {
        if self.streaming {
            self.partial.clone().unwrap_or_default()
        } else {
            self.output.join("\n")
        }
    }
}

// =============================================================================
// Line Styling
// =============================================================================

/// Display tone of a transcript line, chosen from its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    /// `modified:` entries (red)
    Modified,
    /// `deleted:` entries (dark red)
    Deleted,
    /// `added:` entries (green)
    Added,
    /// Indented markdown paths (blue)
    Markdown,
    /// Indented TypeScript paths (cyan)
    Script,
    /// Indented image paths (purple)
    Asset,
    /// `commit <hash>` lines (yellow)
    Commit,
    /// Lines naming the branch (green)
    Branch,
    /// Section headers such as `Untracked files:` (yellow)
    Section,
    /// `(use "git ...")` hints (gray)
    Hint,
    /// Author/date metadata (gray)
    Meta,
}

impl LineStyle {
    /// Pick a style for one output line.
    pub fn classify(line: &str) -> Self {
        let indented = line.starts_with("    ");

        if line.starts_with("    modified:") {
            Self::Modified
        } else if line.starts_with("    deleted:") {
            Self::Deleted
        } else if line.starts_with("    added:") {
            Self::Added
        } else if indented && line.contains(".md") {
            Self::Markdown
        } else if indented && line.contains(".ts") {
            Self::Script
        } else if indented && (line.contains(".svg") || line.contains(".webp")) {
            Self::Asset
        } else if is_commit_header(line) {
            Self::Commit
        } else if line.contains("Changes not staged") || line.contains("Untracked files") {
            Self::Section
        } else if line.starts_with("  (use \"git") {
            Self::Hint
        } else if line.starts_with("Author:") || line.starts_with("Date:") {
            Self::Meta
        } else if line.contains("branch") || line.contains("main") {
            Self::Branch
        } else {
            Self::Plain
        }
    }

    /// Whether the line is rendered with emphasis.
    pub fn is_emphasized(self) -> bool {
        !matches!(self, Self::Plain)
    }
}

/// `commit <hex>` with at least seven hex digits.
fn is_commit_header(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("commit ") else {
        return false;
    };
    let hash = rest.split(' ').next().unwrap_or("");
    hash.len() >= 7 && hash.chars().all(|c| c.is_ascii_hexdigit())
}
