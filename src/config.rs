//! Application configuration.
//!
//! Centralizes the constants and scripted content used throughout the terminal.
//! Text assets are loaded at compile time using `include_str!`; runtime knobs
//! live in [`TerminalConfig`], which can be read from TOML.

use serde::Deserialize;

use crate::core::error::ConfigError;

// =============================================================================
// Text Assets (loaded at compile time)
// =============================================================================

/// Help text for `help` command.
pub const HELP_TEXT: &str = include_str!("../assets/text/help.txt");

/// Scripted filesystem manifest (TOML).
pub const FS_MANIFEST: &str = include_str!("../assets/fs.toml");

/// Scripted git transcripts.
pub mod git_text {
    pub const STATUS: &str = include_str!("../assets/text/git_status.txt");
    /// Contains `{today}`, `{yesterday}` and `{two_days_ago}` placeholders.
    pub const LOG: &str = include_str!("../assets/text/git_log.txt");
    pub const DIFF: &str = include_str!("../assets/text/git_diff.txt");
}

/// Scripted npm transcripts for the synchronous variants.
pub mod npm_text {
    pub const LIST: &str = include_str!("../assets/text/npm_list.txt");
    pub const INSTALL: &str = include_str!("../assets/text/npm_install.txt");
    pub const START: &str = include_str!("../assets/text/npm_start.txt");
    pub const TEST: &str = include_str!("../assets/text/npm_test.txt");
}

/// Process table for `ps`. Contains a `{user}` placeholder.
pub const PS_TEXT: &str = include_str!("../assets/text/ps.txt");

/// Scripts revealed line by line by the streaming simulator.
pub mod stream_text {
    pub const NPM_INSTALL: &str = include_str!("../assets/text/stream_npm_install.txt");
    pub const NPM_START: &str = include_str!("../assets/text/stream_npm_start.txt");
    pub const NPM_TEST: &str = include_str!("../assets/text/stream_npm_test.txt");
    /// Contains `{url}` and `{date}` placeholders.
    pub const CURL_EXAMPLE: &str = include_str!("../assets/text/stream_curl.txt");
}

// =============================================================================
// Application Metadata
// =============================================================================

/// Window title shown above the terminal.
pub const APP_NAME: &str = "Warp";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placeholder shown in the empty input line.
pub const INPUT_PLACEHOLDER: &str =
    "Type a command (try: ls, cd app, pwd, help) • ↑↓ for history • Tab for completion";

// =============================================================================
// Terminal Configuration
// =============================================================================

/// Commands offered by Tab completion.
pub const COMPLETION_COMMANDS: &[&str] = &["ls", "cd", "pwd", "cat", "git", "npm", "curl", "help"];

/// Pattern in a `curl` argument that turns it into a streaming command.
pub const CURL_STREAM_HOST: &str = "example.com";

/// Default number of lines for `head` and `tail`.
pub const DEFAULT_HEAD_TAIL_LINES: usize = 10;

/// Directory scanned by `which`.
pub const BIN_DIR: &str = "/usr/bin";

/// Block id prefix, matching the DOM `data-block-id` attribute.
pub const BLOCK_ID_PREFIX: &str = "blk-";

/// Runtime settings for one terminal session.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerminalConfig {
    /// Login name reported by `whoami` and `ls -l`.
    pub user: String,
    /// Host name reported by `uname -a`.
    pub hostname: String,
    /// Branch shown in the prompt header.
    pub branch: String,
    /// Working directory of a freshly opened window.
    pub initial_cwd: String,
    /// Reveal scripted output incrementally instead of all at once.
    pub streaming: bool,
    /// Delay between two revealed lines, in milliseconds.
    pub stream_interval_ms: u32,
    /// Maximum number of blocks kept on screen.
    pub max_blocks: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            user: "kyle".to_string(),
            hostname: "warp-terminal".to_string(),
            branch: "main".to_string(),
            initial_cwd: "/home/kyle/warp".to_string(),
            streaming: true,
            stream_interval_ms: 100,
            max_blocks: 1000,
        }
    }
}

impl TerminalConfig {
    /// Parse a config from TOML. Missing keys fall back to defaults.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        if config.max_blocks == 0 {
            return Err(ConfigError::ZeroBlockCapacity);
        }
        Ok(config)
    }
}
