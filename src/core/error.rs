//! Error types for building a terminal.
//!
//! The interpreter itself never fails: bad input becomes output lines. Errors
//! only arise while loading the scripted filesystem or the configuration:
//!
//! - [`ManifestError`] - filesystem manifest parsing and validation
//! - [`ConfigError`] - terminal configuration parsing and validation

use thiserror::Error;

/// Errors raised while building a [`VirtualFs`](crate::core::VirtualFs).
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("directory key is not absolute: {0}")]
    RelativePath(String),

    #[error("directory {path} is not listed as a directory in {parent}")]
    Unreachable { path: String, parent: String },

    #[error("home directory {0} is not a directory key")]
    MissingHome(String),
}

/// Errors raised while loading a [`TerminalConfig`](crate::config::TerminalConfig)
/// or pairing it with a filesystem.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("initial working directory {0} is not a directory")]
    InvalidCwd(String),

    #[error("max_blocks must be at least 1")]
    ZeroBlockCapacity,

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
