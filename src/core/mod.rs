//! Core business logic for the terminal.
//!
//! This module provides:
//! - [`VirtualFs`] scripted filesystem
//! - [`Interpreter`] evaluating lines against a [`Session`]
//! - [`StreamTask`] and [`drive`] for incrementally revealed output
//! - [`autocomplete`] and [`get_hint`] for tab completion

mod autocomplete;
pub mod commands;
pub mod error;
mod filesystem;
mod history;
mod interpreter;
pub mod parser;
pub mod scripts;
mod session;
pub mod stream;

pub use autocomplete::{AutocompleteResult, autocomplete, get_hint};
pub use commands::{Command, CommandResult, Effect};
pub use error::{ConfigError, ManifestError};
pub use filesystem::VirtualFs;
pub use history::{HistoryDirection, HistoryRecall};
pub use interpreter::{Evaluation, Interpreter};
pub use scripts::{Scripts, StreamTrigger};
pub use session::Session;
pub use stream::{CancelToken, StreamEvent, StreamPhase, StreamTask, drive};
