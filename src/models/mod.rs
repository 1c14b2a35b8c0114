//! Data models and types for the terminal.
//!
//! Contains domain types for:
//! - [`DirectoryEntry`], [`Manifest`] - Scripted filesystem representation
//! - [`CommandBlock`], [`BlockId`] - Terminal transcript blocks
//! - [`LineStyle`] - Output line highlighting

mod filesystem;
mod terminal;

pub use filesystem::{DirectoryEntry, DirectoryListing, DisplayPermissions, Manifest};
pub use terminal::{BlockId, CommandBlock, LineStyle};
