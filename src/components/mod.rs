//! UI components built with Leptos.
//!
//! - [`Shell`] - Warp window body (block list, input line, footer)
//! - [`terminal`] - Block rendering and the command input

pub mod terminal;

pub use terminal::Shell;
