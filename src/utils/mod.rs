//! Utility modules for formatting, time, and DOM operations.
//!
//! Provides:
//! - [`format_prompt`] - Block header prompt text
//! - [`now_ms`], [`local_now`] - Portable clock access
//! - [`dom`] - Browser helpers for the web front end

mod clock;
pub mod dom;
mod format;

pub use clock::{elapsed_ms, local_now, now_ms};
pub use format::{format_date, format_duration, format_prompt, format_timestamp, tilde_path};
