//! Formatting utilities for prompts, dates, and other display values.

use chrono::{DateTime, TimeZone};

/// Format the prompt shown above a block (e.g., `~/warp git:(main) (0.123s)`).
///
/// Paths under `home` are abbreviated with `~`; home itself renders as `~/`.
pub fn format_prompt(cwd: &str, home: &str, branch: &str, duration_ms: Option<f64>) -> String {
    let path = tilde_path(cwd, home);
    match duration_ms {
        Some(ms) => format!("{} git:({}) {}", path, branch, format_duration(ms)),
        None => format!("{} git:({})", path, branch),
    }
}

/// Abbreviate a path under `home` with `~`.
pub fn tilde_path(cwd: &str, home: &str) -> String {
    match cwd.strip_prefix(home) {
        Some("") => "~/".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{}", rest),
        _ => cwd.to_string(),
    }
}

/// Format elapsed time in seconds (e.g., "(0.123s)").
pub fn format_duration(ms: f64) -> String {
    format!("({:.3}s)", ms.max(0.0) / 1000.0)
}

/// Timestamp as printed by `date` (e.g., "3/7/2025, 4:05:09 PM").
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Date column of `ls -l` (e.g., "3/7/2025").
pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%-m/%-d/%Y").to_string()
}
