//! Wall-clock helpers shared by the browser and native builds.

use chrono::{DateTime, Local};

/// Milliseconds since the Unix epoch, used for measuring command durations.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch, used for measuring command durations.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Current local time.
pub fn local_now() -> DateTime<Local> {
    Local::now()
}

/// Elapsed milliseconds since `start`, never negative.
pub fn elapsed_ms(start: f64) -> f64 {
    (now_ms() - start).max(0.0)
}
