//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock date (mock calendar labels)
//! - JS bindings for the engine and the SVG compiler (web only)

#[cfg(target_arch = "wasm32")]
pub mod web;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Days since 1970-01-01, from the browser clock
#[cfg(target_arch = "wasm32")]
pub fn today_epoch_day() -> i64 {
    (js_sys::Date::now() / MILLIS_PER_DAY).floor() as i64
}

/// Days since 1970-01-01, from the system clock
#[cfg(not(target_arch = "wasm32"))]
pub fn today_epoch_day() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => (elapsed.as_millis() as f64 / MILLIS_PER_DAY).floor() as i64,
        Err(e) => {
            log::warn!("System clock before 1970: {}", e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_is_after_2024() {
        // 2024-01-01
        assert!(today_epoch_day() >= 19_723);
    }
}
