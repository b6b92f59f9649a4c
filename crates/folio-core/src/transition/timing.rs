//! Time calculation utilities for page-turn animations
//!
//! Frame time is passed in explicitly so a frame driver (or a test clock)
//! decides what "now" is.

use std::time::{Duration, Instant};

/// Calculate animation progress (0.0 to 1.0) from start time and duration
///
/// # Arguments
/// * `start` - Animation start time
/// * `now` - Time of the current frame
/// * `duration` - Total animation duration
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
