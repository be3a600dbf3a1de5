//! Per-session billing: every started hour is paid in full.

use chrono::TimeDelta;

const SECONDS_PER_HOUR: u64 = 3600;

/// Round a session length up to whole hours. Zero or negative lengths cost nothing.
pub fn ceil_hours(duration: TimeDelta) -> u64 {
    let secs = duration.num_seconds();
    if secs <= 0 {
        return 0;
    }
    (secs as u64).div_ceil(SECONDS_PER_HOUR)
}

/// Price of one seating session at `hourly_rate`.
pub fn charge(duration: TimeDelta, hourly_rate: u64) -> u64 {
    ceil_hours(duration).saturating_mul(hourly_rate)
}
