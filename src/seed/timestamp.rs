//! Reference-modified timestamps
//!
//! `ref_modified` values are backdated from a base time by a random number
//! of days, hours, minutes and seconds.

use std::time::{SystemTime, UNIX_EPOCH};

use super::SimRng;

const SECS_PER_MIN: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MIN;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Inclusive upper bounds for each backdating component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampRange {
    pub max_days: u32,
    pub max_hours: u32,
    pub max_mins: u32,
    pub max_secs: u32,
}

impl Default for TimestampRange {
    fn default() -> Self {
        Self {
            max_days: 60,
            max_hours: 23,
            max_mins: 59,
            max_secs: 59,
        }
    }
}

impl TimestampRange {
    /// Largest possible backdating offset, in seconds
    pub fn max_offset_secs(&self) -> i64 {
        offset_secs(self.max_days, self.max_hours, self.max_mins, self.max_secs)
    }
}

/// Current Unix time in seconds
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// `base` (default: now) moved back by a fixed offset
pub fn calculate_ref_modified(base: Option<i64>, days: u32, hours: u32, mins: u32, secs: u32) -> i64 {
    base.unwrap_or_else(unix_now) - offset_secs(days, hours, mins, secs)
}

/// `base` (default: now) moved back by independently drawn components
///
/// Each component is uniform in `[0, max]`. The result is never after `base`.
pub fn random_past_timestamp(rng: &mut SimRng, base: Option<i64>, range: TimestampRange) -> i64 {
    let days = rng.range_inclusive(0..=range.max_days);
    let hours = rng.range_inclusive(0..=range.max_hours);
    let mins = rng.range_inclusive(0..=range.max_mins);
    let secs = rng.range_inclusive(0..=range.max_secs);
    calculate_ref_modified(base, days, hours, mins, secs)
}

fn offset_secs(days: u32, hours: u32, mins: u32, secs: u32) -> i64 {
    i64::from(days) * SECS_PER_DAY
        + i64::from(hours) * SECS_PER_HOUR
        + i64::from(mins) * SECS_PER_MIN
        + i64::from(secs)
}
