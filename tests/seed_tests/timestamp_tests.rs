//! Timestamp Tests
//!
//! Tests verify:
//! - Backdated timestamps stay within their bounds
//! - Fixed-offset calculation

use vaultsim::seed::{
    calculate_ref_modified, random_past_timestamp, unix_now, SimRng, TimestampRange,
};

const BASE: i64 = 1_700_000_000;

// =============================================================================
// Timestamp Tests
// =============================================================================

#[test]
fn test_calculate_ref_modified_offsets() {
    assert_eq!(calculate_ref_modified(Some(BASE), 0, 0, 0, 0), BASE);
    assert_eq!(calculate_ref_modified(Some(BASE), 1, 0, 0, 0), BASE - 86_400);
    assert_eq!(calculate_ref_modified(Some(BASE), 0, 2, 3, 4), BASE - 7_200 - 180 - 4);
}

#[test]
fn test_calculate_ref_modified_defaults_to_now() {
    let before = unix_now();
    let ts = calculate_ref_modified(None, 0, 0, 0, 10);
    let after = unix_now();

    assert!(ts >= before - 10);
    assert!(ts <= after - 10);
}

#[test]
fn test_random_past_timestamp_bounds() {
    let mut rng = SimRng::seeded(99);
    let range = TimestampRange::default();

    for _ in 0..1_000 {
        let ts = random_past_timestamp(&mut rng, Some(BASE), range);
        assert!(ts <= BASE);
        assert!(ts >= BASE - range.max_offset_secs());
    }
}

#[test]
fn test_random_past_timestamp_zero_range_is_base() {
    let mut rng = SimRng::seeded(5);
    let range = TimestampRange {
        max_days: 0,
        max_hours: 0,
        max_mins: 0,
        max_secs: 0,
    };

    assert_eq!(random_past_timestamp(&mut rng, Some(BASE), range), BASE);
}

#[test]
fn test_random_past_timestamp_is_reproducible() {
    let mut a = SimRng::seeded(11);
    let mut b = SimRng::seeded(11);
    let range = TimestampRange::default();

    for _ in 0..50 {
        assert_eq!(
            random_past_timestamp(&mut a, Some(BASE), range),
            random_past_timestamp(&mut b, Some(BASE), range)
        );
    }
}
