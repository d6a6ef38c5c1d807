use interpose_types::{AuditClock, AuditTimestamp};
use std::str::FromStr;

// ── Construction ─────────────────────────────────────────────────

#[test]
fn now_has_zero_logical() {
    let ts = AuditTimestamp::now();
    assert_eq!(ts.logical(), 0);
    assert!(ts.wall_time() > 0);
}

#[test]
fn new_from_components() {
    let ts = AuditTimestamp::new(42, 7);
    assert_eq!(ts.wall_time(), 42);
    assert_eq!(ts.logical(), 7);
}

// ── Ordering ─────────────────────────────────────────────────────

#[test]
fn ordering_by_wall_time() {
    let a = AuditTimestamp::new(100, 9);
    let b = AuditTimestamp::new(200, 0);
    assert!(a < b);
    assert!(a.is_before(&b));
    assert!(b.is_after(&a));
}

#[test]
fn ordering_by_logical_when_wall_time_equal() {
    let a = AuditTimestamp::new(100, 0);
    let b = AuditTimestamp::new(100, 1);
    assert!(a < b);
}

#[test]
fn equal_timestamps_are_neither_before_nor_after() {
    let a = AuditTimestamp::new(5, 5);
    let b = AuditTimestamp::new(5, 5);
    assert_eq!(a, b);
    assert!(!a.is_before(&b));
    assert!(!a.is_after(&b));
}

// ── tick ─────────────────────────────────────────────────────────

#[test]
fn tick_is_strictly_monotonic() {
    let t1 = AuditTimestamp::now();
    let t2 = t1.tick();
    let t3 = t2.tick();
    assert!(t1 < t2);
    assert!(t2 < t3);
}

#[test]
fn tick_bumps_logical_when_clock_has_not_advanced() {
    let ts = AuditTimestamp::new(u64::MAX / 2, 0);
    let ticked = ts.tick();
    assert_eq!(ticked.wall_time(), ts.wall_time());
    assert_eq!(ticked.logical(), 1);
}

#[test]
fn tick_resets_logical_when_clock_advances() {
    let ts = AuditTimestamp::new(1, 99);
    let ticked = ts.tick();
    assert!(ticked.wall_time() > 1);
    assert_eq!(ticked.logical(), 0);
}

#[test]
fn tick_carries_into_wall_time_on_logical_overflow() {
    let ts = AuditTimestamp::new(u64::MAX / 2, u32::MAX);
    let ticked = ts.tick();
    assert_eq!(ticked.wall_time(), u64::MAX / 2 + 1);
    assert_eq!(ticked.logical(), 0);
    assert!(ticked > ts);
}

#[test]
fn tick_saturates_at_the_maximum_timestamp() {
    let max = AuditTimestamp::new(u64::MAX, u32::MAX);
    assert_eq!(max.tick(), max);

    let ts = AuditTimestamp::new(u64::MAX, 7);
    assert_eq!(ts.tick(), AuditTimestamp::new(u64::MAX, 8));
}

// ── AuditClock ───────────────────────────────────────────────────

#[test]
fn clock_starts_empty() {
    let clock = AuditClock::new();
    assert!(clock.last().is_none());
}

#[test]
fn clock_never_repeats() {
    let mut clock = AuditClock::new();
    let stamps: Vec<_> = (0..1000).map(|_| clock.next()).collect();
    assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(clock.last(), stamps.last().copied());
}

// ── Text form ────────────────────────────────────────────────────

#[test]
fn display_and_parse() {
    let ts = AuditTimestamp::new(1_700_000_000_000, 3);
    assert_eq!(ts.to_string(), "1700000000000.3");
    assert_eq!(AuditTimestamp::from_str("1700000000000.3").unwrap(), ts);
}

#[test]
fn parse_rejects_missing_separator() {
    let err = AuditTimestamp::from_str("12345").unwrap_err();
    assert!(err.to_string().contains("invalid timestamp"));
}

#[test]
fn parse_rejects_non_numeric_parts() {
    assert!("abc.1".parse::<AuditTimestamp>().is_err());
    assert!("1.abc".parse::<AuditTimestamp>().is_err());
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn serialization_roundtrip() {
    let ts = AuditTimestamp::new(1234567890, 42);
    let json = serde_json::to_string(&ts).unwrap();
    let parsed: AuditTimestamp = serde_json::from_str(&json).unwrap();
    assert_eq!(ts, parsed);
}
