//! Key Generator Tests
//!
//! Tests verify:
//! - Minute-bucketed partition keys
//! - Timestamps outside the tick range
//! - Row key layout, suffix and unique id
//! - Removal of characters illegal in keys
//! - Row key length limit

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use tablelog::{
    DefaultKeyGenerator, KeyGenerator, LogEvent, LogLevel, MessageTemplate, TableLogError,
};
use uuid::Uuid;

fn event_at(timestamp: &str, template: &str) -> LogEvent {
    LogEvent::new(
        DateTime::parse_from_rfc3339(timestamp).unwrap(),
        LogLevel::Error,
        MessageTemplate::parse(template),
    )
}

fn event_in_year(year: i32) -> LogEvent {
    let naive = NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let timestamp = FixedOffset::east_opt(0)
        .unwrap()
        .from_utc_datetime(&naive);
    LogEvent::new(timestamp, LogLevel::Error, MessageTemplate::parse("x"))
}

/// Split `key` into the part before the trailing id and the id itself
fn split_id(key: &str) -> (&str, Uuid) {
    let (prefix, id) = key.rsplit_once('|').expect("row key has an id");
    (prefix, Uuid::parse_str(id).expect("row key ends in a uuid"))
}

// =============================================================================
// Partition Key Tests
// =============================================================================

#[test]
fn test_partition_key_is_ticks_rounded_to_minute() {
    let event = event_at("2024-03-01T12:34:56.789Z", "x");
    let key = DefaultKeyGenerator.generate_partition_key(&event).unwrap();
    assert_eq!(key, "0638448932400000000");
}

#[test]
fn test_partition_key_shared_within_minute() {
    let first = event_at("2024-03-01T12:34:00Z", "x");
    let last = event_at("2024-03-01T12:34:59.999Z", "x");
    let next = event_at("2024-03-01T12:35:00Z", "x");

    let generator = DefaultKeyGenerator;
    let first_key = generator.generate_partition_key(&first).unwrap();
    assert_eq!(first_key, generator.generate_partition_key(&last).unwrap());
    assert_ne!(first_key, generator.generate_partition_key(&next).unwrap());
}

#[test]
fn test_partition_key_ignores_offset() {
    let utc = event_at("2024-03-01T12:34:56Z", "x");
    let local = event_at("2024-03-01T14:34:56+02:00", "x");

    assert_eq!(
        DefaultKeyGenerator.generate_partition_key(&utc).unwrap(),
        DefaultKeyGenerator.generate_partition_key(&local).unwrap()
    );
}

#[test]
fn test_partition_key_first_tick() {
    let key = DefaultKeyGenerator.generate_partition_key(&event_in_year(1)).unwrap();
    assert_eq!(key, "00");
}

#[test]
fn test_partition_key_out_of_range() {
    for year in [200_000, 0, -50] {
        let result = DefaultKeyGenerator.generate_partition_key(&event_in_year(year));
        assert!(
            matches!(result, Err(TableLogError::KeyGeneration(_))),
            "year {year} should be rejected"
        );
    }
}

// =============================================================================
// Row Key Tests
// =============================================================================

#[test]
fn test_row_key_layout() {
    let event = event_at("2024-03-01T12:34:56Z", "Order {OrderId} failed");

    let key = DefaultKeyGenerator.generate_row_key(&event, None).unwrap();
    assert_eq!(split_id(&key).0, "Error|Order {OrderId} failed");

    let key = DefaultKeyGenerator.generate_row_key(&event, Some("node-1")).unwrap();
    assert_eq!(split_id(&key).0, "Error|Order {OrderId} failed|node-1");
}

#[test]
fn test_row_keys_unique_for_identical_events() {
    let event = event_at("2024-03-01T12:34:56Z", "Tick");
    let generator = DefaultKeyGenerator;

    let first = generator.generate_row_key(&event, None).unwrap();
    let second = generator.generate_row_key(&event, None).unwrap();
    assert_ne!(first, second);
    assert_eq!(split_id(&first).0, split_id(&second).0);
}

#[test]
fn test_row_key_strips_illegal_characters() {
    let event = event_at("2024-03-01T12:34:56Z", "a/b\\c#d?e\nf\tg");
    let key = DefaultKeyGenerator.generate_row_key(&event, Some("s/x")).unwrap();
    assert_eq!(split_id(&key).0, "Error|abcdefg|sx");
}

#[test]
fn test_row_key_truncated_to_limit() {
    let event = event_at("2024-03-01T12:34:56Z", &"é".repeat(2000));
    let key = DefaultKeyGenerator.generate_row_key(&event, Some("node-1")).unwrap();

    assert_eq!(key.chars().count(), DefaultKeyGenerator::MAX_KEY_LENGTH);
    assert!(key.starts_with("Error|éé"));
    // Suffix and id survive, the template is cut
    let (prefix, _) = split_id(&key);
    assert!(prefix.ends_with("éé|node-1"));
}

#[test]
fn test_row_key_long_suffix_keeps_id() {
    let event = event_at("2024-03-01T12:34:56Z", "x");
    let suffix = "s".repeat(3000);
    let key = DefaultKeyGenerator.generate_row_key(&event, Some(&suffix)).unwrap();

    assert_eq!(key.chars().count(), DefaultKeyGenerator::MAX_KEY_LENGTH);
    let (prefix, _) = split_id(&key);
    assert!(prefix.starts_with("|sss"));
}

#[test]
fn test_sanitize() {
    assert_eq!(DefaultKeyGenerator::sanitize("ok"), "ok");
    assert_eq!(DefaultKeyGenerator::sanitize("#?/\\"), "");
    assert_eq!(DefaultKeyGenerator::sanitize("bell\u{7}"), "bell");
}
