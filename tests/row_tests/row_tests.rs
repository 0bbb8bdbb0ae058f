//! Row Tests
//!
//! Tests verify:
//! - Column bookkeeping
//! - Column value display and types
//! - Binary hand-off codec and its error cases

use chrono::{DateTime, NaiveDate};
use tablelog::row::{decode_row, encode_row, FORMAT_VERSION, HEADER_SIZE, MAX_PAYLOAD_SIZE};
use tablelog::{ColumnType, ColumnValue, Row, TableLogError};
use uuid::Uuid;

fn sample_row() -> Row {
    let timestamp = DateTime::parse_from_rfc3339("2024-03-01T12:34:56.5+01:00").unwrap();
    let mut row = Row::new("0638448932400000000".to_string(), "Information|Hi".to_string(), timestamp);
    row.insert("Level", ColumnValue::String("Information".to_string()));
    row.insert("Count", ColumnValue::Int32(3));
    row.insert("Total", ColumnValue::Int64(-9));
    row.insert("Ratio", ColumnValue::Double(0.5));
    row.insert("Ok", ColumnValue::Boolean(true));
    row.insert("Empty", ColumnValue::Binary(None));
    row.insert("Blob", ColumnValue::Binary(Some(vec![1, 2])));
    row.insert("Id", ColumnValue::Guid(Uuid::from_u128(42)));
    row.insert("At", ColumnValue::DateTimeOffset(timestamp));
    row.insert(
        "Local",
        ColumnValue::DateTime(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(1, 2, 3).unwrap()),
    );
    row
}

// =============================================================================
// Column Tests
// =============================================================================

#[test]
fn test_column_counts() {
    let row = sample_row();
    assert_eq!(row.column_count(), 10);
    assert_eq!(row.total_column_count(), 13);
}

#[test]
fn test_insert_replaces_existing_column() {
    let mut row = sample_row();
    row.insert("Count", ColumnValue::Int32(4));

    assert_eq!(row.column_count(), 10);
    assert_eq!(row.get("Count"), Some(&ColumnValue::Int32(4)));
}

#[test]
fn test_columns_iterate_in_name_order() {
    let row = sample_row();
    let names: Vec<&str> = row.columns().map(|(name, _)| name).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_column_value_display() {
    assert_eq!(ColumnValue::Binary(None).to_string(), "null");
    assert_eq!(ColumnValue::Binary(Some(vec![0x0a, 0xff])).to_string(), "0x0aff");
    assert_eq!(ColumnValue::Int64(-9).to_string(), "-9");
    assert_eq!(ColumnValue::String("s".to_string()).to_string(), "s");
    assert_eq!(ColumnType::DateTimeOffset.to_string(), "DateTimeOffset");
}

// =============================================================================
// Codec Tests
// =============================================================================

#[test]
fn test_encode_decode_row() {
    let row = sample_row();
    let bytes = row.to_bytes().unwrap();

    assert_eq!(bytes[0], FORMAT_VERSION);
    let payload_len = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;
    assert_eq!(bytes.len(), HEADER_SIZE + payload_len);

    assert_eq!(Row::from_bytes(&bytes).unwrap(), row);
}

#[test]
fn test_decode_incomplete_header() {
    let result = decode_row(&[FORMAT_VERSION, 0, 0]);
    assert!(matches!(result, Err(TableLogError::Serialization(_))));
}

#[test]
fn test_decode_unknown_version() {
    let mut bytes = encode_row(&sample_row()).unwrap();
    bytes[0] = 0x7f;
    assert!(matches!(decode_row(&bytes), Err(TableLogError::Serialization(_))));
}

#[test]
fn test_decode_truncated_payload() {
    let bytes = encode_row(&sample_row()).unwrap();
    let result = decode_row(&bytes[..bytes.len() - 1]);
    assert!(matches!(result, Err(TableLogError::Serialization(_))));
}

#[test]
fn test_decode_garbage_payload() {
    let bytes = [FORMAT_VERSION, 0, 0, 0, 2, 0xff, 0xff];
    assert!(matches!(decode_row(&bytes), Err(TableLogError::Serialization(_))));
}

#[test]
fn test_decode_rejects_oversized_length() {
    let mut bytes = vec![FORMAT_VERSION];
    bytes.extend_from_slice(&(MAX_PAYLOAD_SIZE + 1).to_be_bytes());
    bytes.extend_from_slice(&[0; 16]);

    let result = decode_row(&bytes);
    assert!(matches!(result, Err(TableLogError::Serialization(message)) if message.contains("too large")));
}

#[test]
fn test_encode_rejects_oversized_row() {
    let mut row = sample_row();
    row.insert("Blob", ColumnValue::Binary(Some(vec![0; MAX_PAYLOAD_SIZE as usize + 1])));

    let result = encode_row(&row);
    assert!(matches!(result, Err(TableLogError::Serialization(message)) if message.contains("too large")));
}
