//! Row Module
//!
//! The output side of the projection: one wide-column storage row.
//!
//! ## Layout
//! ```text
//! ┌───────────────┬─────────┬───────────┬──────────────────────────────┐
//! │ PartitionKey  │ RowKey  │ Timestamp │ data columns (name → value)  │
//! └───────────────┴─────────┴───────────┴──────────────────────────────┘
//!   3 identity fields                     at most 252 typed columns
//! ```

mod codec;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use codec::{decode_row, encode_row, FORMAT_VERSION, HEADER_SIZE, MAX_PAYLOAD_SIZE};

/// Identity fields every row carries besides its data columns
pub const IDENTITY_COLUMNS: usize = 3;

/// Native storage column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Binary,
    Boolean,
    DateTimeOffset,
    DateTime,
    Double,
    Guid,
    Int32,
    Int64,
    String,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A typed column value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValue {
    /// `None` is the null column value
    Binary(Option<Vec<u8>>),
    Boolean(bool),
    DateTimeOffset(DateTime<FixedOffset>),
    DateTime(NaiveDateTime),
    Double(f64),
    Guid(Uuid),
    Int32(i32),
    Int64(i64),
    String(String),
}

impl ColumnValue {
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnValue::Binary(_) => ColumnType::Binary,
            ColumnValue::Boolean(_) => ColumnType::Boolean,
            ColumnValue::DateTimeOffset(_) => ColumnType::DateTimeOffset,
            ColumnValue::DateTime(_) => ColumnType::DateTime,
            ColumnValue::Double(_) => ColumnType::Double,
            ColumnValue::Guid(_) => ColumnType::Guid,
            ColumnValue::Int32(_) => ColumnType::Int32,
            ColumnValue::Int64(_) => ColumnType::Int64,
            ColumnValue::String(_) => ColumnType::String,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Binary(None))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ColumnValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Binary(None) => f.write_str("null"),
            ColumnValue::Binary(Some(bytes)) => {
                f.write_str("0x")?;
                bytes.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
            }
            ColumnValue::Boolean(value) => write!(f, "{value}"),
            ColumnValue::DateTimeOffset(value) => f.write_str(&value.to_rfc3339()),
            ColumnValue::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S%.f")),
            ColumnValue::Double(value) => write!(f, "{value}"),
            ColumnValue::Guid(value) => write!(f, "{value}"),
            ColumnValue::Int32(value) => write!(f, "{value}"),
            ColumnValue::Int64(value) => write!(f, "{value}"),
            ColumnValue::String(value) => f.write_str(value),
        }
    }
}

/// A storage row: identity plus named data columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub partition_key: String,
    pub row_key: String,
    pub timestamp: DateTime<FixedOffset>,
    columns: BTreeMap<String, ColumnValue>,
}

impl Row {
    pub fn new(partition_key: String, row_key: String, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            partition_key,
            row_key,
            timestamp,
            columns: BTreeMap::new(),
        }
    }

    /// Set a column, replacing any previous value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: ColumnValue) {
        self.columns.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ColumnValue> {
        self.columns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Data columns in name order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &ColumnValue)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of data columns, identity fields excluded
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Data columns plus the identity fields
    pub fn total_column_count(&self) -> usize {
        self.columns.len() + IDENTITY_COLUMNS
    }

    pub fn to_bytes(&self) -> crate::Result<Vec<u8>> {
        encode_row(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> crate::Result<Self> {
        decode_row(bytes)
    }
}
