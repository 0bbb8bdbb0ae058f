//! Property values
//!
//! The four shapes a captured log property can take.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use uuid::Uuid;

/// A single primitive value
///
/// The first ten variants have a native storage column type. The rest are
/// stored as text.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bytes(Vec<u8>),
    Boolean(bool),
    DateTimeOffset(DateTime<FixedOffset>),
    DateTime(NaiveDateTime),
    Double(f64),
    Guid(Uuid),
    Int32(i32),
    Int64(i64),
    String(String),

    // No native column type
    Char(char),
    Int8(i8),
    Int16(i16),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),

    /// Any other primitive, already reduced to its textual form
    Other(String),
}

impl ScalarValue {
    /// Infer a scalar from free text.
    ///
    /// Tries, in order: `null`, booleans, i32, i64, f64, UUID, RFC 3339
    /// timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps. Anything else is a
    /// string.
    pub fn parse_literal(text: &str) -> Self {
        if text == "null" {
            return ScalarValue::Null;
        }
        if let Ok(value) = text.parse::<bool>() {
            return ScalarValue::Boolean(value);
        }
        if let Ok(value) = text.parse::<i32>() {
            return ScalarValue::Int32(value);
        }
        if let Ok(value) = text.parse::<i64>() {
            return ScalarValue::Int64(value);
        }
        if let Ok(value) = text.parse::<f64>() {
            // "inf" and "NaN" parse as floats; keep them as text
            if value.is_finite() {
                return ScalarValue::Double(value);
            }
        }
        if let Ok(value) = Uuid::parse_str(text) {
            return ScalarValue::Guid(value);
        }
        if let Ok(value) = DateTime::parse_from_rfc3339(text) {
            return ScalarValue::DateTimeOffset(value);
        }
        if let Ok(value) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return ScalarValue::DateTime(value);
        }
        ScalarValue::String(text.to_string())
    }
}

/// A named, optionally tagged group of fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructureValue {
    pub type_tag: Option<String>,
    pub fields: Vec<(String, PropertyValue)>,
}

impl StructureValue {
    pub fn new(type_tag: Option<String>) -> Self {
        Self {
            type_tag,
            fields: Vec::new(),
        }
    }

    /// Append a field, keeping declaration order
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

/// A captured property value
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Scalar(ScalarValue),
    Dictionary(Vec<(ScalarValue, PropertyValue)>),
    Sequence(Vec<PropertyValue>),
    Structure(StructureValue),
}

impl PropertyValue {
    pub fn scalar(value: impl Into<ScalarValue>) -> Self {
        PropertyValue::Scalar(value.into())
    }

    pub fn null() -> Self {
        PropertyValue::Scalar(ScalarValue::Null)
    }

    /// Build a dictionary from key/value pairs, keeping their order
    pub fn dictionary<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ScalarValue>,
        V: Into<PropertyValue>,
    {
        PropertyValue::Dictionary(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn sequence<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<PropertyValue>,
    {
        PropertyValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<ScalarValue> for PropertyValue {
    fn from(value: ScalarValue) -> Self {
        PropertyValue::Scalar(value)
    }
}

impl From<StructureValue> for PropertyValue {
    fn from(value: StructureValue) -> Self {
        PropertyValue::Structure(value)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(items: Vec<PropertyValue>) -> Self {
        PropertyValue::Sequence(items)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::String(value.to_string())
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Scalar(value.into())
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ScalarValue::Null, Into::into)
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ScalarValue {
                fn from(value: $ty) -> Self {
                    ScalarValue::$variant(value)
                }
            }

            impl From<$ty> for PropertyValue {
                fn from(value: $ty) -> Self {
                    PropertyValue::Scalar(ScalarValue::$variant(value))
                }
            }
        )*
    };
}

impl_scalar_from! {
    Vec<u8> => Bytes,
    bool => Boolean,
    DateTime<FixedOffset> => DateTimeOffset,
    NaiveDateTime => DateTime,
    f64 => Double,
    Uuid => Guid,
    i32 => Int32,
    i64 => Int64,
    String => String,
    char => Char,
    i8 => Int8,
    i16 => Int16,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
}
