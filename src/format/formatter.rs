//! Property formatter
//!
//! Converts one property value into one column value.

use std::fmt;
use std::sync::Arc;

use crate::event::{PropertyValue, ScalarValue};
use crate::row::ColumnValue;

use super::{Culture, FormatProvider};

/// Converts a property value into a storage column value
///
/// `None` means the value has no column representation and no column is
/// written for it.
pub trait PropertyFormatter: fmt::Debug + Send + Sync {
    fn format(&self, value: &PropertyValue, format: Option<&str>) -> Option<ColumnValue>;
}

/// Default formatter: native scalars map 1:1, everything else becomes text
#[derive(Debug, Clone)]
pub struct ColumnFormatter {
    provider: Arc<dyn FormatProvider>,
}

impl ColumnFormatter {
    pub fn new(provider: Arc<dyn FormatProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn FormatProvider {
        self.provider.as_ref()
    }

    fn format_scalar(scalar: &ScalarValue) -> ColumnValue {
        match scalar {
            ScalarValue::Null => ColumnValue::Binary(None),
            ScalarValue::Bytes(bytes) => ColumnValue::Binary(Some(bytes.clone())),
            ScalarValue::Boolean(value) => ColumnValue::Boolean(*value),
            ScalarValue::DateTimeOffset(value) => ColumnValue::DateTimeOffset(*value),
            ScalarValue::DateTime(value) => ColumnValue::DateTime(*value),
            ScalarValue::Double(value) => ColumnValue::Double(*value),
            ScalarValue::Guid(value) => ColumnValue::Guid(*value),
            ScalarValue::Int32(value) => ColumnValue::Int32(*value),
            ScalarValue::Int64(value) => ColumnValue::Int64(*value),
            ScalarValue::String(value) => ColumnValue::String(value.clone()),
            other => ColumnValue::String(other.to_default_text()),
        }
    }
}

impl Default for ColumnFormatter {
    fn default() -> Self {
        Self::new(Arc::new(Culture::invariant()))
    }
}

impl PropertyFormatter for ColumnFormatter {
    fn format(&self, value: &PropertyValue, format: Option<&str>) -> Option<ColumnValue> {
        let column = match value {
            PropertyValue::Scalar(scalar) => Self::format_scalar(scalar),
            PropertyValue::Dictionary(_)
            | PropertyValue::Sequence(_)
            | PropertyValue::Structure(_) => {
                ColumnValue::String(value.to_text(format, self.provider.as_ref()))
            }
        };
        Some(column)
    }
}
