//! Canonical text rendering of property values
//!
//! ```text
//! "text"   'c'   null   true   0x0aff   42   1.5
//! [1, 2, 3]
//! [("key": "value"), ("other": 2)]
//! Point { X: 1, Y: 2 }
//! ```
//!
//! The format hint `l` renders strings without quotes. Numbers and
//! dates are handed to the `FormatProvider` along with the hint. The hint is
//! passed down to nested values unchanged.

use std::fmt::{self, Write};

use crate::format::{Culture, FormatProvider};

use super::value::{PropertyValue, ScalarValue, StructureValue};

impl ScalarValue {
    pub fn render(&self, out: &mut String, format: Option<&str>, provider: &dyn FormatProvider) {
        match self {
            ScalarValue::Null => out.push_str("null"),
            ScalarValue::String(text) => {
                if format == Some("l") {
                    out.push_str(text);
                } else {
                    out.push('"');
                    out.push_str(&text.replace('"', "\\\""));
                    out.push('"');
                }
            }
            ScalarValue::Char(c) => {
                out.push('\'');
                out.push(*c);
                out.push('\'');
            }
            ScalarValue::Bytes(bytes) => {
                out.push_str("0x");
                for byte in bytes {
                    let _ = write!(out, "{byte:02x}");
                }
            }
            ScalarValue::Double(value) => out.push_str(&provider.format_float(*value, format)),
            ScalarValue::Float32(value) => {
                // Widen through the shortest decimal text so 0.1f32 stays 0.1
                let widened = value.to_string().parse().unwrap_or(f64::from(*value));
                out.push_str(&provider.format_float(widened, format));
            }
            ScalarValue::DateTime(value) => {
                out.push_str(&provider.format_date_time(value, format))
            }
            ScalarValue::DateTimeOffset(value) => {
                out.push_str(&provider.format_date_time_offset(value, format))
            }
            other => {
                let _ = write!(out, "{}", DefaultText(other));
            }
        }
    }

    /// Default textual form, ignoring format hints and providers.
    ///
    /// Strings come back unquoted.
    pub fn to_default_text(&self) -> String {
        DefaultText(self).to_string()
    }
}

/// Culture-free `Display` of a scalar payload
struct DefaultText<'a>(&'a ScalarValue);

impl fmt::Display for DefaultText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ScalarValue::Null => f.write_str("null"),
            ScalarValue::Bytes(bytes) => {
                f.write_str("0x")?;
                bytes.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
            }
            ScalarValue::Boolean(value) => write!(f, "{value}"),
            ScalarValue::DateTimeOffset(value) => write!(f, "{}", value.to_rfc3339()),
            ScalarValue::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S%.f")),
            ScalarValue::Double(value) => write!(f, "{value}"),
            ScalarValue::Guid(value) => write!(f, "{value}"),
            ScalarValue::Int32(value) => write!(f, "{value}"),
            ScalarValue::Int64(value) => write!(f, "{value}"),
            ScalarValue::String(value) => f.write_str(value),
            ScalarValue::Char(value) => write!(f, "{value}"),
            ScalarValue::Int8(value) => write!(f, "{value}"),
            ScalarValue::Int16(value) => write!(f, "{value}"),
            ScalarValue::UInt8(value) => write!(f, "{value}"),
            ScalarValue::UInt16(value) => write!(f, "{value}"),
            ScalarValue::UInt32(value) => write!(f, "{value}"),
            ScalarValue::UInt64(value) => write!(f, "{value}"),
            ScalarValue::Float32(value) => write!(f, "{value}"),
            ScalarValue::Other(text) => f.write_str(text),
        }
    }
}

impl StructureValue {
    pub fn render(&self, out: &mut String, format: Option<&str>, provider: &dyn FormatProvider) {
        if let Some(tag) = &self.type_tag {
            out.push_str(tag);
            out.push(' ');
        }
        if self.fields.is_empty() {
            out.push_str("{ }");
            return;
        }
        out.push_str("{ ");
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(name);
            out.push_str(": ");
            value.render(out, format, provider);
        }
        out.push_str(" }");
    }
}

impl PropertyValue {
    pub fn render(&self, out: &mut String, format: Option<&str>, provider: &dyn FormatProvider) {
        match self {
            PropertyValue::Scalar(scalar) => scalar.render(out, format, provider),
            PropertyValue::Sequence(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.render(out, format, provider);
                }
                out.push(']');
            }
            PropertyValue::Dictionary(entries) => {
                out.push('[');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push('(');
                    key.render(out, format, provider);
                    out.push_str(": ");
                    value.render(out, format, provider);
                    out.push(')');
                }
                out.push(']');
            }
            PropertyValue::Structure(structure) => structure.render(out, format, provider),
        }
    }

    /// Render into a fresh string
    pub fn to_text(&self, format: Option<&str>, provider: &dyn FormatProvider) -> String {
        let mut out = String::new();
        self.render(&mut out, format, provider);
        out
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(None, &Culture::invariant()))
    }
}
