//! Event Module
//!
//! The input side of the projection: a structured log event.
//!
//! ## Responsibilities
//! - Log levels and their string forms
//! - Property values (scalar, dictionary, sequence, structure)
//! - Message template parsing and rendering
//! - Canonical text rendering of property values
//!
//! ## Shape
//! ```text
//! LogEvent
//! ├── timestamp          DateTime<FixedOffset>
//! ├── level              LogLevel
//! ├── message_template   MessageTemplate
//! ├── exception          Option<String>
//! └── properties         BTreeMap<String, PropertyValue>
//! ```

mod render;
mod template;
mod value;

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::TableLogError;
use crate::format::FormatProvider;

pub use template::{Alignment, Destructuring, MessageTemplate, PropertyToken, TemplateToken};
pub use value::{PropertyValue, ScalarValue, StructureValue};

/// Event severity, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Verbose,
    Debug,
    Information,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "Verbose",
            LogLevel::Debug => "Debug",
            LogLevel::Information => "Information",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = TableLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verbose" | "trace" => Ok(LogLevel::Verbose),
            "debug" => Ok(LogLevel::Debug),
            "information" | "info" => Ok(LogLevel::Information),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" | "err" => Ok(LogLevel::Error),
            "fatal" | "critical" => Ok(LogLevel::Fatal),
            _ => Err(TableLogError::InvalidLevel(s.to_string())),
        }
    }
}

/// A structured log event
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    timestamp: DateTime<FixedOffset>,
    level: LogLevel,
    message_template: MessageTemplate,
    exception: Option<String>,
    properties: BTreeMap<String, PropertyValue>,
}

impl LogEvent {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        level: LogLevel,
        message_template: MessageTemplate,
    ) -> Self {
        Self {
            timestamp,
            level,
            message_template,
            exception: None,
            properties: BTreeMap::new(),
        }
    }

    /// Add a property; an existing property with the same name is replaced
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.add_or_update_property(name, value);
        self
    }

    pub fn add_or_update_property(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Attach exception text as-is
    pub fn with_exception(mut self, text: impl Into<String>) -> Self {
        self.exception = Some(text.into());
        self
    }

    /// Attach an error, recording its full `source()` chain
    pub fn with_error(self, error: &(dyn StdError + 'static)) -> Self {
        let mut text = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            text.push_str("\n  caused by: ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        self.with_exception(text)
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message_template(&self) -> &MessageTemplate {
        &self.message_template
    }

    pub fn exception(&self) -> Option<&str> {
        self.exception.as_deref()
    }

    /// Properties in ascending name order
    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    /// Render the message template against this event's properties
    pub fn render_message(&self, provider: &dyn FormatProvider) -> String {
        self.message_template.render(&self.properties, provider)
    }
}
