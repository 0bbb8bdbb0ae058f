//! Entity Factory
//!
//! Projects one log event onto one storage row.
//!
//! ## Responsibilities
//! - Row identity from the key generator
//! - Fixed metadata columns (template, level, rendered message, exception)
//! - One column per eligible property, up to the column ceiling
//! - Everything else folded into a single `AggregatedProperties` column
//!
//! ## Column Budget (defaults)
//! ```text
//! identity          3   PartitionKey, RowKey, Timestamp
//! metadata        3-4   MessageTemplate, Level, RenderedMessage, [Exception]
//! properties    ≤ 248   promoted while data columns < 251
//! aggregate       0-1   AggregatedProperties
//! ─────────────────────
//! total         ≤ 255
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{debug, trace};

use crate::config::{FactoryConfig, MAX_DATA_COLUMNS};
use crate::error::{Result, TableLogError};
use crate::event::{LogEvent, PropertyValue, ScalarValue};
use crate::format::{ColumnFormatter, Culture, FormatProvider, PropertyFormatter};
use crate::keys::{DefaultKeyGenerator, KeyGenerator};
use crate::row::{ColumnValue, Row};

/// Longest column name the store accepts
pub const MAX_COLUMN_NAME_LENGTH: usize = 255;

// =============================================================================
// Column Names
// =============================================================================

pub const MESSAGE_TEMPLATE_COLUMN: &str = "MessageTemplate";
pub const LEVEL_COLUMN: &str = "Level";
pub const RENDERED_MESSAGE_COLUMN: &str = "RenderedMessage";
pub const EXCEPTION_COLUMN: &str = "Exception";
pub const AGGREGATED_PROPERTIES_COLUMN: &str = "AggregatedProperties";

/// Columns the factory writes itself; properties never take these names
pub const RESERVED_COLUMNS: [&str; 5] = [
    MESSAGE_TEMPLATE_COLUMN,
    LEVEL_COLUMN,
    RENDERED_MESSAGE_COLUMN,
    EXCEPTION_COLUMN,
    AGGREGATED_PROPERTIES_COLUMN,
];

fn column_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[^\W\d]\w*\.)*[^\W\d]\w*$").expect("column name pattern is valid")
    })
}

/// Whether `name` can be used as a column name.
///
/// Accepts dotted identifier paths (`Request.Path`, `_id`, `Käse`) whose
/// segments do not start with a digit.
pub fn is_valid_column_name(name: &str) -> bool {
    name.chars().count() <= MAX_COLUMN_NAME_LENGTH && column_name_pattern().is_match(name)
}

// =============================================================================
// Factory
// =============================================================================

/// Builds storage rows from log events
///
/// Stateless between calls and `Send + Sync`; one factory can serve any
/// number of threads.
#[derive(Clone)]
pub struct EntityFactory {
    config: FactoryConfig,
    format_provider: Arc<dyn FormatProvider>,
    key_generator: Arc<dyn KeyGenerator>,
    property_formatter: Arc<dyn PropertyFormatter>,
}

impl fmt::Debug for EntityFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityFactory")
            .field("config", &self.config)
            .field("format_provider", &self.format_provider)
            .field("key_generator", &self.key_generator)
            .finish_non_exhaustive()
    }
}

impl EntityFactory {
    /// Factory with the invariant culture, default keys and `ColumnFormatter`
    pub fn new(config: FactoryConfig) -> Result<Self> {
        let provider: Arc<dyn FormatProvider> = Arc::new(Culture::invariant());
        Self::builder()
            .config(config)
            .format_provider(provider.clone())
            .property_formatter(Arc::new(ColumnFormatter::new(provider)))
            .build()
    }

    pub fn builder() -> EntityFactoryBuilder {
        EntityFactoryBuilder::default()
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Project `event` onto a new row.
    ///
    /// Only key generator failures can make this fail.
    pub fn create_row(&self, event: &LogEvent) -> Result<Row> {
        let suffix = self.config.row_key_suffix.as_deref();
        let mut row = Row::new(
            self.key_generator.generate_partition_key(event)?,
            self.key_generator.generate_row_key(event, suffix)?,
            event.timestamp(),
        );

        row.insert(
            MESSAGE_TEMPLATE_COLUMN,
            ColumnValue::String(event.message_template().text().to_string()),
        );
        row.insert(LEVEL_COLUMN, ColumnValue::String(event.level().to_string()));
        row.insert(
            RENDERED_MESSAGE_COLUMN,
            ColumnValue::String(event.render_message(self.format_provider.as_ref())),
        );
        if let Some(exception) = event.exception() {
            row.insert(EXCEPTION_COLUMN, ColumnValue::String(exception.to_string()));
        }

        // One slot stays free for the aggregate
        let promote_limit = self.config.max_data_columns - 1;
        let mut count = row.column_count();
        let mut overflow: Vec<(ScalarValue, PropertyValue)> = Vec::new();

        for (name, value) in event.properties() {
            let eligible = is_valid_column_name(name)
                && !RESERVED_COLUMNS.contains(&name.as_str())
                && self.config.includes_property(name);
            if eligible && count < promote_limit {
                if let Some(column) = self.property_formatter.format(value, None) {
                    row.insert(name.as_str(), column);
                }
                count += 1;
            } else {
                overflow.push((ScalarValue::String(name.clone()), value.clone()));
            }
        }

        let aggregated = overflow.len();
        if !overflow.is_empty() {
            let aggregate = PropertyValue::Dictionary(overflow);
            if let Some(column) = self.property_formatter.format(&aggregate, None) {
                row.insert(AGGREGATED_PROPERTIES_COLUMN, column);
            }
        }

        trace!(
            partition_key = %row.partition_key,
            row_key = %row.row_key,
            columns = row.column_count(),
            aggregated,
            "Created row"
        );

        Ok(row)
    }
}

/// Builder for EntityFactory
///
/// The property formatter is mandatory; the format provider defaults to the
/// invariant culture and the key generator to `DefaultKeyGenerator`.
#[derive(Default)]
pub struct EntityFactoryBuilder {
    config: FactoryConfig,
    format_provider: Option<Arc<dyn FormatProvider>>,
    key_generator: Option<Arc<dyn KeyGenerator>>,
    property_formatter: Option<Arc<dyn PropertyFormatter>>,
}

impl EntityFactoryBuilder {
    pub fn config(mut self, config: FactoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Culture used to render the `RenderedMessage` column
    pub fn format_provider(mut self, provider: Arc<dyn FormatProvider>) -> Self {
        self.format_provider = Some(provider);
        self
    }

    pub fn key_generator(mut self, generator: Arc<dyn KeyGenerator>) -> Self {
        self.key_generator = Some(generator);
        self
    }

    pub fn property_formatter(mut self, formatter: Arc<dyn PropertyFormatter>) -> Self {
        self.property_formatter = Some(formatter);
        self
    }

    pub fn build(self) -> Result<EntityFactory> {
        let property_formatter = self.property_formatter.ok_or_else(|| {
            TableLogError::Config("a property formatter is required".to_string())
        })?;

        let max = self.config.max_data_columns;
        if !(2..=MAX_DATA_COLUMNS).contains(&max) {
            return Err(TableLogError::Config(format!(
                "max_data_columns must be between 2 and {}, got {}",
                MAX_DATA_COLUMNS, max
            )));
        }

        if let Some(columns) = &self.config.property_columns {
            if let Some(invalid) = columns.iter().find(|name| !is_valid_column_name(name)) {
                return Err(TableLogError::Config(format!(
                    "property column {:?} is not a valid column name",
                    invalid
                )));
            }
        }

        let factory = EntityFactory {
            format_provider: self
                .format_provider
                .unwrap_or_else(|| Arc::new(Culture::invariant())),
            key_generator: self
                .key_generator
                .unwrap_or_else(|| Arc::new(DefaultKeyGenerator)),
            property_formatter,
            config: self.config,
        };

        debug!(
            max_data_columns = factory.config.max_data_columns,
            property_columns = ?factory.config.property_columns,
            row_key_suffix = ?factory.config.row_key_suffix,
            "Entity factory ready"
        );

        Ok(factory)
    }
}
