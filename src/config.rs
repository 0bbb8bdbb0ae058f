//! Configuration for the entity factory
//!
//! Centralized configuration with sensible defaults.

/// Most data columns a storage row may hold (255 minus the 3 identity fields)
pub const MAX_DATA_COLUMNS: usize = 252;

/// Main configuration for an `EntityFactory`
#[derive(Debug, Clone)]
pub struct FactoryConfig {
    // -------------------------------------------------------------------------
    // Key Configuration
    // -------------------------------------------------------------------------
    /// Appended to every generated row key
    pub row_key_suffix: Option<String>,

    // -------------------------------------------------------------------------
    // Column Configuration
    // -------------------------------------------------------------------------
    /// When set, only these property names are promoted to their own columns.
    /// Everything else goes to `AggregatedProperties`.
    pub property_columns: Option<Vec<String>>,

    /// Data column ceiling, metadata columns and the aggregate included.
    /// Properties are promoted while the row holds fewer than
    /// `max_data_columns - 1` data columns.
    pub max_data_columns: usize,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            row_key_suffix: None,
            property_columns: None,
            max_data_columns: MAX_DATA_COLUMNS,
        }
    }
}

impl FactoryConfig {
    /// Create a new config builder
    pub fn builder() -> FactoryConfigBuilder {
        FactoryConfigBuilder::default()
    }

    /// Whether `name` passes the allow-list (always true without one)
    pub fn includes_property(&self, name: &str) -> bool {
        match &self.property_columns {
            Some(columns) => columns.iter().any(|column| column == name),
            None => true,
        }
    }
}

/// Builder for FactoryConfig
#[derive(Default)]
pub struct FactoryConfigBuilder {
    config: FactoryConfig,
}

impl FactoryConfigBuilder {
    /// Set the suffix appended to generated row keys
    pub fn row_key_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.row_key_suffix = Some(suffix.into());
        self
    }

    /// Restrict promoted columns to the given property names
    pub fn property_columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.property_columns = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the data column ceiling
    pub fn max_data_columns(mut self, count: usize) -> Self {
        self.config.max_data_columns = count;
        self
    }

    pub fn build(self) -> FactoryConfig {
        self.config
    }
}
