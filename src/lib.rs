//! # tablelog
//!
//! Projects structured log events onto wide-column storage rows:
//! - Typed columns for native scalar properties
//! - Text columns for dictionaries, sequences and structures
//! - Column name validation and an optional allow-list
//! - A hard column ceiling with a single overflow column
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        LogEvent                              │
//! │         (template, level, exception, properties)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   EntityFactory                              │
//! │     (identity, metadata, name checks, column budget)         │
//! └──────┬──────────────────────┬───────────────────────────────┘
//!        │                      │
//!        ▼                      ▼
//! ┌─────────────┐      ┌──────────────────┐
//! │KeyGenerator │      │PropertyFormatter │
//! │ (identity)  │      │ (value → column) │
//! └─────────────┘      └────────┬─────────┘
//!                               │
//!                               ▼
//!                       ┌─────────────┐
//!                       │     Row     │──▶ storage writer
//!                       └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod event;
pub mod format;
pub mod keys;
pub mod row;
pub mod factory;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TableLogError, Result};
pub use config::FactoryConfig;
pub use event::{LogEvent, LogLevel, MessageTemplate, PropertyValue, ScalarValue, StructureValue};
pub use factory::{is_valid_column_name, EntityFactory};
pub use format::{ColumnFormatter, Culture, FormatProvider, PropertyFormatter};
pub use keys::{DefaultKeyGenerator, KeyGenerator};
pub use row::{ColumnType, ColumnValue, Row};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tablelog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
