//! tablelog CLI
//!
//! Projects a log event described on the command line and prints the row.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand};
use tablelog::{
    is_valid_column_name, ColumnFormatter, Culture, EntityFactory, FactoryConfig, FormatProvider,
    LogEvent, LogLevel, MessageTemplate, PropertyValue, ScalarValue,
};
use tracing_subscriber::{fmt, EnvFilter};

/// tablelog CLI
#[derive(Parser, Debug)]
#[command(name = "tablelog-cli")]
#[command(about = "Project structured log events onto wide-column storage rows")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build one event and print the resulting row
    Project {
        /// Message template, e.g. "User {UserId} signed in"
        #[arg(short, long)]
        template: String,

        /// Level (verbose, debug, info, warn, error, fatal)
        #[arg(short, long, default_value = "information")]
        level: LogLevel,

        /// Property as NAME=VALUE; the value type is inferred (repeatable)
        #[arg(short, long = "property", value_parser = parse_property)]
        properties: Vec<(String, String)>,

        /// Exception text
        #[arg(short, long)]
        exception: Option<String>,

        /// RFC 3339 event timestamp (defaults to now)
        #[arg(long)]
        timestamp: Option<DateTime<FixedOffset>>,

        /// Suffix appended to the row key
        #[arg(long)]
        row_key_suffix: Option<String>,

        /// Only promote these properties to columns (repeatable)
        #[arg(long = "include")]
        property_columns: Vec<String>,

        /// Data column ceiling
        #[arg(long, default_value = "252")]
        max_data_columns: usize,

        /// Decimal separator used for rendered numbers
        #[arg(long, default_value = ".")]
        decimal_separator: char,

        /// Also print the encoded row as hex
        #[arg(long)]
        encoded: bool,
    },

    /// Check whether names are usable as column names
    Check {
        names: Vec<String>,
    },
}

fn parse_property(text: &str) -> Result<(String, String), String> {
    text.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got {text:?}"))
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tablelog=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Project {
            template,
            level,
            properties,
            exception,
            timestamp,
            row_key_suffix,
            property_columns,
            max_data_columns,
            decimal_separator,
            encoded,
        } => {
            // Build config from args
            let mut builder = FactoryConfig::builder().max_data_columns(max_data_columns);
            if let Some(suffix) = row_key_suffix {
                builder = builder.row_key_suffix(suffix);
            }
            if !property_columns.is_empty() {
                builder = builder.property_columns(property_columns);
            }

            let provider: Arc<dyn FormatProvider> = Arc::new(Culture::new(
                "cli",
                decimal_separator,
                "%Y-%m-%dT%H:%M:%S%.f",
            ));
            let factory = match EntityFactory::builder()
                .config(builder.build())
                .format_provider(provider.clone())
                .property_formatter(Arc::new(ColumnFormatter::new(provider)))
                .build()
            {
                Ok(factory) => factory,
                Err(e) => {
                    tracing::error!("Failed to build entity factory: {}", e);
                    std::process::exit(1);
                }
            };

            let timestamp = timestamp.unwrap_or_else(|| DateTime::<FixedOffset>::from(Utc::now()));
            let mut event = LogEvent::new(timestamp, level, MessageTemplate::parse(template));
            for (name, value) in properties {
                event.add_or_update_property(
                    name,
                    PropertyValue::Scalar(ScalarValue::parse_literal(&value)),
                );
            }
            if let Some(exception) = exception {
                event = event.with_exception(exception);
            }

            let row = match factory.create_row(&event) {
                Ok(row) => row,
                Err(e) => {
                    tracing::error!("Failed to create row: {}", e);
                    std::process::exit(1);
                }
            };

            println!("PartitionKey = {}", row.partition_key);
            println!("RowKey       = {}", row.row_key);
            println!("Timestamp    = {}", row.timestamp.to_rfc3339());
            for (name, value) in row.columns() {
                println!("{} ({}) = {}", name, value.column_type(), value);
            }
            tracing::info!("{} of 255 columns used", row.total_column_count());

            if encoded {
                match row.to_bytes() {
                    Ok(bytes) => {
                        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
                        println!("{hex}");
                    }
                    Err(e) => {
                        tracing::error!("Failed to encode row: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        }
        Commands::Check { names } => {
            for name in names {
                let verdict = if is_valid_column_name(&name) { "column" } else { "aggregated" };
                println!("{name}: {verdict}");
            }
        }
    }
}
