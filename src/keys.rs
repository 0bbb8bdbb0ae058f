//! Row identity
//!
//! Partition and row key generation for storage rows.

use std::fmt;

use uuid::Uuid;

use crate::error::{Result, TableLogError};
use crate::event::LogEvent;

/// Produces the two-part identity of a row
///
/// Implementations must return values that are legal storage keys.
/// Failures propagate unchanged out of `EntityFactory::create_row`.
pub trait KeyGenerator: fmt::Debug + Send + Sync {
    fn generate_partition_key(&self, event: &LogEvent) -> Result<String>;

    fn generate_row_key(&self, event: &LogEvent, suffix: Option<&str>) -> Result<String>;
}

/// Minute-bucketed partitions, `{Level}|{Template}[|{suffix}]|{id}` row keys
///
/// `id` is a random UUID, so events sharing level, template and minute still
/// get distinct rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKeyGenerator;

impl DefaultKeyGenerator {
    /// Longest row key the store accepts
    pub const MAX_KEY_LENGTH: usize = 1024;

    /// Ticks (100ns) between 0001-01-01T00:00:00Z and the Unix epoch
    const EPOCH_TICKS: i64 = 621_355_968_000_000_000;
    const TICKS_PER_SECOND: i64 = 10_000_000;
    const TICKS_PER_MINUTE: i64 = 60 * Self::TICKS_PER_SECOND;

    /// Drop characters storage keys may not contain
    pub fn sanitize(text: &str) -> String {
        text.chars()
            .filter(|c| !matches!(c, '/' | '\\' | '#' | '?') && !c.is_control())
            .collect()
    }

    /// Ticks since 0001-01-01T00:00:00Z, `None` outside the tick range
    fn ticks(event: &LogEvent) -> Option<i64> {
        let timestamp = event.timestamp();
        let subsec = i64::from(timestamp.timestamp_subsec_nanos() % 1_000_000_000) / 100;
        timestamp
            .timestamp()
            .checked_mul(Self::TICKS_PER_SECOND)?
            .checked_add(Self::EPOCH_TICKS)?
            .checked_add(subsec)
            .filter(|ticks| *ticks >= 0)
    }
}

fn truncate_chars(text: &mut String, max: usize) {
    if let Some((cut, _)) = text.char_indices().nth(max) {
        text.truncate(cut);
    }
}

impl KeyGenerator for DefaultKeyGenerator {
    fn generate_partition_key(&self, event: &LogEvent) -> Result<String> {
        let ticks = Self::ticks(event).ok_or_else(|| {
            TableLogError::KeyGeneration(format!(
                "timestamp {} is outside the representable tick range",
                event.timestamp()
            ))
        })?;
        Ok(format!("0{}", ticks - ticks.rem_euclid(Self::TICKS_PER_MINUTE)))
    }

    fn generate_row_key(&self, event: &LogEvent, suffix: Option<&str>) -> Result<String> {
        let id = format!("|{}", Uuid::new_v4());
        let budget = Self::MAX_KEY_LENGTH - id.len();

        // The id is kept whole, then the suffix, then as much prefix as fits
        let mut tail = suffix
            .map(|suffix| format!("|{}", Self::sanitize(suffix)))
            .unwrap_or_default();
        truncate_chars(&mut tail, budget);

        let mut key = format!(
            "{}|{}",
            event.level(),
            Self::sanitize(event.message_template().text())
        );
        truncate_chars(&mut key, budget - tail.chars().count());

        key.push_str(&tail);
        key.push_str(&id);
        Ok(key)
    }
}
