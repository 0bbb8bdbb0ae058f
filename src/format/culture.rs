//! Format providers
//!
//! Locale-like rendering of floating-point numbers and timestamps.

use std::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Locale object consulted when numbers and dates are turned into text
pub trait FormatProvider: fmt::Debug + Send + Sync {
    fn format_float(&self, value: f64, format: Option<&str>) -> String;

    fn format_date_time(&self, value: &NaiveDateTime, format: Option<&str>) -> String;

    fn format_date_time_offset(&self, value: &DateTime<FixedOffset>, format: Option<&str>)
        -> String;
}

/// A named culture: decimal separator plus a strftime date pattern
///
/// Format hints:
/// - floats: `F<n>` renders exactly `n` decimals (`n` up to 99, otherwise
///   the hint is ignored)
/// - dates: any strftime pattern, replacing the culture pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
    name: String,
    decimal_separator: char,
    date_time_pattern: String,
}

impl Culture {
    const INVARIANT_PATTERN: &'static str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn new(
        name: impl Into<String>,
        decimal_separator: char,
        date_time_pattern: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            decimal_separator,
            date_time_pattern: date_time_pattern.into(),
        }
    }

    /// Culture-neutral rendering: `.` separator and ISO-8601 dates
    pub fn invariant() -> Self {
        Self::new("", '.', Self::INVARIANT_PATTERN)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Render with `pattern`, falling back to the culture pattern when the
    /// hint is not a usable strftime pattern for this value.
    fn render_date<F>(&self, pattern: Option<&str>, render: F) -> String
    where
        F: Fn(&[Item<'_>], &mut String) -> fmt::Result,
    {
        if let Some(pattern) = pattern {
            if let Some(text) = render_with_pattern(pattern, &render) {
                return text;
            }
        }
        render_with_pattern(&self.date_time_pattern, &render)
            .or_else(|| render_with_pattern(Self::INVARIANT_PATTERN, &render))
            .unwrap_or_default()
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

fn render_with_pattern<F>(pattern: &str, render: &F) -> Option<String>
where
    F: Fn(&[Item<'_>], &mut String) -> fmt::Result,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    render(&items, &mut out).ok()?;
    Some(out)
}

/// Most decimals an `F<n>` hint may ask for
pub const MAX_FIXED_DECIMALS: usize = 99;

/// Parse an `F<n>` / `f<n>` fixed-point hint; `n` above `MAX_FIXED_DECIMALS`
/// is not a usable hint
fn fixed_decimals(format: &str) -> Option<usize> {
    let digits = format.strip_prefix('F').or_else(|| format.strip_prefix('f'))?;
    if digits.is_empty() {
        return Some(2);
    }
    digits
        .parse::<usize>()
        .ok()
        .filter(|decimals| *decimals <= MAX_FIXED_DECIMALS)
}

impl FormatProvider for Culture {
    fn format_float(&self, value: f64, format: Option<&str>) -> String {
        let text = match format.and_then(fixed_decimals) {
            Some(decimals) => format!("{value:.decimals$}"),
            None => value.to_string(),
        };
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }

    fn format_date_time(&self, value: &NaiveDateTime, format: Option<&str>) -> String {
        self.render_date(format, |items, out| {
            write!(out, "{}", value.format_with_items(items.iter()))
        })
    }

    fn format_date_time_offset(
        &self,
        value: &DateTime<FixedOffset>,
        format: Option<&str>,
    ) -> String {
        match format {
            Some(_) => self.render_date(format, |items, out| {
                write!(out, "{}", value.format_with_items(items.iter()))
            }),
            None => {
                let local = value.naive_local();
                let mut text = self.format_date_time(&local, None);
                text.push_str(&value.offset().to_string());
                text
            }
        }
    }
}
