//! Date and reading-time helpers

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

/// Long-form display pattern, e.g. "July 1, 2022"
pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

/// Format a date with a strftime pattern.
///
/// An invalid pattern falls back to [`DEFAULT_DATE_FORMAT`] instead of
/// panicking during formatting.
pub fn format_date(date: &DateTime<Utc>, format: &str) -> String {
    let items = StrftimeItems::new(format);
    if items.clone().any(|item| matches!(item, Item::Error)) {
        tracing::warn!("Invalid date format {:?}, using default", format);
        return date.format(DEFAULT_DATE_FORMAT).to_string();
    }
    date.format_with_items(items).to_string()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Reading time label, e.g. "2 min read"
pub fn read_time_label(minutes: usize) -> String {
    format!("{} min read", minutes)
}
