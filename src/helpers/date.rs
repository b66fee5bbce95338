//! Date helper functions

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fmt::Write;

/// Textual form of the `date` front-matter field
pub const FRONT_MATTER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a front-matter date such as `2024-03-01`
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), FRONT_MATTER_DATE_FORMAT).ok()
}

/// Check that a chrono format string can render a plain date.
///
/// chrono panics while displaying a date with a broken format, or one asking
/// for time-of-day fields, so display formats coming from configuration are
/// checked once up front.
pub fn is_valid_format(format: &str) -> bool {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let mut sample = String::new();
    write!(sample, "{}", NaiveDate::MIN.format(format)).is_ok()
}

/// Format a date for display, e.g. `"%b %d, %Y"` -> `Mar 01, 2024`
pub fn format_date(date: NaiveDate, format: &str) -> String {
    date.format(format).to_string()
}
