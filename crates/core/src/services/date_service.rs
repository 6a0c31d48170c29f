use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Known wire formats for expense dates, tried in order.
///
/// The canonical pattern comes first; the second covers records where
/// the space sits on the wrong side of the comma ("Jan 5 ,2024").
/// Whitespace in a chrono pattern matches any run of whitespace
/// (including none), so padding variants like "Jan 05,2024" already
/// fall out of these two.
const DATE_FORMATS: [&str; 2] = ["%b %d, %Y", "%b %d ,%Y"];

/// The pattern used when writing a date back to the wire.
/// Matches what the remote API stores, odd spacing and all.
const WIRE_FORMAT: &str = "%b %-d ,%Y";

/// Parses and formats the human-readable date strings carried by
/// expense records.
///
/// Parsing never panics and never returns an error: a string that
/// matches no known format yields `None`, and each caller decides
/// whether to skip the record or substitute today's date.
pub struct DateService;

impl DateService {
    pub fn new() -> Self {
        Self
    }

    /// Try every known format in order. `None` if nothing matches.
    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw.trim(), format) {
                return Some(date);
            }
        }
        debug!("expense date {raw:?} matches no known format");
        None
    }

    /// Parse with the default-to-today fallback. Used by the overview
    /// tier, where every record must land somewhere.
    pub fn parse_or(&self, raw: &str, today: NaiveDate) -> NaiveDate {
        self.parse(raw).unwrap_or(today)
    }

    /// Render a date in the wire format, e.g. "Jan 5 ,2024".
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(WIRE_FORMAT).to_string()
    }

    /// First day of the month `date` falls in.
    pub fn month_start(&self, date: NaiveDate) -> NaiveDate {
        NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
    }
}

impl Default for DateService {
    fn default() -> Self {
        Self::new()
    }
}
