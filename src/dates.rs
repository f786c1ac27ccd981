use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Display format for timestamps, e.g. `Tuesday, 02 January 2024, 09:30 AM`.
pub const DISPLAY_FORMAT: &str = "%A, %d %B %Y, %I:%M %p";

// Tried in order; month-first wins for ambiguous slash dates.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M",
    "%A, %d %B %Y, %I:%M %p",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%A, %d %B %Y",
];

/// Outcome of best-effort timestamp parsing.
///
/// Parsing never fails hard: text that does not look like a timestamp is
/// handed back untouched so the caller can decide how to show it.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedTimestamp {
    Parsed(NaiveDateTime),
    Unparsed(String),
}

impl ParsedTimestamp {
    /// Render for display: formatted when parsed, raw text otherwise.
    pub fn display(&self) -> String {
        match self {
            ParsedTimestamp::Parsed(timestamp) => format_timestamp(timestamp),
            ParsedTimestamp::Unparsed(raw) => raw.clone(),
        }
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            ParsedTimestamp::Parsed(timestamp) => Some(*timestamp),
            ParsedTimestamp::Unparsed(_) => None,
        }
    }
}

/// Parse a spreadsheet cell as a calendar timestamp.
///
/// Accepts RFC 3339 / RFC 2822 strings, ISO-like date-times and the common
/// spreadsheet export layouts. Date-only values are taken at midnight and
/// offsets are dropped in favour of the wall-clock time as written.
///
/// # Examples
/// ```
/// use notes_viewer::dates::{parse_timestamp, ParsedTimestamp};
///
/// assert!(matches!(parse_timestamp("2024-01-02"), ParsedTimestamp::Parsed(_)));
/// assert_eq!(
///     parse_timestamp("last tuesday"),
///     ParsedTimestamp::Unparsed("last tuesday".to_string())
/// );
/// ```
pub fn parse_timestamp(raw: &str) -> ParsedTimestamp {
    let normalized = WHITESPACE_REGEX.replace_all(raw.trim(), " ");
    let text = normalized.as_ref();

    if text.is_empty() {
        return ParsedTimestamp::Unparsed(raw.to_string());
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return ParsedTimestamp::Parsed(timestamp.naive_local());
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc2822(text) {
        return ParsedTimestamp::Parsed(timestamp.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, format) {
            return ParsedTimestamp::Parsed(timestamp);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            if let Some(timestamp) = date.and_hms_opt(0, 0, 0) {
                return ParsedTimestamp::Parsed(timestamp);
            }
        }
    }

    ParsedTimestamp::Unparsed(raw.to_string())
}

/// Format a timestamp as `<weekday>, <day> <month> <year>, <12-hour time> <AM/PM>`.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(DISPLAY_FORMAT).to_string()
}
