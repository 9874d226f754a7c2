//! # Date Normalization
//!
//! Rewrites string cells of date columns into date values. Some source formats are
//! reordered first so the lenient parser below can read them: day-first numeric dates
//! in particular are never guessed.
use crate::message::cell::Cell;
use crate::message::TableMessage;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Source format of a string encoded date, taken from a column's format name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DateFormat {
    /// Day, month and year, e.g. `15/02/2023`. Eight unseparated digits such as
    /// `15022023` are split at offsets 4, 2 and 0 instead.
    Ddmmyy8,
    /// Year and day of year. Not converted yet.
    Julian7,
    /// Day, abbreviated month and year, e.g. `15FEB23`
    Date9,
    /// Anything else, parsed as written
    Other,
}

impl DateFormat {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("DDMMYY8") => Self::Ddmmyy8,
            Some("JULIAN7") => Self::Julian7,
            Some("DATE9") => Self::Date9,
            _ => Self::Other,
        }
    }

    /// Reorders an already trimmed value into a layout [`parse_date`] understands.
    pub fn reorder(&self, value: &str) -> String {
        match self {
            Self::Ddmmyy8 if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) => {
                format!(
                    "{}-{}-{}",
                    substring(value, 4, None),
                    substring(value, 2, Some(4)),
                    substring(value, 0, Some(2))
                )
            }
            Self::Ddmmyy8 => format!(
                "{}-{}-{}",
                substring(value, 6, None),
                substring(value, 3, Some(5)),
                substring(value, 0, Some(2))
            ),
            // TODO: convert year and day-of-year into a calendar date once a JULIAN7 source exists to test against.
            Self::Julian7 => value.to_owned(),
            Self::Date9 => format!(
                "{} {} {}",
                substring(value, 0, Some(2)),
                substring(value, 2, Some(5)),
                substring(value, 5, None)
            ),
            Self::Other => value.to_owned(),
        }
    }
}

/// Character based substring with offsets clamped to the value's length.
fn substring(value: &str, start: usize, end: Option<usize>) -> &str {
    let offset = |index: usize| {
        value
            .char_indices()
            .nth(index)
            .map_or(value.len(), |(offset, _)| offset)
    };
    let start = offset(start);
    let end = end.map_or(value.len(), offset).max(start);
    &value[start..end]
}

static DAY_MONTH_SHORT_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[ -]([A-Za-z]+)[ -](\d{2})$").expect("Hardcode regex pattern")
});

static SLASH_SHORT_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2})$").expect("Hardcode regex pattern"));

static SHORT_YEAR_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})-(\d{1,2})-(\d{1,2})$").expect("Hardcode regex pattern"));

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%a %b %d %Y",
    "%A, %B %d, %Y",
];

/// Expands a two digit year: 00 to 49 map to 2000s, 50 to 99 to 1900s.
fn expand_year(year: &str) -> Option<i32> {
    let year: i32 = year.parse().ok()?;
    Some(if year < 50 { 2000 + year } else { 1900 + year })
}

fn midnight(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
}

fn parse_short_year(value: &str) -> Option<NaiveDateTime> {
    if let Some(captures) = DAY_MONTH_SHORT_YEAR.captures(value) {
        let year = expand_year(&captures[3])?;
        let text = format!("{} {} {}", &captures[1], &captures[2], year);
        return parse_with(&text, &["%d %b %Y", "%d %B %Y"]);
    }
    if let Some(captures) = SLASH_SHORT_YEAR.captures(value) {
        let year = expand_year(&captures[3])?;
        let month = captures[1].parse().ok()?;
        let day = captures[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day).and_then(midnight);
    }
    if let Some(captures) = SHORT_YEAR_DASH.captures(value) {
        let year = expand_year(&captures[1])?;
        let month = captures[2].parse().ok()?;
        let day = captures[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day).and_then(midnight);
    }
    None
}

fn parse_with(value: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(midnight)
}

/// Parses a date written in one of the common textual, slash or dash layouts.
///
/// Full month names are accepted wherever abbreviations are. Returns `None` when
/// nothing matches.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Some(datetime) = parse_short_year(value) {
        return Some(datetime);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_utc());
    }
    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(datetime);
    }
    parse_with(value, DATE_FORMATS)
}

/// Converts one raw date cell. Unparsable text becomes [`Cell::InvalidDate`].
pub fn normalize_value(format: DateFormat, raw: &str) -> Cell {
    let reordered = format.reorder(raw.trim());
    match parse_date(&reordered) {
        Some(datetime) => Cell::Date(datetime),
        None => {
            trace!(raw = %raw, reordered = %reordered, "unparsable date");
            Cell::InvalidDate(raw.to_owned())
        }
    }
}

/// Returns `message` with the text cells of every date column parsed into dates.
pub fn normalize_dates(mut message: TableMessage) -> TableMessage {
    message.normalize_dates_in_place();
    message
}

/// Like [`normalize_dates`] for a message that may be absent.
pub fn normalize_dates_opt(message: Option<TableMessage>) -> Option<TableMessage> {
    message.map(normalize_dates)
}

impl TableMessage {
    /// Parses the text cells of every date column in place.
    ///
    /// Cells that are not text, including dates parsed by an earlier pass, are left as is.
    pub fn normalize_dates_in_place(&mut self) {
        let targets: Vec<(usize, DateFormat)> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.kind.is_date())
            .map(|(index, column)| (index, DateFormat::from_name(column.format_name())))
            .collect();

        let mut invalid = 0usize;
        for (index, format) in targets {
            for row in self.data.iter_mut() {
                if let Cell::Text(raw) = &row[index] {
                    let cell = normalize_value(format, raw);
                    if matches!(cell, Cell::InvalidDate(_)) {
                        invalid += 1;
                    }
                    row[index] = cell;
                }
            }
        }
        if invalid > 0 {
            debug!(invalid, "date cells could not be parsed");
        }
    }
}
