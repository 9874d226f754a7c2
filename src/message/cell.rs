use chrono::NaiveDateTime;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

/// Output layout used when a date cell is written back out.
const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A single value in a table message row.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
    /// Missing value (`null` on the wire)
    #[default]
    Empty,
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Parsed date value
    Date(NaiveDateTime),
    /// Date text that could not be parsed, kept for diagnostics
    InvalidDate(String),
}

impl Cell {
    /// Returns the text content of a `Text` cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the date of a successfully parsed `Date` cell.
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Date(value) => Some(*value),
            _ => None,
        }
    }

    /// Loose non-zero test used to read selection flags.
    ///
    /// Text is converted the way a loose `!= 0` comparison would: trimmed, blank text is
    /// zero, `0x`/`0o`/`0b` prefixes are integers, `Infinity` is infinite and anything
    /// unreadable is NaN and therefore selected. Dates, missing values and invalid dates
    /// never equal zero.
    pub fn is_non_zero(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(value) => *value != 0.0,
            Cell::Text(value) => text_to_number(value) != 0.0,
            Cell::Date(_) | Cell::InvalidDate(_) => true,
        }
    }
}

/// Numeric reading of text for loose comparisons. Returns NaN when the text is not a number.
fn text_to_number(value: &str) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        return 0.0;
    }
    let radix = match value.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &value[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |number, digit| number * radix as f64 + digit as f64);
    }
    match value {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => (),
    }
    // Rust also reads `inf` and `nan` spellings, which are not numbers here
    if value.bytes().any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) {
        return f64::NAN;
    }
    value.parse::<f64>().unwrap_or(f64::NAN)
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::Date(value)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(value) => write!(f, "{}", value),
            Cell::Number(value) => write!(f, "{}", value),
            Cell::Date(value) => write!(f, "{}", value.format(DATE_OUTPUT_FORMAT)),
            Cell::InvalidDate(_) => write!(f, "Invalid Date"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty | Cell::InvalidDate(_) => serializer.serialize_none(),
            Cell::Text(value) => serializer.serialize_str(value),
            Cell::Number(value) => serializer.serialize_f64(*value),
            Cell::Date(value) => serializer.collect_str(&value.format(DATE_OUTPUT_FORMAT)),
        }
    }
}

struct CellVisitor;

impl<'de> Visitor<'de> for CellVisitor {
    type Value = Cell;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string, a number or null")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Cell, E> {
        Ok(Cell::Text(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Cell, E> {
        Ok(Cell::Text(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Cell, E> {
        Ok(Cell::Number(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Cell, E> {
        Ok(Cell::Number(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Cell, E> {
        Ok(Cell::Number(value as f64))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Cell, E> {
        Ok(Cell::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<Cell, E> {
        Ok(Cell::Empty)
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CellVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn non_zero_numbers() {
        assert!(!Cell::Number(0.0).is_non_zero());
        assert!(!Cell::Number(-0.0).is_non_zero());
        assert!(Cell::Number(5.0).is_non_zero());
        assert!(Cell::Number(f64::NAN).is_non_zero());
    }

    #[test]
    fn non_zero_text_is_loose() {
        assert!(!Cell::from("0").is_non_zero());
        assert!(!Cell::from(" 0.0 ").is_non_zero());
        assert!(!Cell::from("").is_non_zero());
        assert!(!Cell::from("   ").is_non_zero());
        assert!(Cell::from("1").is_non_zero());
        assert!(Cell::from("yes").is_non_zero());
    }

    #[test]
    fn non_zero_other_cells() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let later = NaiveDate::from_ymd_opt(2023, 2, 15).unwrap().and_hms_opt(0, 0, 0).unwrap();

        assert!(Cell::Date(epoch).is_non_zero());
        assert!(Cell::Date(later).is_non_zero());
        assert!(Cell::Empty.is_non_zero());
        assert!(Cell::InvalidDate("x".to_owned()).is_non_zero());
    }

    #[test]
    fn non_zero_prefixed_text() {
        assert!(!Cell::from("0x0").is_non_zero());
        assert!(!Cell::from(" 0X00 ").is_non_zero());
        assert!(!Cell::from("0b0").is_non_zero());
        assert!(!Cell::from("0o0").is_non_zero());
        assert!(Cell::from("0x1F").is_non_zero());
        assert!(Cell::from("0b2").is_non_zero());
        assert!(Cell::from("0x").is_non_zero());
    }

    #[test]
    fn text_numbers() {
        assert_eq!(text_to_number("0x1F"), 31.0);
        assert_eq!(text_to_number("0o17"), 15.0);
        assert_eq!(text_to_number("0b101"), 5.0);
        assert_eq!(text_to_number("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(text_to_number(" 1e3 "), 1000.0);
        assert_eq!(text_to_number(""), 0.0);
        assert!(text_to_number("inf").is_nan());
        assert!(text_to_number("NaN").is_nan());
        assert!(text_to_number("-0x1").is_nan());
    }

    #[test]
    fn decode_cells() {
        let cells: Vec<Cell> = serde_json::from_str(r#"["a", 1, 2.5, null]"#).unwrap();
        assert_eq!(
            cells,
            vec![Cell::from("a"), Cell::Number(1.0), Cell::Number(2.5), Cell::Empty]
        );
        assert!(serde_json::from_str::<Cell>("true").is_err());
    }

    #[test]
    fn encode_dates() {
        let date = NaiveDate::from_ymd_opt(2023, 2, 15).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let cells = vec![Cell::Date(date), Cell::InvalidDate("garbage".to_owned())];

        assert_eq!(
            serde_json::to_string(&cells).unwrap(),
            r#"["2023-02-15T00:00:00.000",null]"#
        );
    }
}
