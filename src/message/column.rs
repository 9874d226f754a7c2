use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Usage tag marking a column that carries row selection state.
pub const BRUSH_USAGE: &str = "brush";

/// Errors related to column type parsing and validation.
#[derive(Error, Debug)]
pub enum ColumnError {
    #[error("Invalid column type '{0}'")]
    TypeError(String),
}

/// Declared column data types of a table message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnType {
    /// Free text values
    String,
    /// Numeric values
    Number,
    /// Date values, usually string encoded until normalized
    Date,
}

impl ColumnType {
    /// Returns the type tag as it appears in a message.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
        }
    }

    /// Parses a column type tag. Tags are matched exactly.
    pub fn parse(name: &str) -> Result<Self, ColumnError> {
        match name {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "date" => Ok(Self::Date),
            _ => Err(ColumnError::TypeError(name.to_string())),
        }
    }

    /// Returns true if this column type represents date values.
    #[inline]
    pub fn is_date(&self) -> bool {
        matches!(self, ColumnType::Date)
    }
}

impl TryFrom<String> for ColumnType {
    type Error = ColumnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        value.as_str().to_owned()
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Describes how a raw cell should be presented or reordered before parsing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_string: Option<String>,
}

/// Column descriptor. Position in the column list matches the cell position in every row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name
    #[serde(default)]
    pub name: String,
    /// Display label
    #[serde(default)]
    pub label: String,
    /// Declared data type
    #[serde(rename = "type")]
    pub kind: ColumnType,
    /// Usage tag, `"brush"` for selection columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// Aggregation tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

impl Column {
    /// Creates a column whose label equals its name.
    pub fn new(name: &str, kind: ColumnType) -> Self {
        Self {
            name: name.to_owned(),
            label: name.to_owned(),
            kind,
            usage: None,
            aggregation: None,
            format: None,
        }
    }

    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = Some(usage.to_owned());
        self
    }

    pub fn with_aggregation(mut self, aggregation: &str) -> Self {
        self.aggregation = Some(aggregation.to_owned());
        self
    }

    /// Attaches a format descriptor carrying only a format name.
    pub fn with_format_name(mut self, name: &str) -> Self {
        self.format = Some(Format {
            name: Some(name.to_owned()),
            ..Format::default()
        });
        self
    }

    /// Returns true if the column's usage tag equals `usage`.
    #[inline]
    pub fn has_usage(&self, usage: &str) -> bool {
        self.usage.as_deref() == Some(usage)
    }

    /// Returns the format name, if any.
    pub fn format_name(&self) -> Option<&str> {
        self.format.as_ref().and_then(|format| format.name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exact_tags() {
        assert_eq!(ColumnType::parse("number").unwrap(), ColumnType::Number);
        assert_eq!(ColumnType::parse("date").unwrap(), ColumnType::Date);
        assert!(ColumnType::parse("NUMBER").is_err());
        assert!(ColumnType::parse("boolean").is_err());
    }

    #[test]
    fn decode_column_descriptor() {
        let column: Column = serde_json::from_str(
            r#"{"name":"d","label":"Day","type":"date","usage":"dimension",
                "format":{"name":"DATE9","width":9,"precision":0,"formatString":"DATE9."}}"#,
        )
        .unwrap();

        assert_eq!(column.kind, ColumnType::Date);
        assert_eq!(column.label, "Day");
        assert!(column.has_usage("dimension"));
        assert_eq!(column.format_name(), Some("DATE9"));
        assert_eq!(column.format.unwrap().format_string.as_deref(), Some("DATE9."));
    }

    #[test]
    fn reject_unknown_type() {
        let result = serde_json::from_str::<Column>(r#"{"name":"x","type":"blob"}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Invalid column type 'blob'"), "{message}");
    }
}
