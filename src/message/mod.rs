//! # Table Message Module
//!
//! Data model for the row and column bundle handed over by a data source before a
//! widget renders it. A [`TableMessage`] keeps its column descriptors and every row
//! aligned: each row holds exactly one cell per declared column.
use crate::error::TableMessageError;
use crate::message::cell::Cell;
use crate::message::column::Column;
use crate::message::parameter::Parameter;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cell;
pub mod column;
pub mod parameter;

/// Errors raised while building or decoding a table message.
#[derive(Error, Debug)]
pub enum MessageError {
    /// A row does not carry one cell per column
    #[error("Row {row} has {actual} cells but {expected} columns are declared")]
    RowWidthMismatch { row: usize, expected: usize, actual: usize },

    /// Column types do not match what the caller expects
    #[error("Column types [{actual}] do not match the expected layout")]
    SchemaMismatch { actual: String },
}

/// Wire shape of a message before the row width invariant is checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTableMessage {
    #[serde(default)]
    version: String,
    #[serde(default)]
    result_name: String,
    #[serde(default)]
    row_count: u64,
    #[serde(default)]
    available_row_count: u64,
    #[serde(default)]
    data: Vec<Vec<Cell>>,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    parameters: Vec<Parameter>,
}

/// Typed tabular result: column metadata, row-major data and optional parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTableMessage")]
pub struct TableMessage {
    version: String,
    result_name: String,
    row_count: u64,
    available_row_count: u64,
    pub(crate) data: Vec<Vec<Cell>>,
    pub(crate) columns: Vec<Column>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) parameters: Vec<Parameter>,
}

impl TryFrom<RawTableMessage> for TableMessage {
    type Error = MessageError;

    fn try_from(raw: RawTableMessage) -> Result<Self, Self::Error> {
        let message = TableMessage::new(&raw.version, &raw.result_name, raw.columns, raw.data)?
            .with_counts(raw.row_count, raw.available_row_count)
            .with_parameters(raw.parameters);
        Ok(message)
    }
}

impl TableMessage {
    /// Creates a message, checking that every row has one cell per column.
    ///
    /// Row counts default to the number of supplied rows.
    pub fn new(
        version: &str,
        result_name: &str,
        columns: Vec<Column>,
        data: Vec<Vec<Cell>>,
    ) -> Result<Self, MessageError> {
        if let Some((row, cells)) = data
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(MessageError::RowWidthMismatch {
                row,
                expected: columns.len(),
                actual: cells.len(),
            });
        }
        let rows = data.len() as u64;
        Ok(Self {
            version: version.to_owned(),
            result_name: result_name.to_owned(),
            row_count: rows,
            available_row_count: rows,
            data,
            columns,
            parameters: Vec::new(),
        })
    }

    /// Overrides the declared row counts.
    pub fn with_counts(mut self, row_count: u64, available_row_count: u64) -> Self {
        self.row_count = row_count;
        self.available_row_count = available_row_count;
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Decodes a message from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, TableMessageError> {
        let message: TableMessage = serde_json::from_str(json)?;
        Ok(message)
    }

    /// Decodes a message, prefixing any failure with `source` for diagnostics.
    pub fn from_json_named(source: &str, json: &str) -> Result<Self, TableMessageError> {
        let message = serde_json::from_str::<TableMessage>(json)
            .with_context(|| format!("Decode table message from '{}'", source))?;
        Ok(message)
    }

    /// Encodes the message back to JSON.
    pub fn to_json(&self) -> Result<String, TableMessageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn result_name(&self) -> &str {
        &self.result_name
    }

    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    pub fn available_row_count(&self) -> u64 {
        self.available_row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn data(&self) -> &[Vec<Cell>] {
        &self.data
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Returns the cell at the given row and column position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.data.get(row).and_then(|cells| cells.get(col))
    }

    /// Removes a column from the schema and the matching cell from every row.
    /// Returns the removed descriptor and cells in row order.
    pub(crate) fn remove_column(&mut self, index: usize) -> (Column, Vec<Cell>) {
        let column = self.columns.remove(index);
        let cells = self.data.iter_mut().map(|row| row.remove(index)).collect();
        (column, cells)
    }
}
