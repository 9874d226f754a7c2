//! Extraction of brush columns into a selection list.
use crate::message::column::BRUSH_USAGE;
use crate::message::TableMessage;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A selected row, indexed into the row sequence at extraction time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub row: usize,
}

/// Removes every brush column from `message` and returns the rows they flag.
pub fn extract_selections(mut message: TableMessage) -> (TableMessage, Vec<Selection>) {
    let selections = message.extract_selections_in_place();
    (message, selections)
}

/// Like [`extract_selections`] for a message that may be absent.
pub fn extract_selections_opt(message: Option<TableMessage>) -> Option<(TableMessage, Vec<Selection>)> {
    message.map(extract_selections)
}

impl TableMessage {
    /// Removes brush columns in place. See [`TableMessage::extract_selections_with_in_place`].
    pub fn extract_selections_in_place(&mut self) -> Vec<Selection> {
        self.extract_selections_with_in_place(BRUSH_USAGE)
    }

    /// Removes every column tagged with `usage` from the schema and from every row.
    ///
    /// Columns are found by rescanning the shrinking column list, so adjacent brush
    /// columns are all removed. Each row whose cell in a removed column is non-zero
    /// contributes one selection, in column order then row order.
    pub fn extract_selections_with_in_place(&mut self, usage: &str) -> Vec<Selection> {
        let mut selections = Vec::new();
        while let Some(index) = self.columns.iter().position(|column| column.has_usage(usage)) {
            let (column, cells) = self.remove_column(index);
            let before = selections.len();
            selections.extend(
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.is_non_zero())
                    .map(|(row, _)| Selection { row }),
            );
            trace!(column = %column.name, index, selected = selections.len() - before, "removed brush column");
        }
        if !selections.is_empty() {
            debug!(selected = selections.len(), "extracted selections");
        }
        selections
    }
}
