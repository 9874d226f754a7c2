use crate::message::column::ColumnType;
use crate::message::parameter::ParameterValue;
use crate::message::{MessageError, TableMessage};
use crate::options::Options;
use crate::selection::Selection;
use crate::validate::{validate, OptionalTypes};
use std::collections::HashMap;

/// A message ready for rendering together with the values derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Prepared {
    pub message: TableMessage,
    pub selections: Vec<Selection>,
    pub parameters: HashMap<String, ParameterValue>,
}

/// Validates the column layout, then extracts selections, parses dates and collapses
/// parameters.
pub fn prepare(
    mut message: TableMessage,
    expected: &[ColumnType],
    optional: Option<&OptionalTypes>,
    options: &Options,
) -> Result<Prepared, MessageError> {
    if !validate(&message, expected, optional) {
        let actual = message
            .columns()
            .iter()
            .map(|column| column.kind.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(MessageError::SchemaMismatch { actual });
    }
    let selections = message.extract_selections_with_in_place(&options.brush_usage);
    message.normalize_dates_in_place();
    let parameters = message.collapse_parameters();
    Ok(Prepared {
        message,
        selections,
        parameters,
    })
}
