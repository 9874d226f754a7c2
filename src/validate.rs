//! Column type validation for table messages.
use crate::message::column::ColumnType;
use crate::message::TableMessage;
use tracing::debug;

/// Types accepted for columns beyond the required prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionalTypes {
    /// Compared positionally against the trailing columns until either side runs out
    List(Vec<ColumnType>),
    /// Every trailing column must have this type
    Single(ColumnType),
}

impl From<ColumnType> for OptionalTypes {
    fn from(value: ColumnType) -> Self {
        OptionalTypes::Single(value)
    }
}

impl From<Vec<ColumnType>> for OptionalTypes {
    fn from(value: Vec<ColumnType>) -> Self {
        OptionalTypes::List(value)
    }
}

/// Checks the declared column types of `message` against an expected layout.
///
/// The first `expected.len()` columns must match `expected` exactly and in order.
/// Columns beyond that are rejected when `optional` is `None`, otherwise they are
/// checked against `optional`. Row data is never inspected.
pub fn validate(message: &TableMessage, expected: &[ColumnType], optional: Option<&OptionalTypes>) -> bool {
    let columns = message.columns();
    if columns.len() < expected.len() {
        debug!(columns = columns.len(), expected = expected.len(), "too few columns");
        return false;
    }

    let (required, extra) = columns.split_at(expected.len());
    if let Some(index) = required
        .iter()
        .zip(expected)
        .position(|(column, kind)| column.kind != *kind)
    {
        debug!(index, "required column type mismatch");
        return false;
    }

    if extra.is_empty() {
        return true;
    }

    let accepted = match optional {
        None => false,
        Some(OptionalTypes::List(kinds)) => extra
            .iter()
            .zip(kinds)
            .all(|(column, kind)| column.kind == *kind),
        Some(OptionalTypes::Single(kind)) => extra.iter().all(|column| column.kind == *kind),
    };
    if !accepted {
        debug!(extra = extra.len(), "optional column types rejected");
    }
    accepted
}

impl TableMessage {
    /// See [`validate`].
    pub fn validate(&self, expected: &[ColumnType], optional: Option<&OptionalTypes>) -> bool {
        validate(self, expected, optional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::column::Column;
    use crate::message::column::ColumnType::{Date, Number, String};

    fn message(kinds: &[ColumnType]) -> TableMessage {
        let columns = kinds
            .iter()
            .enumerate()
            .map(|(index, kind)| Column::new(&format!("c{index}"), *kind))
            .collect();
        TableMessage::new("1", "r", columns, vec![]).unwrap()
    }

    #[test]
    fn exact_match_without_optional() {
        assert!(validate(&message(&[String, Number]), &[String, Number], None));
    }

    #[test]
    fn extra_column_without_optional_fails() {
        assert!(!validate(&message(&[String, Number, Number]), &[String, Number], None));
    }

    #[test]
    fn too_few_columns_fails() {
        assert!(!validate(&message(&[String]), &[String, Number], None));
    }

    #[test]
    fn required_prefix_is_positional() {
        assert!(!validate(&message(&[Number, String]), &[String, Number], None));
    }

    #[test]
    fn optional_list_compares_overlap_only() {
        let optional = OptionalTypes::from(vec![Number]);
        // more extra columns than optional entries
        assert!(validate(&message(&[String, Number, Date]), &[String], Some(&optional)));

        let optional = OptionalTypes::from(vec![Number, Date, Date]);
        // fewer extra columns than optional entries
        assert!(validate(&message(&[String, Number]), &[String], Some(&optional)));

        let optional = OptionalTypes::from(vec![Number, Number]);
        assert!(!validate(&message(&[String, Number, Date]), &[String], Some(&optional)));
    }

    #[test]
    fn optional_single_applies_to_every_extra_column() {
        let optional = OptionalTypes::from(Number);
        assert!(validate(&message(&[Date, Number, Number, Number]), &[Date], Some(&optional)));
        assert!(!validate(&message(&[Date, Number, String]), &[Date], Some(&optional)));
    }

    #[test]
    fn extra_column_outside_optional_flips_result() {
        let optional = OptionalTypes::from(Number);
        let valid = message(&[String, Number]);
        assert!(valid.validate(&[String], Some(&optional)));

        let invalid = message(&[String, Number, Date]);
        assert!(!invalid.validate(&[String], Some(&optional)));
    }
}
