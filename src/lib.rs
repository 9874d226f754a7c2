//! # Table Message Preparation
//!
//! Helpers that massage a table message (column metadata plus row-major data) before a
//! visualization widget renders it.
//!
//! ## Features
//!
//! - **Validation**: check declared column types against a required prefix and an
//!   optional trailing layout
//! - **Selections**: strip `brush` columns from the schema and every row into a list of
//!   selected rows
//! - **Dates**: parse string encoded date cells, reordering `DDMMYY8` and `DATE9` values
//!   first; unparsable values become an invalid date marker instead of an error
//! - **Parameters**: collapse labeled parameters into a map, last label wins
//! - **Resize debouncing**: coalesce bursts of resize notifications into one settled event
//!
//! Transformations come in two flavours: free functions that consume a message and
//! return the transformed one, and `*_in_place` methods on [`TableMessage`] for callers
//! that opt into mutation.
mod collapse;
mod dates;
mod error;
pub mod message;
mod options;
mod prepare;
mod resize;
mod selection;
mod validate;

pub use crate::collapse::collapse_parameters;
pub use crate::dates::{normalize_dates, normalize_dates_opt, normalize_value, parse_date, DateFormat};
pub use crate::error::TableMessageError;
pub use crate::message::cell::Cell;
pub use crate::message::column::{Column, ColumnType, Format, BRUSH_USAGE};
pub use crate::message::parameter::{Parameter, ParameterValue};
pub use crate::message::{MessageError, TableMessage};
pub use crate::options::{Options, DEFAULT_QUIET_PERIOD_MS};
pub use crate::prepare::{prepare, Prepared};
pub use crate::resize::{ResizeDebouncer, ResizeSettled, SubscriptionId};
pub use crate::selection::{extract_selections, extract_selections_opt, Selection};
pub use crate::validate::{validate, OptionalTypes};
