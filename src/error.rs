use thiserror::Error;

/// Main error type for the table message library.
/// Aggregates errors from decoding, schema construction and the preparation pipeline.
#[derive(Error, Debug)]
pub enum TableMessageError {
    #[error("{0}")]
    WithContextError(String),

    #[error("{0:#}")]
    AnyhowError(#[from] anyhow::Error),

    // Third-party library errors
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    // Message module errors
    #[error("{0}")]
    MessageError(#[from] crate::message::MessageError),

    #[error("{0}")]
    ColumnError(#[from] crate::message::column::ColumnError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, TableMessageError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| TableMessageError::WithContextError(format!("{}: {}", message, e)))
    }
}
