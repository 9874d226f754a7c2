use crate::error::{ResultMessage, TableMessageError};
use crate::message::column::BRUSH_USAGE;
use serde::Deserialize;
use std::time::Duration;

/// Default quiet period of the resize debouncer, in milliseconds.
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 25;

/// Widget level settings. Every field is optional on the wire and falls back to its default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Usage tag identifying selection columns
    pub brush_usage: String,
    /// Quiet period after the last resize notification
    pub quiet_period_ms: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            brush_usage: BRUSH_USAGE.to_owned(),
            quiet_period_ms: DEFAULT_QUIET_PERIOD_MS,
        }
    }
}

impl Options {
    pub fn from_json(json: &str) -> Result<Self, TableMessageError> {
        serde_json::from_str::<Options>(json)
            .map_err(TableMessageError::from)
            .with_prefix("Decode widget options")
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert_eq!(options.brush_usage, "brush");
        assert_eq!(options.quiet_period(), Duration::from_millis(25));
    }

    #[test]
    fn partial_json() {
        let options = Options::from_json(r#"{"quietPeriodMs": 100}"#).unwrap();
        assert_eq!(options.quiet_period_ms, 100);
        assert_eq!(options.brush_usage, "brush");

        let error = Options::from_json(r#"{"quietPeriodMs": "soon"}"#).unwrap_err();
        assert!(error.to_string().starts_with("Decode widget options: "), "{error}");
    }
}
