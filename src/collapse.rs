use crate::message::parameter::ParameterValue;
use crate::message::TableMessage;
use std::collections::HashMap;

/// Flattens the message parameters into a label to value map. Later labels win.
pub fn collapse_parameters(message: &TableMessage) -> HashMap<String, ParameterValue> {
    message
        .parameters()
        .iter()
        .map(|parameter| (parameter.label.clone(), parameter.value.clone()))
        .collect()
}

impl TableMessage {
    /// See [`collapse_parameters`].
    pub fn collapse_parameters(&self) -> HashMap<String, ParameterValue> {
        collapse_parameters(self)
    }
}
