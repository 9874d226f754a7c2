use serde::{Deserialize, Serialize};

/// Value of a labeled parameter, either one string or an ordered list of strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Single(String),
    List(Vec<String>),
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Single(value.to_owned())
    }
}

impl From<Vec<&str>> for ParameterValue {
    fn from(values: Vec<&str>) -> Self {
        ParameterValue::List(values.into_iter().map(str::to_owned).collect())
    }
}

/// A labeled parameter attached to a table message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub label: String,
    pub value: ParameterValue,
}

impl Parameter {
    pub fn new(label: &str, value: impl Into<ParameterValue>) -> Self {
        Self {
            label: label.to_owned(),
            value: value.into(),
        }
    }
}
