//! Raw option values as they come out of a build file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One configuration record before validation: option name → raw value.
pub type RawRecord = BTreeMap<String, OptionValue>;

/// A single untyped option value.
///
/// Scalars get their own variant; lists and tables are kept as opaque JSON
/// so options owned by other components pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Json(serde_json::Value),
}

impl OptionValue {
    /// Human readable name of the value's type, used in validation errors.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Json(serde_json::Value::Array(_)) => "list",
            Self::Json(serde_json::Value::Object(_)) => "mapping",
            Self::Json(serde_json::Value::Null) => "null",
            Self::Json(_) => "value",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}
