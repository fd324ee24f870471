//! Runtime value types for Verdict records and conditions
//!
//! `Value` mirrors JSON values. Objects are backed by `BTreeMap` so that
//! serialized results are byte-identical across repeated evaluations of
//! the same input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (f64 for simplicity, handles both int and float)
    Number(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (ordered key-value map)
    Object(BTreeMap<String, Value>),
}

/// One submitted data record: a map of top-level fields
pub type Record = BTreeMap<String, Value>;

impl Value {
    /// Coerce this value to a number, if possible.
    ///
    /// Numbers pass through; numeric-looking strings are parsed. Every
    /// other variant yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Returns true for `Value::Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render this value as a plain string for template substitution.
    ///
    /// Whole numbers drop the trailing `.0`; `Null` renders empty.
    pub fn display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Value::String(s) => s.clone(),
            // Arrays and objects fall back to their JSON form
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
