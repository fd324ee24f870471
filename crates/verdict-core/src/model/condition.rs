//! Condition tree definitions
//!
//! A condition is either a leaf predicate `{field, operator, value}` or a
//! boolean composite over child conditions. Conditions are immutable once
//! loaded into a rule.

use crate::error::{CoreError, Result};
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Comparison operator for leaf conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Contains,
    Exists,
}

/// Boolean operator for composite conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoolOp {
    And,
    Or,
    Not,
}

/// A predicate node evaluated against a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    /// Boolean composite over child conditions
    Composite { op: BoolOp, children: Vec<Condition> },

    /// Leaf predicate: field path, operator, literal
    Leaf {
        field: String,
        operator: ComparisonOp,
        #[serde(default = "null_value")]
        value: Value,
    },
}

fn null_value() -> Value {
    Value::Null
}

impl Condition {
    /// Create a leaf condition
    pub fn leaf(field: impl Into<String>, operator: ComparisonOp, value: Value) -> Self {
        Condition::Leaf {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Create an `exists` leaf condition
    pub fn exists(field: impl Into<String>) -> Self {
        Self::leaf(field, ComparisonOp::Exists, Value::Null)
    }

    /// Create an AND composite
    pub fn all(children: Vec<Condition>) -> Self {
        Condition::Composite {
            op: BoolOp::And,
            children,
        }
    }

    /// Create an OR composite
    pub fn any(children: Vec<Condition>) -> Self {
        Condition::Composite {
            op: BoolOp::Or,
            children,
        }
    }

    /// Create a NOT composite
    pub fn negate(child: Condition) -> Self {
        Condition::Composite {
            op: BoolOp::Not,
            children: vec![child],
        }
    }

    /// Validate the condition tree invariants.
    ///
    /// Leaves must reference a non-empty field path; AND/OR composites
    /// need at least one child and NOT exactly one.
    pub fn validate(&self) -> Result<()> {
        match self {
            Condition::Leaf { field, .. } => {
                if field.trim().is_empty() {
                    return Err(CoreError::Validation(
                        "condition field path must not be empty".to_string(),
                    ));
                }
                Ok(())
            }
            Condition::Composite { op, children } => {
                match op {
                    BoolOp::And | BoolOp::Or => {
                        if children.is_empty() {
                            return Err(CoreError::Validation(format!(
                                "{:?} condition requires at least one child",
                                op
                            )));
                        }
                    }
                    BoolOp::Not => {
                        if children.len() != 1 {
                            return Err(CoreError::Validation(format!(
                                "NOT condition requires exactly one child, found {}",
                                children.len()
                            )));
                        }
                    }
                }
                for child in children {
                    child.validate()?;
                }
                Ok(())
            }
        }
    }
}
