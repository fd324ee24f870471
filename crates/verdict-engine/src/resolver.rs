//! Action resolver
//!
//! Maps a matched action pattern to a concrete effect. Resolution fails
//! locally: a catalog miss yields `None` and is recorded as a warning by
//! the evaluator, never aborting the enclosing evaluation.

use crate::catalog::CatalogView;
use crate::field_lookup::lookup_field;
use verdict_core::{ArithOp, EffectSpec, Operand, Record, Value};

/// A resolved action effect attached to an execution result
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedEffect {
    /// The action pattern that produced this effect
    pub pattern: String,

    /// The materialized effect value
    pub value: Value,
}

/// Resolves action patterns against a catalog view
pub struct ActionResolver<'a> {
    catalog: &'a dyn CatalogView,
}

impl<'a> ActionResolver<'a> {
    /// Create a resolver over a catalog view
    pub fn new(catalog: &'a dyn CatalogView) -> Self {
        Self { catalog }
    }

    /// Resolve a pattern into a concrete effect for the given record.
    ///
    /// Returns `None` when the pattern is not in the catalog.
    pub fn resolve(&self, pattern: &str, record: &Record) -> Option<ResolvedEffect> {
        let action = self.catalog.action(pattern)?;
        let value = match &action.effect {
            EffectSpec::Literal { value } => value.clone(),
            EffectSpec::Template { template } => {
                Value::String(render_template(template, record))
            }
            EffectSpec::Computed { left, op, right } => eval_computed(left, *op, right, record),
        };
        Some(ResolvedEffect {
            pattern: pattern.to_string(),
            value,
        })
    }
}

/// Substitute `{field.path}` placeholders with record values.
///
/// Absent fields render as the empty string; unterminated braces are kept
/// verbatim.
fn render_template(template: &str, record: &Record) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        match rest[open..].find('}') {
            Some(close) => {
                let path = &rest[open + 1..open + close];
                if let Some(value) = lookup_field(record, path) {
                    out.push_str(&value.display_string());
                }
                rest = &rest[open + close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Evaluate a computed effect over the record.
///
/// Non-numeric operands and division by zero yield `Value::Null`; a
/// resolution must never fail an otherwise-valid rule match.
fn eval_computed(left: &Operand, op: ArithOp, right: &Operand, record: &Record) -> Value {
    let (a, b) = match (operand_number(left, record), operand_number(right, record)) {
        (Some(a), Some(b)) => (a, b),
        _ => return Value::Null,
    };
    let result = match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => {
            if b == 0.0 {
                return Value::Null;
            }
            a / b
        }
    };
    Value::Number(result)
}

fn operand_number(operand: &Operand, record: &Record) -> Option<f64> {
    match operand {
        Operand::Literal { value } => Some(*value),
        Operand::Field { field } => lookup_field(record, field).and_then(|v| v.as_number()),
    }
}
