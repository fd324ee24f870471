//! Condition matcher
//!
//! Evaluates a condition tree against a record. Matching is total: it
//! never fails and has no side effects. Type-incompatible comparisons
//! evaluate to false rather than raising.

use crate::field_lookup::lookup_field;
use verdict_core::{BoolOp, ComparisonOp, Condition, Record, Value};

/// Evaluate a condition tree against a record.
///
/// Absent fields: `exists` is false, `ne` is true (absence counts as
/// inequality), every other operator is false. Composites short-circuit:
/// AND stops at the first false child, OR at the first true child, NOT
/// negates its single child. An empty AND is vacuously true and an empty
/// OR false; model validation rejects empty composites in hand-authored
/// input, but decision-table wildcard rows rely on the vacuous AND.
pub fn matches(condition: &Condition, record: &Record) -> bool {
    match condition {
        Condition::Leaf {
            field,
            operator,
            value,
        } => match_leaf(field, *operator, value, record),
        Condition::Composite { op, children } => match op {
            BoolOp::And => children.iter().all(|c| matches(c, record)),
            BoolOp::Or => children.iter().any(|c| matches(c, record)),
            BoolOp::Not => children.first().map(|c| !matches(c, record)).unwrap_or(false),
        },
    }
}

fn match_leaf(field: &str, op: ComparisonOp, literal: &Value, record: &Record) -> bool {
    let actual = match lookup_field(record, field) {
        Some(v) => v,
        None => {
            return match op {
                ComparisonOp::Exists => false,
                ComparisonOp::Ne => true,
                _ => false,
            }
        }
    };

    match op {
        ComparisonOp::Exists => true,
        ComparisonOp::Eq => actual == literal,
        ComparisonOp::Ne => actual != literal,
        ComparisonOp::Gt => compare_order(actual, literal, |o| o == std::cmp::Ordering::Greater),
        ComparisonOp::Gte => compare_order(actual, literal, |o| o != std::cmp::Ordering::Less),
        ComparisonOp::Lt => compare_order(actual, literal, |o| o == std::cmp::Ordering::Less),
        ComparisonOp::Lte => compare_order(actual, literal, |o| o != std::cmp::Ordering::Greater),
        ComparisonOp::In => value_in(actual, literal),
        ComparisonOp::Contains => value_contains(actual, literal),
    }
}

/// Ordering comparison with numeric coercion.
///
/// Both sides are coerced via `as_number` (numbers pass through, numeric
/// strings parse); anything non-coercible makes the comparison false.
fn compare_order(actual: &Value, literal: &Value, check: fn(std::cmp::Ordering) -> bool) -> bool {
    match (actual.as_number(), literal.as_number()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).map(check).unwrap_or(false),
        _ => false,
    }
}

/// `in`: the field value is a member of the literal array, or a substring
/// of the literal string.
fn value_in(actual: &Value, literal: &Value) -> bool {
    match literal {
        Value::Array(items) => items.iter().any(|item| item == actual),
        Value::String(s) => match actual {
            Value::String(needle) => s.contains(needle.as_str()),
            _ => false,
        },
        _ => false,
    }
}

/// `contains`: the field array contains the literal, or the field string
/// contains the literal substring.
fn value_contains(actual: &Value, literal: &Value) -> bool {
    match actual {
        Value::Array(items) => items.iter().any(|item| item == literal),
        Value::String(s) => match literal {
            Value::String(needle) => s.contains(needle.as_str()),
            _ => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(entries: &[(&str, Value)]) -> Record {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn nested_record() -> Record {
        let mut user = BTreeMap::new();
        user.insert("age".to_string(), Value::Number(30.0));
        user.insert("name".to_string(), Value::String("Alice".to_string()));
        record(&[
            ("user", Value::Object(user)),
            ("amount", Value::Number(1500.0)),
            ("country", Value::String("DE".to_string())),
            (
                "tags",
                Value::Array(vec![
                    Value::String("vip".to_string()),
                    Value::String("beta".to_string()),
                ]),
            ),
        ])
    }

    #[test]
    fn test_eq_and_ne() {
        let rec = nested_record();
        assert!(matches(
            &Condition::leaf("country", ComparisonOp::Eq, Value::String("DE".into())),
            &rec
        ));
        assert!(!matches(
            &Condition::leaf("country", ComparisonOp::Eq, Value::String("FR".into())),
            &rec
        ));
        assert!(matches(
            &Condition::leaf("country", ComparisonOp::Ne, Value::String("FR".into())),
            &rec
        ));
    }

    #[test]
    fn test_ordering_operators() {
        let rec = nested_record();
        assert!(matches(
            &Condition::leaf("amount", ComparisonOp::Gt, Value::Number(1000.0)),
            &rec
        ));
        assert!(matches(
            &Condition::leaf("amount", ComparisonOp::Gte, Value::Number(1500.0)),
            &rec
        ));
        assert!(!matches(
            &Condition::leaf("amount", ComparisonOp::Lt, Value::Number(1000.0)),
            &rec
        ));
        assert!(matches(
            &Condition::leaf("user.age", ComparisonOp::Lte, Value::Number(30.0)),
            &rec
        ));
    }

    #[test]
    fn test_numeric_string_coercion() {
        let rec = record(&[("limit", Value::String("250".to_string()))]);
        assert!(matches(
            &Condition::leaf("limit", ComparisonOp::Gt, Value::Number(100.0)),
            &rec
        ));
        // Literal side coerces too
        assert!(matches(
            &Condition::leaf("limit", ComparisonOp::Lt, Value::String("1000".to_string())),
            &rec
        ));
    }

    #[test]
    fn test_type_incompatible_comparison_is_false() {
        let rec = record(&[("name", Value::String("Alice".to_string()))]);
        assert!(!matches(
            &Condition::leaf("name", ComparisonOp::Gt, Value::Number(10.0)),
            &rec
        ));
        let rec = record(&[("flag", Value::Bool(true))]);
        assert!(!matches(
            &Condition::leaf("flag", ComparisonOp::Lte, Value::Number(1.0)),
            &rec
        ));
    }

    #[test]
    fn test_absent_field_semantics() {
        let empty: Record = Record::new();
        // {field:"x.y", op:"eq", value:1} on {} evaluates to false
        assert!(!matches(
            &Condition::leaf("x.y", ComparisonOp::Eq, Value::Number(1.0)),
            &empty
        ));
        // exists on {} evaluates to false
        assert!(!matches(&Condition::exists("x.y"), &empty));
        // ne evaluates to true against any literal when the field is absent
        assert!(matches(
            &Condition::leaf("x.y", ComparisonOp::Ne, Value::Number(1.0)),
            &empty
        ));
        // remaining operators are false against an absent field
        assert!(!matches(
            &Condition::leaf("x.y", ComparisonOp::Gt, Value::Number(0.0)),
            &empty
        ));
        assert!(!matches(
            &Condition::leaf("x.y", ComparisonOp::In, Value::Array(vec![Value::Null])),
            &empty
        ));
    }

    #[test]
    fn test_in_operator() {
        let rec = nested_record();
        assert!(matches(
            &Condition::leaf(
                "country",
                ComparisonOp::In,
                Value::Array(vec![
                    Value::String("DE".to_string()),
                    Value::String("FR".to_string())
                ])
            ),
            &rec
        ));
        assert!(!matches(
            &Condition::leaf(
                "country",
                ComparisonOp::In,
                Value::Array(vec![Value::String("US".to_string())])
            ),
            &rec
        ));
        // Substring form
        assert!(matches(
            &Condition::leaf(
                "country",
                ComparisonOp::In,
                Value::String("DE,FR,IT".to_string())
            ),
            &rec
        ));
    }

    #[test]
    fn test_contains_operator() {
        let rec = nested_record();
        assert!(matches(
            &Condition::leaf(
                "tags",
                ComparisonOp::Contains,
                Value::String("vip".to_string())
            ),
            &rec
        ));
        assert!(!matches(
            &Condition::leaf(
                "tags",
                ComparisonOp::Contains,
                Value::String("admin".to_string())
            ),
            &rec
        ));
        assert!(matches(
            &Condition::leaf(
                "user.name",
                ComparisonOp::Contains,
                Value::String("lic".to_string())
            ),
            &rec
        ));
    }

    #[test]
    fn test_composite_and_or_not() {
        let rec = nested_record();
        let both = Condition::all(vec![
            Condition::leaf("amount", ComparisonOp::Gt, Value::Number(1000.0)),
            Condition::leaf("country", ComparisonOp::Eq, Value::String("DE".into())),
        ]);
        assert!(matches(&both, &rec));

        let either = Condition::any(vec![
            Condition::leaf("amount", ComparisonOp::Gt, Value::Number(99999.0)),
            Condition::leaf("country", ComparisonOp::Eq, Value::String("DE".into())),
        ]);
        assert!(matches(&either, &rec));

        let negated = Condition::negate(Condition::leaf(
            "country",
            ComparisonOp::Eq,
            Value::String("US".into()),
        ));
        assert!(matches(&negated, &rec));
    }

    #[test]
    fn test_empty_composites() {
        let rec = nested_record();
        assert!(matches(&Condition::all(vec![]), &rec));
        assert!(!matches(&Condition::any(vec![]), &rec));
    }

    #[test]
    fn test_present_null_exists() {
        let rec = record(&[("note", Value::Null)]);
        assert!(matches(&Condition::exists("note"), &rec));
        assert!(matches(
            &Condition::leaf("note", ComparisonOp::Eq, Value::Null),
            &rec
        ));
    }
}
