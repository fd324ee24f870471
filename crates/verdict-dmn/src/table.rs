//! Decision-table definition model

use crate::error::Result;
use serde::{Deserialize, Serialize};
use verdict_core::{ComparisonOp, Value};

/// An input column: which record field the column tests, and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputColumn {
    /// Dotted field path into the record
    pub field: String,

    /// Comparison applied between the field and each row's cell
    #[serde(default = "default_operator")]
    pub operator: ComparisonOp,
}

fn default_operator() -> ComparisonOp {
    ComparisonOp::Eq
}

/// An output column: the name of the produced value and, optionally,
/// an existing catalog action pattern it maps to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputColumn {
    pub name: String,

    /// Catalog action pattern to reference instead of synthesizing one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// One table row: input cells in column order, output cells in column
/// order. A `null` or `"-"` input cell is a wildcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: String,

    #[serde(default)]
    pub inputs: Vec<Value>,

    #[serde(default)]
    pub outputs: Vec<Value>,
}

/// A complete decision table definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTable {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// FIRST or COLLECT
    #[serde(default = "default_hit_policy")]
    pub hit_policy: String,

    pub inputs: Vec<InputColumn>,

    #[serde(default)]
    pub outputs: Vec<OutputColumn>,

    #[serde(default)]
    pub rows: Vec<TableRow>,
}

fn default_hit_policy() -> String {
    "COLLECT".to_string()
}

impl DecisionTable {
    /// Parse a table definition from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parse a table definition from JSON text.
    ///
    /// JSON is a YAML subset, so this goes through the same parser and
    /// reports errors the same way.
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_yaml(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
id: loan_approval
name: Loan approval table
hit_policy: FIRST
inputs:
  - field: amount
    operator: gt
  - field: risk.tier
outputs:
  - name: decision
rows:
  - id: r1
    inputs: [10000, "high"]
    outputs: ["reject"]
  - id: r2
    inputs: [null, "-"]
    outputs: ["approve"]
"#;

    #[test]
    fn test_parse_yaml() {
        let table = DecisionTable::from_yaml(YAML).unwrap();
        assert_eq!(table.id, "loan_approval");
        assert_eq!(table.hit_policy, "FIRST");
        assert_eq!(table.inputs.len(), 2);
        assert_eq!(table.inputs[0].operator, ComparisonOp::Gt);
        // Omitted operator defaults to eq
        assert_eq!(table.inputs[1].operator, ComparisonOp::Eq);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].inputs[0], Value::Null);
        assert_eq!(table.rows[1].inputs[1], Value::String("-".to_string()));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "id": "t1",
            "inputs": [{"field": "country"}],
            "outputs": [{"name": "flag"}],
            "rows": [{"id": "r1", "inputs": ["DE"], "outputs": [true]}]
        }"#;
        let table = DecisionTable::from_json(json).unwrap();
        assert_eq!(table.hit_policy, "COLLECT");
        assert_eq!(table.rows[0].outputs[0], Value::Bool(true));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DecisionTable::from_yaml("rows: {not: [valid").is_err());
    }
}
