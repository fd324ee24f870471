//! Decision-table to ruleset translation
//!
//! Translation is all-or-nothing: the whole table is validated first
//! and the first structural problem aborts with an error naming the
//! offending row. No partial ruleset is ever produced.

use crate::error::{Result, TranslationError};
use crate::table::{DecisionTable, TableRow};
use std::collections::BTreeSet;
use verdict_core::{ActionDef, Condition, Rule, RuleSet, Value};
use verdict_engine::EvaluationOptions;

/// Everything a translated table produces: a transient ruleset, the
/// actions synthesized for its output cells, and the evaluation options
/// implied by its hit policy. Callers register these together.
#[derive(Debug, Clone)]
pub struct TranslatedTable {
    pub ruleset: RuleSet,
    pub actions: Vec<ActionDef>,
    pub options: EvaluationOptions,
}

/// Translate a decision table into an executable ruleset.
///
/// Hit policy FIRST maps to `stop_on_first_match`; COLLECT evaluates
/// every row and accumulates score. Row order is preserved through
/// descending priorities, first row highest.
pub fn translate(table: &DecisionTable) -> Result<TranslatedTable> {
    let stop_on_first_match = match table.hit_policy.as_str() {
        "FIRST" => true,
        "COLLECT" => false,
        other => return Err(TranslationError::UnsupportedHitPolicy(other.to_string())),
    };

    if table.id.trim().is_empty() {
        return Err(TranslationError::Invalid(
            "table id must not be empty".to_string(),
        ));
    }
    if table.inputs.is_empty() {
        return Err(TranslationError::EmptyTable(format!(
            "table '{}' declares no input columns",
            table.id
        )));
    }
    if table.rows.is_empty() {
        return Err(TranslationError::EmptyTable(format!(
            "table '{}' has no rows",
            table.id
        )));
    }

    let mut seen_ids = BTreeSet::new();
    for row in &table.rows {
        if !seen_ids.insert(row.id.as_str()) {
            return Err(TranslationError::DuplicateRowId(row.id.clone()));
        }
        if row.inputs.len() != table.inputs.len() {
            return Err(TranslationError::InputArityMismatch {
                row: row.id.clone(),
                expected: table.inputs.len(),
                found: row.inputs.len(),
            });
        }
        if row.outputs.len() != table.outputs.len() {
            return Err(TranslationError::OutputArityMismatch {
                row: row.id.clone(),
                expected: table.outputs.len(),
                found: row.outputs.len(),
            });
        }
    }

    let row_count = table.rows.len();
    let mut rules = Vec::with_capacity(row_count);
    let mut actions = Vec::new();

    for (index, row) in table.rows.iter().enumerate() {
        let conditions = row_conditions(table, row);
        let mut patterns = Vec::with_capacity(table.outputs.len());
        for (column, cell) in table.outputs.iter().zip(&row.outputs) {
            match &column.action {
                Some(pattern) => patterns.push(pattern.clone()),
                None => {
                    let pattern = format!("{}.{}.{}", table.id, column.name, row.id);
                    actions.push(ActionDef::literal(&pattern, cell.clone()));
                    patterns.push(pattern);
                }
            }
        }

        rules.push(
            Rule::new(format!("{}.{}", table.id, row.id), conditions)
                .with_priority((row_count - index) as i32)
                .with_weight(1.0)
                .with_actions(patterns),
        );
    }

    let mut options = EvaluationOptions::default();
    options.stop_on_first_match = stop_on_first_match;

    Ok(TranslatedTable {
        ruleset: RuleSet::new(&table.id).with_rules(rules),
        actions,
        options,
    })
}

/// AND of the row's non-wildcard input cells. A row of all wildcards
/// yields an empty AND, which matches every record.
fn row_conditions(table: &DecisionTable, row: &TableRow) -> Condition {
    let leaves = table
        .inputs
        .iter()
        .zip(&row.inputs)
        .filter(|(_, cell)| !is_wildcard(cell))
        .map(|(column, cell)| Condition::leaf(&column.field, column.operator, cell.clone()))
        .collect();
    Condition::all(leaves)
}

fn is_wildcard(cell: &Value) -> bool {
    match cell {
        Value::Null => true,
        Value::String(s) => s == "-",
        _ => false,
    }
}
