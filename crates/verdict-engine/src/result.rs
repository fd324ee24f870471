//! Execution result types

use crate::error::EngineError;
use crate::resolver::ResolvedEffect;
use crate::workflow::WorkflowOutcome;
use serde::{Deserialize, Serialize};

/// Non-fatal issue attached to an execution result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Offending action pattern
    pub pattern: String,

    /// Human-readable message
    pub message: String,
}

impl Warning {
    /// Warning for an action pattern missing from the catalog
    pub fn unresolved_pattern(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let message = format!("action pattern '{}' not found in catalog", pattern);
        Self { pattern, message }
    }
}

/// Result of evaluating one record against one ruleset snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Name of the evaluated ruleset
    pub ruleset: String,

    /// Snapshot version the evaluation was bound to
    pub ruleset_version: u64,

    /// Ids of matched rules, in evaluation order
    pub matched_rule_ids: Vec<String>,

    /// Sum of matched rule weights
    pub score: f64,

    /// Resolved action effects, in first-seen pattern order
    pub actions: Vec<ResolvedEffect>,

    /// Non-fatal warnings (e.g. unresolved action patterns)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

/// Error entry for one failed execution or batch item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionError {
    /// Machine-readable error kind
    pub kind: String,

    /// Human-readable message
    pub message: String,

    /// Offending rule/stage/ruleset identifier, where applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl ExecutionError {
    /// Create an execution error
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            identifier: None,
        }
    }

    /// Attach the offending identifier
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

impl From<&EngineError> for ExecutionError {
    fn from(err: &EngineError) -> Self {
        let identifier = match err {
            EngineError::RulesetNotFound(name) => Some(name.clone()),
            _ => None,
        };
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
            identifier,
        }
    }
}

/// Successful output of one batch item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemOutput {
    /// Single-ruleset evaluation output
    Execution(ExecutionResult),
    /// Workflow execution output
    Workflow(WorkflowOutcome),
}

/// One entry of a batch result, in submission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchEntry {
    /// Item evaluated successfully
    Ok { output: ItemOutput },
    /// Item failed; the failure is isolated to this entry
    Error { error: ExecutionError },
}

impl BatchEntry {
    /// True for `Ok` entries
    pub fn is_ok(&self) -> bool {
        matches!(self, BatchEntry::Ok { .. })
    }
}

/// Aggregate statistics over a completed batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// `succeeded / total * 100`, 0.0 for an empty batch
    pub success_rate: f64,
}

impl BatchSummary {
    /// Compute the summary from completed entries
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let total = entries.len();
        let succeeded = entries.iter().filter(|e| e.is_ok()).count();
        let failed = total - succeeded;
        let success_rate = if total == 0 {
            0.0
        } else {
            succeeded as f64 / total as f64 * 100.0
        };
        Self {
            total,
            succeeded,
            failed,
            success_rate,
        }
    }
}

/// Result of a batch execution, immutable once returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Opaque batch identifier
    pub batch_id: String,

    /// Per-item results, preserving submission order
    pub results: Vec<BatchEntry>,

    /// Aggregate statistics, computed after all items complete
    pub summary: BatchSummary,
}
