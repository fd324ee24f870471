//! Rule evaluator
//!
//! Evaluates one record against one ruleset snapshot: determines which
//! rules match, accumulates the weighted score, and resolves triggered
//! actions. Deterministic: identical `(record, ruleset snapshot)` inputs
//! yield byte-identical results across repeated calls.

use crate::catalog::CatalogView;
use crate::error::{EngineError, Result};
use crate::matcher::matches;
use crate::resolver::ActionResolver;
use crate::result::{ExecutionResult, Warning};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use verdict_core::{Record, RuleSet};

/// Caller-supplied evaluation options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOptions {
    /// Halt at the first matching rule instead of scoring the full pass
    #[serde(default)]
    pub stop_on_first_match: bool,
}

impl EvaluationOptions {
    /// First-match mode, used by the DMN `FIRST` hit policy
    pub fn first_match() -> Self {
        Self {
            stop_on_first_match: true,
        }
    }
}

/// Evaluates records against rulesets from a bound catalog view
pub struct RuleEvaluator {
    catalog: Arc<dyn CatalogView>,
}

impl RuleEvaluator {
    /// Create an evaluator bound to a catalog view
    pub fn new(catalog: Arc<dyn CatalogView>) -> Self {
        Self { catalog }
    }

    /// The bound catalog view
    pub fn catalog(&self) -> &Arc<dyn CatalogView> {
        &self.catalog
    }

    /// Evaluate a record against a ruleset.
    ///
    /// This is a full ordered pass: every enabled rule is considered and
    /// all matching weights aggregate, unless `stop_on_first_match` halts
    /// at the first match. Unresolved action patterns become warnings,
    /// never failures. The optional deadline is checked before each rule;
    /// expiry aborts the pass with `Timeout`.
    pub fn evaluate(
        &self,
        record: &Record,
        ruleset: &RuleSet,
        options: &EvaluationOptions,
        deadline: Option<Instant>,
    ) -> Result<ExecutionResult> {
        let mut matched_rule_ids = Vec::new();
        let mut score = 0.0f64;
        let mut pending_patterns: Vec<String> = Vec::new();

        for rule in ruleset.evaluation_order() {
            if let Some(limit) = deadline {
                if Instant::now() >= limit {
                    return Err(EngineError::Timeout(format!(
                        "evaluation of ruleset {} exceeded its deadline",
                        ruleset.name
                    )));
                }
            }
            if !matches(&rule.conditions, record) {
                continue;
            }
            debug!(rule = %rule.id, weight = rule.weight, "rule matched");
            score += rule.weight;
            matched_rule_ids.push(rule.id.clone());
            for pattern in &rule.actions {
                if !pending_patterns.iter().any(|p| p == pattern) {
                    pending_patterns.push(pattern.clone());
                }
            }
            if options.stop_on_first_match {
                break;
            }
        }

        let resolver = ActionResolver::new(self.catalog.as_ref());
        let mut actions = Vec::with_capacity(pending_patterns.len());
        let mut warnings = Vec::new();
        for pattern in &pending_patterns {
            match resolver.resolve(pattern, record) {
                Some(effect) => actions.push(effect),
                None => warnings.push(Warning::unresolved_pattern(pattern.clone())),
            }
        }

        Ok(ExecutionResult {
            ruleset: ruleset.name.clone(),
            ruleset_version: ruleset.version,
            matched_rule_ids,
            score,
            actions,
            warnings,
        })
    }

    /// Evaluate a record against a ruleset resolved by name from the
    /// bound catalog view.
    pub fn evaluate_named(
        &self,
        record: &Record,
        ruleset_name: &str,
        options: &EvaluationOptions,
        deadline: Option<Instant>,
    ) -> Result<ExecutionResult> {
        let ruleset = self
            .catalog
            .ruleset(ruleset_name)
            .ok_or_else(|| EngineError::RulesetNotFound(ruleset_name.to_string()))?;
        self.evaluate(record, &ruleset, options, deadline)
    }
}
