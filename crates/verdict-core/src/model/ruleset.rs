//! Ruleset definitions
//!
//! A ruleset is a named, versioned, ordered collection of rules. The
//! evaluation order is priority descending with insertion order as the
//! tie-break, reproducible bit-for-bit for the same ruleset snapshot.

use crate::error::{CoreError, Result};
use crate::model::rule::Rule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Named, versioned, ordered collection of rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Unique name within the catalog
    pub name: String,

    /// Snapshot version, bumped on every catalog update
    #[serde(default = "default_version")]
    pub version: u64,

    /// Rules in insertion order
    #[serde(default)]
    pub rules: Vec<Rule>,
}

fn default_version() -> u64 {
    1
}

impl RuleSet {
    /// Create an empty ruleset at version 1
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: 1,
            rules: Vec::new(),
        }
    }

    /// Add a rule, keeping insertion order
    pub fn add_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Replace the rules
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Enabled rules ordered by priority descending, insertion order as
    /// tie-break. The sort is stable so the ordering is reproducible for
    /// the same snapshot.
    pub fn evaluation_order(&self) -> Vec<&Rule> {
        let mut ordered: Vec<&Rule> = self.rules.iter().filter(|r| r.enabled).collect();
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority));
        ordered
    }

    /// Validate the ruleset: non-empty name, unique rule ids and valid rules.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "ruleset name must not be empty".to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        for rule in &self.rules {
            rule.validate()?;
            if !seen.insert(rule.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "ruleset {}: duplicate rule id {}",
                    self.name, rule.id
                )));
            }
        }
        Ok(())
    }
}
