//! Rule definitions

use crate::error::{CoreError, Result};
use crate::model::condition::Condition;
use serde::{Deserialize, Serialize};

/// Rule definition
///
/// Rules are immutable during a single evaluation pass and owned by a
/// [`RuleSet`](crate::model::RuleSet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule ID within its ruleset
    pub id: String,

    /// Condition tree that must hold for the rule to match
    pub conditions: Condition,

    /// Action patterns triggered when the rule matches
    #[serde(default)]
    pub actions: Vec<String>,

    /// Evaluation priority; higher evaluates first, ties keep insertion order
    #[serde(default)]
    pub priority: i32,

    /// Weight added to the score when the rule matches
    #[serde(default)]
    pub weight: f64,

    /// Disabled rules are never evaluated
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Rule {
    /// Create a new enabled rule
    pub fn new(id: impl Into<String>, conditions: Condition) -> Self {
        Self {
            id: id.into(),
            conditions,
            actions: Vec::new(),
            priority: 0,
            weight: 0.0,
            enabled: true,
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the weight
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the action patterns
    pub fn with_actions(mut self, actions: Vec<String>) -> Self {
        self.actions = actions;
        self
    }

    /// Enable or disable the rule
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Validate the rule: non-empty id, weight >= 0 and a well-formed
    /// condition tree.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation("rule id must not be empty".to_string()));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(CoreError::Validation(format!(
                "rule {}: weight must be a finite value >= 0, found {}",
                self.id, self.weight
            )));
        }
        self.conditions.validate()
    }
}
