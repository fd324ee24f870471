//! Workflow definitions
//!
//! A workflow is a static, reusable definition: a named process with an
//! ordered sequence of stages, each evaluating one ruleset and deciding
//! whether execution continues or halts.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Per-stage control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StagePolicy {
    Continue,
    Halt,
}

impl Default for StagePolicy {
    fn default() -> Self {
        StagePolicy::Continue
    }
}

/// One step of a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Stage name, used in traces and error messages
    pub name: String,

    /// Name of the ruleset evaluated at this stage
    pub ruleset_ref: String,

    /// Policy when the stage produced at least one match
    #[serde(default)]
    pub on_match: StagePolicy,

    /// Policy when the stage produced zero matches
    #[serde(default)]
    pub on_no_match: StagePolicy,
}

impl Stage {
    /// Create a stage with continue/continue policies
    pub fn new(name: impl Into<String>, ruleset_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ruleset_ref: ruleset_ref.into(),
            on_match: StagePolicy::Continue,
            on_no_match: StagePolicy::Continue,
        }
    }

    /// Set the on-match policy
    pub fn on_match(mut self, policy: StagePolicy) -> Self {
        self.on_match = policy;
        self
    }

    /// Set the on-no-match policy
    pub fn on_no_match(mut self, policy: StagePolicy) -> Self {
        self.on_no_match = policy;
        self
    }
}

/// Named process over an ordered sequence of stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Process name, unique within the catalog
    pub process_name: String,

    /// Stages in declared execution order
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl Workflow {
    /// Create a workflow without stages
    pub fn new(process_name: impl Into<String>) -> Self {
        Self {
            process_name: process_name.into(),
            stages: Vec::new(),
        }
    }

    /// Append a stage
    pub fn add_stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Validate the workflow definition
    pub fn validate(&self) -> Result<()> {
        if self.process_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "workflow process_name must not be empty".to_string(),
            ));
        }
        for stage in &self.stages {
            if stage.name.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "workflow {}: stage name must not be empty",
                    self.process_name
                )));
            }
            if stage.ruleset_ref.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "workflow {}: stage {} has an empty ruleset_ref",
                    self.process_name, stage.name
                )));
            }
        }
        Ok(())
    }
}
