//! Engine error types

use thiserror::Error;
use verdict_core::CoreError;

/// Engine error
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed record, condition or ruleset, rejected before evaluation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Decision-table translation failure
    #[error("Translation error: {0}")]
    Translation(String),

    /// Referenced ruleset does not exist in the bound catalog snapshot
    #[error("Ruleset not found: {0}")]
    RulesetNotFound(String),

    /// Workflow references a missing stage ruleset or is otherwise
    /// misconfigured; fatal to the whole workflow execution
    #[error("Workflow configuration error: {0}")]
    WorkflowConfig(String),

    /// Deadline exceeded for this item or execution
    #[error("Deadline exceeded: {0}")]
    Timeout(String),

    /// Unexpected fault, fatal to this item only
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Stable machine-readable error kind, reported in execution errors
    /// and API bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "validation_error",
            EngineError::Translation(_) => "translation_error",
            EngineError::RulesetNotFound(_) => "ruleset_not_found",
            EngineError::WorkflowConfig(_) => "workflow_config_error",
            EngineError::Timeout(_) => "timeout_error",
            EngineError::Internal(_) => "internal_error",
        }
    }
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        EngineError::Validation(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
