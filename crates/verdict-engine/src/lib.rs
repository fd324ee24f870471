//! Verdict Engine - execution engine for the Verdict rules engine
//!
//! This crate implements the evaluation pipeline:
//! - Field lookup over nested records
//! - Condition matching
//! - Rule evaluation with weighted scoring
//! - Action resolution
//! - Staged workflow execution
//! - Batch execution with per-item fault isolation

pub mod batch;
pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod field_lookup;
pub mod matcher;
pub mod resolver;
pub mod result;
pub mod workflow;

// Re-export main types
pub use batch::{BatchRunner, BatchTarget};
pub use catalog::{CatalogView, OverlayCatalog, StaticCatalog};
pub use error::{EngineError, Result};
pub use evaluator::{EvaluationOptions, RuleEvaluator};
pub use matcher::matches;
pub use resolver::{ActionResolver, ResolvedEffect};
pub use result::{
    BatchEntry, BatchResult, BatchSummary, ExecutionError, ExecutionResult, ItemOutput, Warning,
};
pub use workflow::{StageTrace, StageTransition, WorkflowExecutor, WorkflowOutcome, WorkflowState};
