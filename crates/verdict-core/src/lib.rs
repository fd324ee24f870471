//! Verdict Core - data model for the Verdict rules engine
//!
//! This crate provides the fundamental types shared across the Verdict
//! workspace:
//! - Runtime `Value` and `Record` types
//! - Conditions, rules and rulesets
//! - Action definitions and effect specifications
//! - Workflow definitions
//! - Model-level validation and error types

pub mod error;
pub mod model;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use model::{
    ActionDef, ArithOp, BoolOp, ComparisonOp, Condition, EffectSpec, Operand, Rule, RuleSet,
    Stage, StagePolicy, Workflow,
};
pub use types::{Record, Value};
