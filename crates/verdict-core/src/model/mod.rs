//! Model definitions for rules, conditions, actions and workflows

mod action;
mod condition;
mod rule;
mod ruleset;
mod workflow;

pub use action::{ActionDef, ArithOp, EffectSpec, Operand};
pub use condition::{BoolOp, ComparisonOp, Condition};
pub use rule::Rule;
pub use ruleset::RuleSet;
pub use workflow::{Stage, StagePolicy, Workflow};
