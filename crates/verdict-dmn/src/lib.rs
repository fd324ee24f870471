//! Verdict DMN - decision-table support for the Verdict rules engine
//!
//! Decision tables are a tabular rule notation: each row pairs input
//! cell predicates with output cell values. This crate parses table
//! definitions from YAML or JSON and translates them into an ordinary
//! `RuleSet` plus synthesized actions, so the engine evaluates tables
//! with the exact same machinery as hand-authored rules.

pub mod error;
pub mod table;
pub mod translator;

pub use error::{Result, TranslationError};
pub use table::{DecisionTable, InputColumn, OutputColumn, TableRow};
pub use translator::{translate, TranslatedTable};
