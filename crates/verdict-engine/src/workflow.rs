//! Workflow executor
//!
//! Runs a named process through an ordered sequence of stages. Each stage
//! evaluates the current context against its ruleset and decides whether
//! to continue or halt; score and matched-rule history accumulate across
//! stages. Stage execution is strictly sequential.

use crate::error::{EngineError, Result};
use crate::evaluator::{EvaluationOptions, RuleEvaluator};
use crate::resolver::ResolvedEffect;
use crate::result::Warning;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;
use verdict_core::{Record, StagePolicy, Workflow};

/// Workflow execution state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Mid-execution; never observed in a returned outcome
    Running,
    /// A stage policy halted the workflow before the last stage
    Halted,
    /// All stages executed
    Completed,
}

/// Transition taken after a stage executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageTransition {
    Continued,
    HaltedOnMatch,
    HaltedOnNoMatch,
}

/// Per-stage trace entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTrace {
    /// Stage name
    pub stage: String,

    /// Ruleset the stage evaluated
    pub ruleset: String,

    /// Number of rules matched at this stage
    pub matched: usize,

    /// Transition taken
    pub transition: StageTransition,
}

/// Result of one workflow execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowOutcome {
    /// The executed process name
    pub process_name: String,

    /// Terminal state (`halted` or `completed`)
    pub state: WorkflowState,

    /// Score accumulated across all executed stages
    pub score: f64,

    /// Matched rule ids accumulated across all executed stages
    pub matched_rule_ids: Vec<String>,

    /// Resolved effects accumulated across all executed stages
    pub actions: Vec<ResolvedEffect>,

    /// Warnings accumulated across all executed stages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,

    /// Per-stage trace, in execution order
    pub stages: Vec<StageTrace>,
}

/// Executes workflows over a rule evaluator
pub struct WorkflowExecutor {
    evaluator: RuleEvaluator,
}

impl WorkflowExecutor {
    /// Create an executor over a rule evaluator
    pub fn new(evaluator: RuleEvaluator) -> Self {
        Self { evaluator }
    }

    /// Execute a workflow against a record.
    ///
    /// A missing stage ruleset fails the whole execution with
    /// `WorkflowConfig`: a workflow is a single logical unit of work and
    /// a missing stage definition means it is misconfigured. The caller
    /// options apply to every stage evaluation. The optional deadline is
    /// checked between stages and inside each stage's rule pass; expiry
    /// fails the execution with `Timeout`.
    pub fn execute(
        &self,
        workflow: &Workflow,
        record: &Record,
        options: &EvaluationOptions,
        deadline: Option<Duration>,
    ) -> Result<WorkflowOutcome> {
        workflow.validate()?;
        let started = Instant::now();
        let expires_at = deadline.map(|limit| started + limit);

        let mut state = WorkflowState::Running;
        let mut stage_index = 0usize;
        let mut score = 0.0f64;
        let mut matched_rule_ids = Vec::new();
        let mut actions: Vec<ResolvedEffect> = Vec::new();
        let mut warnings = Vec::new();
        let mut traces = Vec::new();

        while state == WorkflowState::Running {
            if stage_index >= workflow.stages.len() {
                state = WorkflowState::Completed;
                break;
            }
            if let Some(limit) = expires_at {
                if Instant::now() >= limit {
                    return Err(EngineError::Timeout(format!(
                        "workflow {} exceeded its deadline at stage {}",
                        workflow.process_name, workflow.stages[stage_index].name
                    )));
                }
            }

            let stage = &workflow.stages[stage_index];
            let result = self
                .evaluator
                .evaluate_named(record, &stage.ruleset_ref, options, expires_at)
                .map_err(|err| match err {
                    EngineError::RulesetNotFound(name) => EngineError::WorkflowConfig(format!(
                        "workflow {}: stage {} references missing ruleset {}",
                        workflow.process_name, stage.name, name
                    )),
                    other => other,
                })?;

            let matched = result.matched_rule_ids.len();
            debug!(
                workflow = %workflow.process_name,
                stage = %stage.name,
                matched,
                "stage evaluated"
            );

            score += result.score;
            matched_rule_ids.extend(result.matched_rule_ids);
            for effect in result.actions {
                if !actions.iter().any(|a| a.pattern == effect.pattern) {
                    actions.push(effect);
                }
            }
            warnings.extend(result.warnings);

            let transition = if matched > 0 && stage.on_match == StagePolicy::Halt {
                state = WorkflowState::Halted;
                StageTransition::HaltedOnMatch
            } else if matched == 0 && stage.on_no_match == StagePolicy::Halt {
                state = WorkflowState::Halted;
                StageTransition::HaltedOnNoMatch
            } else {
                stage_index += 1;
                StageTransition::Continued
            };

            traces.push(StageTrace {
                stage: stage.name.clone(),
                ruleset: stage.ruleset_ref.clone(),
                matched,
                transition,
            });
        }

        Ok(WorkflowOutcome {
            process_name: workflow.process_name.clone(),
            state,
            score,
            matched_rule_ids,
            actions,
            warnings,
            stages: traces,
        })
    }
}
