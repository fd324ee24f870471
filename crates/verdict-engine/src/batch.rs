//! Batch execution
//!
//! Fans a list of records out over a bounded number of concurrent tasks.
//! Each item runs in its own task so a panic or timeout in one item never
//! disturbs the others; it surfaces as an error entry at that item's
//! position. Result order always matches submission order.

use crate::catalog::CatalogView;
use crate::error::EngineError;
use crate::evaluator::{EvaluationOptions, RuleEvaluator};
use crate::result::{BatchEntry, BatchResult, BatchSummary, ExecutionError, ItemOutput};
use crate::workflow::WorkflowExecutor;
use futures::StreamExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use uuid::Uuid;
use verdict_core::Record;

const DEFAULT_CONCURRENCY: usize = 8;

/// What each batch item is executed against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchTarget {
    /// Evaluate every record against one named ruleset
    Ruleset(String),
    /// Run every record through one named workflow
    Workflow(String),
}

/// Executes batches of records with bounded concurrency
pub struct BatchRunner {
    catalog: Arc<dyn CatalogView>,
    concurrency: usize,
    item_timeout: Option<Duration>,
}

impl BatchRunner {
    /// Create a runner with the default concurrency limit
    pub fn new(catalog: Arc<dyn CatalogView>) -> Self {
        Self {
            catalog,
            concurrency: DEFAULT_CONCURRENCY,
            item_timeout: None,
        }
    }

    /// Set the concurrency limit (clamped to at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set a per-item execution timeout
    pub fn with_item_timeout(mut self, timeout: Duration) -> Self {
        self.item_timeout = Some(timeout);
        self
    }

    /// Execute a batch of records against a target.
    ///
    /// Items are dispatched in submission order through a buffered stream,
    /// so `results[i]` always corresponds to `records[i]` regardless of
    /// completion order.
    pub async fn run(
        &self,
        records: Vec<Record>,
        target: BatchTarget,
        options: &EvaluationOptions,
    ) -> BatchResult {
        let batch_id = Uuid::new_v4().to_string();
        let total = records.len();
        info!(batch_id = %batch_id, total, "starting batch execution");

        let results: Vec<BatchEntry> = futures::stream::iter(records.into_iter())
            .map(|record| {
                let catalog = Arc::clone(&self.catalog);
                let target = target.clone();
                let options = options.clone();
                let item_timeout = self.item_timeout;
                tokio::spawn(async move {
                    run_item(catalog, record, target, options, item_timeout)
                })
            })
            .buffered(self.concurrency)
            .map(|joined| match joined {
                Ok(entry) => entry,
                // Task panicked: isolate it as an internal error entry
                Err(join_err) => {
                    warn!(error = %join_err, "batch item task failed");
                    BatchEntry::Error {
                        error: ExecutionError::new(
                            "internal_error",
                            format!("item execution aborted: {}", join_err),
                        ),
                    }
                }
            })
            .collect()
            .await;

        let summary = BatchSummary::from_entries(&results);
        info!(
            batch_id = %batch_id,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "batch execution finished"
        );

        BatchResult {
            batch_id,
            results,
            summary,
        }
    }
}

// Evaluation is synchronous, so the per-item limit is enforced by the
// deadline checks inside the evaluator and workflow executor rather
// than by preempting the task.
fn run_item(
    catalog: Arc<dyn CatalogView>,
    record: Record,
    target: BatchTarget,
    options: EvaluationOptions,
    timeout: Option<Duration>,
) -> BatchEntry {
    let deadline = timeout.map(|limit| Instant::now() + limit);
    let evaluator = RuleEvaluator::new(Arc::clone(&catalog));
    let outcome = match target {
        BatchTarget::Ruleset(name) => evaluator
            .evaluate_named(&record, &name, &options, deadline)
            .map(ItemOutput::Execution),
        BatchTarget::Workflow(name) => match catalog.workflow(&name) {
            Some(workflow) => WorkflowExecutor::new(evaluator)
                .execute(&workflow, &record, &options, timeout)
                .map(ItemOutput::Workflow),
            None => Err(EngineError::WorkflowConfig(format!(
                "workflow '{}' not found in catalog",
                name
            ))),
        },
    };

    match outcome {
        Ok(output) => BatchEntry::Ok { output },
        Err(err) => BatchEntry::Error {
            error: ExecutionError::from(&err),
        },
    }
}
