//! REST API type definitions
//!
//! Request and response types for the REST API endpoints.

use crate::config::BatchSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use verdict_catalog::Catalog;
use verdict_core::Stage;
use verdict_dmn::DecisionTable;
use verdict_engine::{BatchResult, ExecutionResult, WorkflowOutcome};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub batch: BatchSettings,
}

/// Raw record payload as submitted over the wire
pub type RecordPayload = BTreeMap<String, serde_json::Value>;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Per-request execution options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Stop at the first (highest priority) matching rule
    #[serde(default)]
    pub stop_on_first_match: bool,

    /// Deadline in milliseconds; overrides the configured batch item
    /// timeout, and bounds workflow executions
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Single execution request
#[derive(Debug, Deserialize)]
pub struct ExecuteRequestPayload {
    /// Record to evaluate
    pub data: RecordPayload,

    /// Name of the cataloged ruleset to evaluate against
    pub ruleset: String,

    #[serde(default)]
    pub options: Option<RequestOptions>,
}

/// Single execution response
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteResponsePayload {
    pub correlation_id: String,
    pub timestamp: DateTime<Utc>,
    pub result: ExecutionResult,
}

/// Batch execution request. Exactly one of `ruleset` and `workflow`
/// must be set.
#[derive(Debug, Deserialize)]
pub struct BatchRequestPayload {
    pub data_list: Vec<RecordPayload>,

    #[serde(default)]
    pub ruleset: Option<String>,

    #[serde(default)]
    pub workflow: Option<String>,

    #[serde(default)]
    pub options: Option<RequestOptions>,
}

/// Batch execution response
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponsePayload {
    pub correlation_id: String,
    pub timestamp: DateTime<Utc>,
    pub batch: BatchResult,
}

/// Inline decision-table execution request
#[derive(Debug, Deserialize)]
pub struct DmnExecutePayload {
    pub table: DecisionTable,
    pub data: RecordPayload,
}

/// Acknowledgment for an accepted decision table. `version` is set
/// only when the table was committed to the catalog.
#[derive(Debug, Serialize, Deserialize)]
pub struct TableAck {
    pub correlation_id: String,
    pub ruleset: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    pub rules: usize,
    pub actions: usize,
}

/// Workflow execution request. Inline `stages` take precedence over a
/// cataloged workflow of the same process name.
#[derive(Debug, Deserialize)]
pub struct WorkflowRequestPayload {
    pub process_name: String,

    #[serde(default)]
    pub stages: Option<Vec<Stage>>,

    pub data: RecordPayload,

    #[serde(default)]
    pub options: Option<RequestOptions>,
}

/// Workflow execution response
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkflowResponsePayload {
    pub correlation_id: String,
    pub timestamp: DateTime<Utc>,
    pub outcome: WorkflowOutcome,
}

/// Name listing response for the admin list routes
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub items: Vec<String>,
}
