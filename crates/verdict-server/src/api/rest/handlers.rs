//! API endpoint handlers
//!
//! HTTP request handlers for all REST API endpoints.

use super::conversions::{deadline, to_engine_options, to_record};
use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::{ApiError, ServerError};
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use uuid::Uuid;
use verdict_catalog::CatalogSnapshot;
use verdict_core::{ActionDef, Record, Rule, RuleSet, Workflow};
use verdict_dmn::{translate, DecisionTable, TranslatedTable};
use verdict_engine::{
    BatchRunner, BatchTarget, CatalogView, ExecutionResult, RuleEvaluator, WorkflowExecutor,
    WorkflowOutcome,
};

fn correlation_id() -> String {
    Uuid::new_v4().to_string()
}

fn evaluator(snapshot: Arc<CatalogSnapshot>) -> RuleEvaluator {
    RuleEvaluator::new(snapshot)
}

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Execute one record against a cataloged ruleset
pub(super) async fn execute(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<ExecuteRequestPayload>,
) -> Result<Json<ExecuteResponsePayload>, ApiError> {
    let options = payload.options.unwrap_or_default();
    let record = to_record(payload.data);

    info!(ruleset = %payload.ruleset, "received execute request");

    let snapshot = state.catalog.snapshot();
    let expires_at = deadline(&options).map(|limit| Instant::now() + limit);
    let result = evaluator(snapshot).evaluate_named(
        &record,
        &payload.ruleset,
        &to_engine_options(&options),
        expires_at,
    )?;

    Ok(Json(ExecuteResponsePayload {
        correlation_id: correlation_id(),
        timestamp: Utc::now(),
        result,
    }))
}

/// Execute a list of records against a ruleset or workflow
pub(super) async fn execute_batch(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<BatchRequestPayload>,
) -> Result<Json<BatchResponsePayload>, ApiError> {
    let options = payload.options.unwrap_or_default();
    let target = match (payload.ruleset, payload.workflow) {
        (Some(ruleset), None) => BatchTarget::Ruleset(ruleset),
        (None, Some(workflow)) => BatchTarget::Workflow(workflow),
        _ => {
            return Err(ServerError::InvalidRequest(
                "exactly one of 'ruleset' and 'workflow' must be set".to_string(),
            )
            .into())
        }
    };

    info!(items = payload.data_list.len(), "received batch request");

    let records: Vec<Record> = payload.data_list.into_iter().map(to_record).collect();
    let snapshot = state.catalog.snapshot();

    let mut runner = BatchRunner::new(snapshot).with_concurrency(state.batch.concurrency);
    let item_timeout = deadline(&options)
        .or_else(|| state.batch.item_timeout_ms.map(Duration::from_millis));
    if let Some(timeout) = item_timeout {
        runner = runner.with_item_timeout(timeout);
    }

    let batch = runner
        .run(records, target, &to_engine_options(&options))
        .await;

    Ok(Json(BatchResponsePayload {
        correlation_id: correlation_id(),
        timestamp: Utc::now(),
        batch,
    }))
}

/// Evaluate a record against the translated table without touching the
/// catalog. The derived ruleset and actions are layered over the
/// current snapshot so explicit action references still resolve.
fn execute_translated(
    snapshot: Arc<CatalogSnapshot>,
    translated: &TranslatedTable,
    record: &Record,
) -> Result<ExecutionResult, ApiError> {
    let overlay = verdict_engine::OverlayCatalog::new(snapshot)
        .with_ruleset(translated.ruleset.clone())
        .with_actions(translated.actions.clone());
    let result = RuleEvaluator::new(Arc::new(overlay)).evaluate(
        record,
        &translated.ruleset,
        &translated.options,
        None,
    )?;
    Ok(result)
}

/// Execute a record against an inline decision table
pub(super) async fn execute_dmn(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<DmnExecutePayload>,
) -> Result<Json<ExecuteResponsePayload>, ApiError> {
    let translated = translate(&payload.table)?;
    let record = to_record(payload.data);

    info!(table = %payload.table.id, "received inline decision-table request");

    let result = execute_translated(state.catalog.snapshot(), &translated, &record)?;

    Ok(Json(ExecuteResponsePayload {
        correlation_id: correlation_id(),
        timestamp: Utc::now(),
        result,
    }))
}

struct DmnUploadForm {
    table: DecisionTable,
    data: Option<Record>,
    dry_run: bool,
}

/// Pull the decision table and companion fields out of a multipart form
async fn read_dmn_form(mut multipart: Multipart) -> Result<DmnUploadForm, ServerError> {
    let mut table = None;
    let mut data = None;
    let mut dry_run = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let text = field
            .text()
            .await
            .map_err(|e| ServerError::InvalidRequest(format!("unreadable field '{}': {}", name, e)))?;

        match name.as_str() {
            // YAML parsing accepts JSON tables too
            "file" => table = Some(DecisionTable::from_yaml(&text)?),
            "data" => {
                let payload: RecordPayload = serde_json::from_str(&text).map_err(|e| {
                    ServerError::InvalidRequest(format!("invalid data field: {}", e))
                })?;
                data = Some(to_record(payload));
            }
            "dry_run" => {
                dry_run = text.trim().eq_ignore_ascii_case("true");
            }
            other => {
                return Err(ServerError::InvalidRequest(format!(
                    "unexpected multipart field '{}'",
                    other
                )))
            }
        }
    }

    let table = table
        .ok_or_else(|| ServerError::InvalidRequest("missing 'file' field".to_string()))?;
    Ok(DmnUploadForm {
        table,
        data,
        dry_run,
    })
}

/// Execute an uploaded decision table against an uploaded record.
/// `dry_run=true` validates and translates without evaluating.
pub(super) async fn execute_dmn_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let form = read_dmn_form(multipart).await?;
    let translated = translate(&form.table)?;

    if form.dry_run {
        let ack = TableAck {
            correlation_id: correlation_id(),
            ruleset: translated.ruleset.name.clone(),
            version: None,
            rules: translated.ruleset.rules.len(),
            actions: translated.actions.len(),
        };
        return Ok(Json(serde_json::to_value(ack).map_err(|e| {
            ServerError::Internal(e.to_string())
        })?));
    }

    let record = form.data.ok_or_else(|| {
        ServerError::InvalidRequest("missing 'data' field (or set dry_run=true)".to_string())
    })?;
    let result = execute_translated(state.catalog.snapshot(), &translated, &record)?;

    let response = ExecuteResponsePayload {
        correlation_id: correlation_id(),
        timestamp: Utc::now(),
        result,
    };
    Ok(Json(serde_json::to_value(response).map_err(|e| {
        ServerError::Internal(e.to_string())
    })?))
}

/// Translate an uploaded decision table and commit the derived ruleset
/// and synthesized actions to the catalog
pub(super) async fn upload_dmn(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TableAck>, ApiError> {
    let form = read_dmn_form(multipart).await?;
    let translated = translate(&form.table)?;

    info!(
        table = %form.table.id,
        rules = translated.ruleset.rules.len(),
        "committing decision table to catalog"
    );

    for action in &translated.actions {
        state.catalog.upsert_action(action.clone())?;
    }
    let rules = translated.ruleset.rules.len();
    let actions = translated.actions.len();
    let name = translated.ruleset.name.clone();
    let version = state.catalog.upsert_ruleset(translated.ruleset)?;

    Ok(Json(TableAck {
        correlation_id: correlation_id(),
        ruleset: name,
        version: Some(version),
        rules,
        actions,
    }))
}

/// Execute a workflow, inline or cataloged
pub(super) async fn execute_workflow(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<WorkflowRequestPayload>,
) -> Result<Json<WorkflowResponsePayload>, ApiError> {
    let options = payload.options.unwrap_or_default();
    let record = to_record(payload.data);
    let snapshot = state.catalog.snapshot();

    // Inline stages take precedence over a cataloged workflow
    let workflow = match payload.stages {
        Some(stages) => Workflow {
            process_name: payload.process_name,
            stages,
        },
        None => snapshot.workflow(&payload.process_name).ok_or_else(|| {
            ServerError::NotFound(format!("workflow not found: {}", payload.process_name))
        })?,
    };

    info!(process = %workflow.process_name, stages = workflow.stages.len(), "executing workflow");

    let outcome: WorkflowOutcome = WorkflowExecutor::new(evaluator(snapshot)).execute(
        &workflow,
        &record,
        &to_engine_options(&options),
        deadline(&options),
    )?;

    Ok(Json(WorkflowResponsePayload {
        correlation_id: correlation_id(),
        timestamp: Utc::now(),
        outcome,
    }))
}

// Catalog administration

pub(super) async fn list_rulesets(State(state): State<AppState>) -> Json<ListResponse> {
    Json(ListResponse {
        items: state.catalog.snapshot().ruleset_names(),
    })
}

pub(super) async fn put_ruleset(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonExtractor(ruleset): JsonExtractor<RuleSet>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if ruleset.name != name {
        return Err(ServerError::InvalidRequest(format!(
            "ruleset name '{}' does not match path '{}'",
            ruleset.name, name
        ))
        .into());
    }
    let version = state.catalog.upsert_ruleset(ruleset)?;
    Ok(Json(serde_json::json!({
        "name": name,
        "version": version,
        "correlation_id": correlation_id(),
    })))
}

pub(super) async fn get_ruleset(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RuleSet>, ApiError> {
    let ruleset = state
        .catalog
        .snapshot()
        .ruleset(&name)
        .ok_or_else(|| ServerError::NotFound(format!("ruleset not found: {}", name)))?;
    Ok(Json((*ruleset).clone()))
}

pub(super) async fn delete_ruleset(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.delete_ruleset(&name)?;
    Ok(Json(serde_json::json!({
        "deleted": name,
        "correlation_id": correlation_id(),
    })))
}

pub(super) async fn put_rule(
    State(state): State<AppState>,
    Path((name, rule_id)): Path<(String, String)>,
    JsonExtractor(rule): JsonExtractor<Rule>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if rule.id != rule_id {
        return Err(ServerError::InvalidRequest(format!(
            "rule id '{}' does not match path '{}'",
            rule.id, rule_id
        ))
        .into());
    }
    let version = state.catalog.upsert_rule(&name, rule)?;
    Ok(Json(serde_json::json!({
        "ruleset": name,
        "rule": rule_id,
        "version": version,
        "correlation_id": correlation_id(),
    })))
}

pub(super) async fn get_rule(
    State(state): State<AppState>,
    Path((name, rule_id)): Path<(String, String)>,
) -> Result<Json<Rule>, ApiError> {
    let ruleset = state
        .catalog
        .snapshot()
        .ruleset(&name)
        .ok_or_else(|| ServerError::NotFound(format!("ruleset not found: {}", name)))?;
    let rule = ruleset
        .rules
        .iter()
        .find(|r| r.id == rule_id)
        .ok_or_else(|| ServerError::NotFound(format!("rule not found: {}", rule_id)))?;
    Ok(Json(rule.clone()))
}

pub(super) async fn delete_rule(
    State(state): State<AppState>,
    Path((name, rule_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let version = state.catalog.delete_rule(&name, &rule_id)?;
    Ok(Json(serde_json::json!({
        "ruleset": name,
        "deleted": rule_id,
        "version": version,
        "correlation_id": correlation_id(),
    })))
}

pub(super) async fn list_actions(State(state): State<AppState>) -> Json<ListResponse> {
    Json(ListResponse {
        items: state.catalog.snapshot().action_patterns(),
    })
}

pub(super) async fn put_action(
    State(state): State<AppState>,
    Path(pattern): Path<String>,
    JsonExtractor(action): JsonExtractor<ActionDef>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if action.pattern != pattern {
        return Err(ServerError::InvalidRequest(format!(
            "action pattern '{}' does not match path '{}'",
            action.pattern, pattern
        ))
        .into());
    }
    state.catalog.upsert_action(action)?;
    Ok(Json(serde_json::json!({
        "pattern": pattern,
        "correlation_id": correlation_id(),
    })))
}

pub(super) async fn get_action(
    State(state): State<AppState>,
    Path(pattern): Path<String>,
) -> Result<Json<ActionDef>, ApiError> {
    let action = state
        .catalog
        .snapshot()
        .action(&pattern)
        .ok_or_else(|| ServerError::NotFound(format!("action not found: {}", pattern)))?;
    Ok(Json(action))
}

pub(super) async fn delete_action(
    State(state): State<AppState>,
    Path(pattern): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.delete_action(&pattern)?;
    Ok(Json(serde_json::json!({
        "deleted": pattern,
        "correlation_id": correlation_id(),
    })))
}

pub(super) async fn list_workflows(State(state): State<AppState>) -> Json<ListResponse> {
    Json(ListResponse {
        items: state.catalog.snapshot().workflow_names(),
    })
}

pub(super) async fn put_workflow(
    State(state): State<AppState>,
    Path(process_name): Path<String>,
    JsonExtractor(workflow): JsonExtractor<Workflow>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if workflow.process_name != process_name {
        return Err(ServerError::InvalidRequest(format!(
            "workflow process name '{}' does not match path '{}'",
            workflow.process_name, process_name
        ))
        .into());
    }
    state.catalog.upsert_workflow(workflow)?;
    Ok(Json(serde_json::json!({
        "process_name": process_name,
        "correlation_id": correlation_id(),
    })))
}

pub(super) async fn get_workflow(
    State(state): State<AppState>,
    Path(process_name): Path<String>,
) -> Result<Json<Workflow>, ApiError> {
    let workflow = state
        .catalog
        .snapshot()
        .workflow(&process_name)
        .ok_or_else(|| ServerError::NotFound(format!("workflow not found: {}", process_name)))?;
    Ok(Json(workflow))
}

pub(super) async fn delete_workflow(
    State(state): State<AppState>,
    Path(process_name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.delete_workflow(&process_name)?;
    Ok(Json(serde_json::json!({
        "deleted": process_name,
        "correlation_id": correlation_id(),
    })))
}
