//! Router creation and configuration
//!
//! Creates Axum routers for REST API endpoints.

use super::handlers::*;
use super::types::AppState;
use crate::config::BatchSettings;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use verdict_catalog::Catalog;

/// Create REST API router
pub fn create_router(catalog: Arc<Catalog>, batch: BatchSettings) -> Router {
    let state = AppState { catalog, batch };

    Router::new()
        .route("/health", get(health))
        .route("/v1/rules/execute", post(execute))
        .route("/v1/rules/batch", post(execute_batch))
        .route("/v1/rules/execute-dmn", post(execute_dmn))
        .route("/v1/rules/execute-dmn-upload", post(execute_dmn_upload))
        .route("/v1/dmn/upload", post(upload_dmn))
        .route("/v1/workflows/execute", post(execute_workflow))
        .route("/v1/rulesets", get(list_rulesets))
        .route(
            "/v1/rulesets/:name",
            put(put_ruleset).get(get_ruleset).delete(delete_ruleset),
        )
        .route(
            "/v1/rulesets/:name/rules/:id",
            put(put_rule).get(get_rule).delete(delete_rule),
        )
        .route("/v1/actions", get(list_actions))
        .route(
            "/v1/actions/:pattern",
            put(put_action).get(get_action).delete(delete_action),
        )
        .route("/v1/workflows", get(list_workflows))
        .route(
            "/v1/workflows/:process_name",
            put(put_workflow).get(get_workflow).delete(delete_workflow),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
