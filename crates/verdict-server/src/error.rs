//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;
use verdict_catalog::CatalogError;
use verdict_dmn::TranslationError;
use verdict_engine::EngineError;

/// Server error type
#[derive(Error, Debug)]
pub enum ServerError {
    /// Engine-level failure, mapped by its kind
    #[error("{0}")]
    Engine(#[from] EngineError),

    /// Decision-table translation failure
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Malformed or inconsistent request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requested artifact does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Engine(err) => match err {
                EngineError::Validation(_)
                | EngineError::Translation(_)
                | EngineError::WorkflowConfig(_) => StatusCode::BAD_REQUEST,
                EngineError::RulesetNotFound(_) => StatusCode::NOT_FOUND,
                EngineError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
                EngineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Translation(_) => StatusCode::BAD_REQUEST,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::Engine(err) => err.kind(),
            ServerError::Translation(_) => "translation_error",
            ServerError::InvalidRequest(_) => "invalid_request",
            ServerError::NotFound(_) => "not_found",
            ServerError::Internal(_) => "internal_error",
        }
    }
}

impl From<CatalogError> for ServerError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => ServerError::NotFound(err.to_string()),
            CatalogError::Validation(_) => ServerError::InvalidRequest(err.to_string()),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

/// Error response wrapper carrying a correlation id.
///
/// Every error body has the same shape: `{ error, kind, status,
/// correlation_id }`.
#[derive(Debug)]
pub struct ApiError {
    pub error: ServerError,
    pub correlation_id: String,
}

impl<E: Into<ServerError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self {
            error: err.into(),
            correlation_id: Uuid::new_v4().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let body = Json(json!({
            "error": self.error.to_string(),
            "kind": self.error.kind(),
            "status": status.as_u16(),
            "correlation_id": self.correlation_id,
        }));
        (status, body).into_response()
    }
}
