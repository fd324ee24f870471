//! Error types for the catalog layer

use std::path::PathBuf;
use thiserror::Error;
use verdict_core::CoreError;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur during catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The named artifact does not exist
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// The artifact failed validation and was rejected before any write
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error while loading catalog files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The loader root is missing or not a directory
    #[error("Invalid catalog path: {path}")]
    InvalidPath { path: PathBuf },

    /// A catalog file could not be loaded
    #[error("Failed to load {path}: {message}")]
    File { path: PathBuf, message: String },
}

impl CatalogError {
    /// Not-found error for an artifact of the given kind
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        CatalogError::NotFound {
            kind,
            name: name.into(),
        }
    }
}

impl From<CoreError> for CatalogError {
    fn from(err: CoreError) -> Self {
        CatalogError::Validation(err.to_string())
    }
}
