//! Decision-table translation errors

use thiserror::Error;
use verdict_engine::EngineError;

/// Translation error
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Hit policy other than FIRST or COLLECT
    #[error("Unsupported hit policy '{0}' (supported: FIRST, COLLECT)")]
    UnsupportedHitPolicy(String),

    /// Row input cell count differs from the declared input columns
    #[error("Row '{row}' has {found} input cells, table declares {expected} input columns")]
    InputArityMismatch {
        row: String,
        expected: usize,
        found: usize,
    },

    /// Row output cell count differs from the declared output columns
    #[error("Row '{row}' has {found} output cells, table declares {expected} output columns")]
    OutputArityMismatch {
        row: String,
        expected: usize,
        found: usize,
    },

    /// Two rows share the same id
    #[error("Duplicate row id '{0}'")]
    DuplicateRowId(String),

    /// Table has no rows or no input columns
    #[error("Empty decision table: {0}")]
    EmptyTable(String),

    /// Malformed table definition
    #[error("Invalid decision table: {0}")]
    Invalid(String),

    /// Definition text could not be parsed
    #[error("Failed to parse decision table: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl From<TranslationError> for EngineError {
    fn from(err: TranslationError) -> Self {
        EngineError::Translation(err.to_string())
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
