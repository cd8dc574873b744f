// ⚠️ Error taxonomy for the SWIFT registry

use crate::validator::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwiftError {
    /// Malformed input. Always the caller's fault, never retried.
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("SWIFT code already exists: {0}")]
    DuplicateKey(String),

    #[error("SWIFT code not found: {0}")]
    NotFound(String),

    /// The dataset header lacks columns the importer needs. Fatal at startup.
    #[error("dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("dataset error: {0}")]
    Dataset(#[from] csv::Error),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record store lock poisoned")]
    LockPoisoned,
}

impl SwiftError {
    /// True for errors caused by caller input rather than infrastructure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SwiftError::Validation(_) | SwiftError::DuplicateKey(_) | SwiftError::NotFound(_)
        )
    }
}

impl From<ValidationError> for SwiftError {
    fn from(err: ValidationError) -> Self {
        SwiftError::Validation(vec![err])
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, SwiftError>;
