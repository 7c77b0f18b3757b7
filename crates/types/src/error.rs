use thiserror::Error;

/// Errors raised while building records from external data
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Element at index {index} must be an object")]
    NotAnObject { index: usize },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecordError>;
