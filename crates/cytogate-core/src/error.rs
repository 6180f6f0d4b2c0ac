//! Error types for Cytogate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CytogateError {
    // Gate errors
    #[error("Invalid gate name: {reason}")]
    InvalidGateName { reason: String },

    #[error("A gate named '{name}' already exists")]
    DuplicateGateName { name: String },

    #[error("Gate not found: {name}")]
    GateNotFound { name: String },

    #[error("Gate needs at least 3 vertices, found {found}")]
    DegenerateGate { found: usize },

    #[error("Gate vertices span more than one plot")]
    MixedPlotGate,

    #[error("Invalid plot '{value}': expected A or B")]
    InvalidPlot { value: String },

    #[error("Group not found: {name}")]
    GroupNotFound { name: String },

    // Workbench errors
    #[error("Cannot {action} while {mode}")]
    InvalidTransition { action: String, mode: String },

    #[error("Dyeing in progress, {remaining_ms} ms remaining")]
    Busy { remaining_ms: u64 },

    #[error("Point count mismatch: expected {expected}, found {found}")]
    PointCountMismatch { expected: usize, found: usize },

    // Session errors
    #[error("Invalid session name: {reason}")]
    InvalidSessionName { reason: String },

    #[error("Session not found: {name}")]
    SessionNotFound { name: String },

    #[error("Stored sessions are corrupt: {reason}")]
    CorruptStore { reason: String },

    // Measurement errors
    #[error("Measurement file is missing column '{column}'")]
    MissingColumn { column: String },

    #[error("Measurement file could not be read: {0}")]
    Csv(String),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CytogateError {
    fn from(err: serde_json::Error) -> Self {
        CytogateError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for CytogateError {
    fn from(err: csv::Error) -> Self {
        CytogateError::Csv(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CytogateError>;
