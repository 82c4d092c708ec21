//! Error types and exit codes for recograph
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid caller input)
//! - 3: Data/store error (store missing, query failure)
//!
//! Empty results (absent seed, disconnected graph, fully excluded candidate
//! pool) are not errors and never produce one of these variants.

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the recograph binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during recograph operations
#[derive(Error, Debug)]
pub enum RecoError {
    // Caller errors (exit code 2)
    #[error("{field} is required")]
    MissingIdentifier { field: String },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("{graph_type} graph requires parameter '{parameter}'")]
    MissingParameter {
        graph_type: String,
        parameter: String,
    },

    #[error("{0}")]
    UsageError(String),

    // Store errors (exit code 3), surfaced exactly as the driver reported them
    #[error(transparent)]
    Store(#[from] rusqlite::Error),

    #[error("store unavailable at {path:?}: {reason}")]
    StoreUnavailable { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl RecoError {
    /// Create an error for a missing or blank identifier
    pub fn missing_identifier(field: &str) -> Self {
        RecoError::MissingIdentifier {
            field: field.to_string(),
        }
    }

    /// Create an error for an invalid value
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        RecoError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a graph request lacking a required parameter
    pub fn missing_parameter(graph_type: impl std::fmt::Display, parameter: &str) -> Self {
        RecoError::MissingParameter {
            graph_type: graph_type.to_string(),
            parameter: parameter.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RecoError::MissingIdentifier { .. }
            | RecoError::InvalidValue { .. }
            | RecoError::MissingParameter { .. }
            | RecoError::UsageError(_) => ExitCode::Usage,

            RecoError::Store(_) | RecoError::StoreUnavailable { .. } => ExitCode::Data,

            RecoError::Io(_) | RecoError::Toml(_) | RecoError::Json(_) | RecoError::Other(_) => {
                ExitCode::Failure
            }
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            RecoError::MissingIdentifier { .. } => "missing_identifier",
            RecoError::InvalidValue { .. } => "invalid_value",
            RecoError::MissingParameter { .. } => "missing_parameter",
            RecoError::UsageError(_) => "usage_error",
            RecoError::Store(_) => "store_error",
            RecoError::StoreUnavailable { .. } => "store_unavailable",
            RecoError::Io(_) => "io_error",
            RecoError::Toml(_) => "toml_error",
            RecoError::Json(_) => "json_error",
            RecoError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for recograph operations
pub type Result<T> = std::result::Result<T, RecoError>;
