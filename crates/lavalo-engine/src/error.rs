//! Error types for availability computation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque failure raised by a data collaborator (database, file, remote API).
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The slot snapshot was empty, so nothing can be booked.
    #[error("no slots configured")]
    NoResourcesConfigured,

    /// A collaborator failed to deliver a snapshot.
    #[error("infrastructure failure: {0}")]
    Infrastructure(#[source] SourceError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// HTTP status code the transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::NoResourcesConfigured => 404,
            EngineError::InvalidConfig(_) => 400,
            EngineError::Infrastructure(_) | EngineError::Serialization(_) => 500,
        }
    }
}

/// Structured error body for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&EngineError> for ApiError {
    fn from(err: &EngineError) -> Self {
        // Collaborator details stay out of the message; they go in `details`.
        let (message, details) = match err {
            EngineError::NoResourcesConfigured => {
                ("resource not found".to_string(), Some(err.to_string()))
            }
            EngineError::Infrastructure(source) => {
                ("internal server error".to_string(), Some(source.to_string()))
            }
            EngineError::InvalidConfig(msg) => ("invalid input".to_string(), Some(msg.clone())),
            EngineError::Serialization(e) => {
                ("internal server error".to_string(), Some(e.to_string()))
            }
        };
        ApiError {
            code: err.status_code(),
            message,
            details,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
