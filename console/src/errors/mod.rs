//! Client-wide error types.
//!
//! Every operation that talks to the backend, or validates input before doing
//! so, reports failures through [`ApiError`]. Listing and free-text search are
//! the only paths that swallow these errors; see `api::jobs`.

use crate::api::common::FieldError;
use thiserror::Error;

/// Errors raised by the remote collection client, the session gate and the
/// form controllers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Local, field-scoped validation failure. Never reaches the network.
    #[error("Validation failed: {}", summarize(.fields))]
    Validation { fields: Vec<FieldError> },

    /// No response was received.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The request exceeded its deadline and was abandoned.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// A response arrived with a non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 404 on an id-addressed resource.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A protected operation was attempted without an active session.
    #[error("Not authenticated")]
    Unauthenticated,

    /// A 2xx response whose body could not be decoded.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// A submission is already in flight for this form.
    #[error("A submission is already in progress")]
    SubmissionPending,
}

pub type ApiResult<T> = Result<T, ApiError>;

fn summarize(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ApiError {
    pub fn validation(fields: Vec<FieldError>) -> Self {
        Self::Validation { fields }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Field errors carried by a validation failure, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { fields } => fields,
            _ => &[],
        }
    }

    /// Message shown to the operator in an error notification.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Server { message, .. } if !message.is_empty() => message.clone(),
            Self::Network { .. } => "Network error. Please check your connection.".to_string(),
            Self::Timeout { .. } => "The server took too long to respond.".to_string(),
            Self::Validation { .. } => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}
