//! Client error types

use midart_core::ApiError;
use serde_json::Value;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status not covered below
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// 401 from the server
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 4xx other than 401/403/404
    #[error("Bad request ({status}): {message}")]
    BadRequest { status: u16, message: String },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Response body did not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code and the raw response body
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| status.to_string(), str::to_string)
        });

        match status.as_u16() {
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            code @ 400..=499 => Self::BadRequest {
                status: code,
                message,
            },
            code => Self::ServerError {
                status: code,
                message,
            },
        }
    }

    /// The session cookie is missing or no longer valid
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(err) => err.status().map(|status| status.as_u16()),
            Self::ServerError { status, .. } | Self::BadRequest { status, .. } => Some(*status),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }
}

/// Pull a human readable message out of a DRF-style error body.
///
/// Tries `{"error": ..}`, then `{"detail": ..}`, then the first entry of the
/// first field error list, then the raw body text.
pub fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };

    if let Some(object) = value.as_object() {
        for key in ["error", "detail"] {
            if let Some(message) = object.get(key).and_then(text) {
                return Some(message);
            }
        }

        let first_field_error = object.iter().find_map(|(field, errors)| {
            let message = match errors {
                Value::Array(list) => list.iter().find_map(text),
                other => text(other),
            }?;
            if field == "non_field_errors" {
                Some(message)
            } else {
                Some(format!("{field}: {message}"))
            }
        });
        if first_field_error.is_some() {
            return first_field_error;
        }
    }

    if let Some(list) = value.as_array() {
        if let Some(message) = list.iter().find_map(text) {
            return Some(message);
        }
    }

    Some(body.to_string())
}

fn text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

impl From<ClientError> for ApiError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::AuthenticationFailed(message) => Self::Unauthorized(message),
            ClientError::Forbidden(message) => Self::Forbidden(message),
            ClientError::NotFound(message) => Self::NotFound(message),
            ClientError::BadRequest { status, message } => Self::Validation { status, message },
            ClientError::ServerError { status, message } => Self::Server { status, message },
            ClientError::Request(err) => Self::Transport(err.to_string()),
            ClientError::Serialization(err) => Self::Transport(format!("invalid response: {err}")),
            ClientError::Configuration(message) => Self::Transport(message),
        }
    }
}
