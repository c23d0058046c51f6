//! Error taxonomy shared by every view

/// Standard result type for API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// What went wrong with a call to the Midart API, as far as a view cares
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Network failure or a body that could not be decoded
    #[error("Network error: {0}")]
    Transport(String),

    /// 401: the session expired or the credentials were rejected
    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other 4xx carrying a server-supplied message
    #[error("Rejected ({status}): {message}")]
    Validation { status: u16, message: String },

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The request was abandoned by the client. Not a real failure.
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Text for an inline error banner. `None` means the error must not be
    /// shown at all.
    pub fn display_message(&self) -> Option<String> {
        match self {
            Self::Cancelled => None,
            Self::Unauthorized(message) | Self::Validation { message, .. }
                if !message.trim().is_empty() =>
            {
                Some(message.clone())
            }
            Self::Unauthorized(_) => Some("Please log in again.".to_string()),
            Self::Validation { .. } => Some("The request was rejected.".to_string()),
            Self::Forbidden(_) => Some("You are not allowed to do that.".to_string()),
            Self::NotFound(_) => Some("Not found.".to_string()),
            Self::Transport(_) => {
                Some("Could not reach the server. Check your connection.".to_string())
            }
            Self::Server { .. } => Some("Something went wrong on our side.".to_string()),
        }
    }

    /// Like [`display_message`](Self::display_message) but with a view-specific
    /// fallback for errors that carry no useful server text.
    pub fn message_or(&self, fallback: &str) -> Option<String> {
        match self {
            Self::Cancelled => None,
            Self::Unauthorized(message) | Self::Validation { message, .. }
                if !message.trim().is_empty() =>
            {
                Some(message.clone())
            }
            _ => Some(fallback.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_never_displayed() {
        assert!(ApiError::Cancelled.is_cancelled());
        assert_eq!(ApiError::Cancelled.display_message(), None);
        assert_eq!(ApiError::Cancelled.message_or("Could not load feed."), None);
    }

    #[test]
    fn validation_messages_are_surfaced_verbatim() {
        let err = ApiError::Validation {
            status: 400,
            message: "Username already exists".into(),
        };
        assert_eq!(
            err.display_message().as_deref(),
            Some("Username already exists")
        );
        assert_eq!(
            err.message_or("Signup failed").as_deref(),
            Some("Username already exists")
        );
    }

    #[test]
    fn empty_server_messages_fall_back() {
        let err = ApiError::Unauthorized(String::new());
        assert!(err.is_unauthorized());
        assert_eq!(err.message_or("Login failed").as_deref(), Some("Login failed"));

        let err = ApiError::Transport("connection reset".into());
        assert_eq!(
            err.message_or("Could not load feed.").as_deref(),
            Some("Could not load feed.")
        );
    }
}
