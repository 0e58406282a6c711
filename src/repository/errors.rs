use thiserror::Error;

/// Failures of a call to the remote API.
///
/// Variants carrying an `Option<String>` hold the `message` field of the
/// error body when the server supplied one.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Unauthorized")]
    Unauthorized(Option<String>),

    #[error("Forbidden")]
    Forbidden(Option<String>),

    #[error("Entity not found")]
    NotFound(Option<String>),

    #[error("Server error ({status})")]
    Server { status: u16, message: Option<String> },

    #[error("{message}")]
    Domain { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Builds the error matching an HTTP status code.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        match status {
            401 => RepositoryError::Unauthorized(message),
            403 => RepositoryError::Forbidden(message),
            404 => RepositoryError::NotFound(message),
            500..=599 => RepositoryError::Server { status, message },
            _ => match message {
                Some(message) => RepositoryError::Domain { status, message },
                None => RepositoryError::Unexpected(format!("HTTP status {status}")),
            },
        }
    }

    /// The message supplied by the server, shown to the user verbatim.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RepositoryError::Unauthorized(message)
            | RepositoryError::Forbidden(message)
            | RepositoryError::NotFound(message)
            | RepositoryError::Server { message, .. } => message.as_deref(),
            RepositoryError::Domain { message, .. } => Some(message),
            RepositoryError::Network(_)
            | RepositoryError::Decode(_)
            | RepositoryError::Unexpected(_) => None,
        }
    }

    /// HTTP status behind the error, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RepositoryError::Unauthorized(_) => Some(401),
            RepositoryError::Forbidden(_) => Some(403),
            RepositoryError::NotFound(_) => Some(404),
            RepositoryError::Server { status, .. } | RepositoryError::Domain { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else if err.is_timeout() || err.is_connect() || err.is_request() {
            RepositoryError::Network(err.to_string())
        } else if let Some(status) = err.status() {
            RepositoryError::from_status(status.as_u16(), None)
        } else {
            RepositoryError::Unexpected(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_with_message_is_a_domain_error() {
        let err = RepositoryError::from_status(400, Some("Cannot delete: in use".into()));
        assert!(matches!(err, RepositoryError::Domain { status: 400, .. }));
        assert_eq!(err.server_message(), Some("Cannot delete: in use"));
    }

    #[test]
    fn blank_messages_are_dropped() {
        let err = RepositoryError::from_status(403, Some("   ".into()));
        assert!(matches!(err, RepositoryError::Forbidden(None)));
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn server_errors_keep_their_status() {
        let err = RepositoryError::from_status(503, None);
        assert!(matches!(err, RepositoryError::Server { status: 503, .. }));
        assert_eq!(err.server_message(), None);
    }
}
