//! Error type for the API client

use common::{StorageError, models::ErrorResponse};
use reqwest::StatusCode;
use thiserror::Error;

/// Error raised by [`crate::ApiClient`]
#[derive(Error, Debug)]
pub enum ClientError {
    /// Required configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request could not be sent or the response could not be read
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response body did not match the expected shape
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The token store failed
    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// HTTP status of a server-side failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build the error for a non-2xx response
    ///
    /// Uses the server's message when the body is a JSON error object and a
    /// generic message otherwise.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorResponse>(body)
            .ok()
            .map(|error| error.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("HTTP error, status={}", status.as_u16()));

        ClientError::Http {
            status: status.as_u16(),
            message,
        }
    }
}

/// Type alias for client results
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_server_message() {
        let error = ClientError::from_response(
            StatusCode::UNAUTHORIZED,
            br#"{"message":"Invalid credentials"}"#,
        );
        assert_eq!(error.to_string(), "Invalid credentials");
        assert_eq!(error.status(), Some(401));
    }

    #[test]
    fn test_accepts_error_field() {
        let error = ClientError::from_response(StatusCode::FORBIDDEN, br#"{"error":"Forbidden"}"#);
        assert_eq!(error.to_string(), "Forbidden");
    }

    #[test]
    fn test_falls_back_on_unparseable_body() {
        let error = ClientError::from_response(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(error.to_string(), "HTTP error, status=502");
    }

    #[test]
    fn test_falls_back_on_empty_body() {
        let error = ClientError::from_response(StatusCode::INTERNAL_SERVER_ERROR, b"");
        assert_eq!(error.to_string(), "HTTP error, status=500");
    }

    #[test]
    fn test_falls_back_on_json_without_message() {
        let error = ClientError::from_response(StatusCode::NOT_FOUND, br#"{"detail":"nope"}"#);
        assert_eq!(error.to_string(), "HTTP error, status=404");

        let error = ClientError::from_response(StatusCode::NOT_FOUND, br#"{"message":""}"#);
        assert_eq!(error.to_string(), "HTTP error, status=404");
    }
}
