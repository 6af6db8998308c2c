//! Errors returned by the admissions API client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got a response (DNS, connect, timeout, TLS)
    #[error("Could not reach the admissions server: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Failed to encode the application: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status for server-side failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Encode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_displays_message_only() {
        let err = ApiError::Server {
            status: 422,
            message: "Roll number already registered".to_string(),
        };
        assert_eq!(err.to_string(), "Roll number already registered");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_encode_error_has_no_status() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::from(json_err);
        assert!(err.status().is_none());
        assert!(err.to_string().starts_with("Failed to encode"));
    }
}
