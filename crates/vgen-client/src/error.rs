//! Client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Server responded with a non-2xx status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// No response was received (connect failure, timeout, broken body).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request could not be constructed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A 2xx response body could not be decoded.
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Check for the distinguished "resource not yet available" signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }

    /// Best user-facing message: the backend's body when it sent one,
    /// the transport error otherwise.
    pub fn server_message(&self) -> String {
        match self {
            ClientError::Status { body, status } if !body.trim().is_empty() => {
                extract_detail(body).unwrap_or_else(|| format!("server returned {status}: {body}"))
            }
            other => other.to_string(),
        }
    }
}

/// Pull a human-readable `detail`/`error` field out of a JSON error body.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["detail", "error", "message"] {
        if let Some(s) = value.get(key).and_then(|v| v.as_str()) {
            return Some(s.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = ClientError::Status {
            status: 404,
            body: String::new(),
        };
        assert!(err.is_not_found());

        let err = ClientError::Status {
            status: 500,
            body: String::new(),
        };
        assert!(!err.is_not_found());

        assert!(!ClientError::InvalidRequest("bad".into()).is_not_found());
    }

    #[test]
    fn test_server_message_prefers_detail_field() {
        let err = ClientError::Status {
            status: 422,
            body: r#"{"detail": "prompt too long"}"#.to_string(),
        };
        assert_eq!(err.server_message(), "prompt too long");
    }

    #[test]
    fn test_server_message_falls_back_to_raw_body() {
        let err = ClientError::Status {
            status: 500,
            body: "upstream exploded".to_string(),
        };
        assert_eq!(err.server_message(), "server returned 500: upstream exploded");
    }
}
