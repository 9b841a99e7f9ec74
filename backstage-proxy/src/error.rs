//! Error responses for the proxy endpoint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced to the caller as `{error, details?}`
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Token header or project id absent; rejected before any outbound call
    #[error("Missing token or projectId")]
    MissingInput,

    /// Upstream answered with a non-success status
    #[error("ABOSS returned {}", .status.as_u16())]
    Upstream { status: StatusCode, body: String },

    /// Upstream unreachable, or its success body was not JSON
    #[error("Failed to reach ABOSS API")]
    Transport(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingInput => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        ProxyError::Transport(e.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let body = match self {
            ProxyError::MissingInput => json!({ "error": message }),
            ProxyError::Upstream { body, .. } => json!({
                "error": message,
                "details": body,
            }),
            ProxyError::Transport(details) => json!({
                "error": message,
                "details": details,
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ProxyError::MissingInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProxyError::Transport("refused".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        let upstream = ProxyError::Upstream {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        };
        assert_eq!(upstream.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(upstream.to_string(), "ABOSS returned 401");
    }
}
