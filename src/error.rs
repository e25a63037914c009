use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error as ThisError;

/// The two failure kinds handled at the error-translator boundary. Anything
/// else (template failures, listener errors) is outside this taxonomy and
/// falls through to a generic 500.
#[derive(Debug, Clone, ThisError)]
pub enum AppError {
    #[error("{message}")]
    DeviceNotFound { message: String },

    #[error("{message}")]
    UpstreamApi { message: String, status: StatusCode },
}

impl AppError {
    pub fn device_not_found(device: &str) -> Self {
        Self::DeviceNotFound {
            message: format!("Device {device} doesn't exist"),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamApi {
            message: message.into(),
            status: StatusCode::BAD_GATEWAY,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DeviceNotFound { .. } => StatusCode::NOT_FOUND,
            Self::UpstreamApi { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::DeviceNotFound { message } | Self::UpstreamApi { message, .. } => message,
        }
    }

    /// Structured serializable form of the upstream failure, mirrored in the
    /// API error responses.
    pub fn to_json(&self) -> Value {
        json!({ "message": self.message() })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        Self::UpstreamApi {
            message: format!("upstream request failed: {e}"),
            status: e.status().unwrap_or(StatusCode::BAD_GATEWAY),
        }
    }
}

/// The error value rides in the response extensions so the translator
/// middleware can pick the API or HTML rendering based on the request path.
/// Without the middleware the response still carries the right status.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = self.status_code().into_response();
        response.extensions_mut().insert(self);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_failure_kind() {
        assert_eq!(
            AppError::device_not_found("bacon").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::upstream("connect refused").status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn structured_form_carries_the_message() {
        let err = AppError::upstream("feed unavailable");
        assert_eq!(err.to_json(), json!({ "message": "feed unavailable" }));
    }
}
