//! API error responses.
//!
//! `From<GatewayError>` is the single place where gateway errors become HTTP
//! responses. It logs the full error and keeps only the public message for
//! the body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gateway_core::{ErrorClass, GatewayError};
use serde::Serialize;
use tracing::{error, warn};

/// HTTP error response
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status
    pub status: StatusCode,
    /// Error class name exposed to callers
    pub error_type: &'static str,
    /// Caller-safe message
    pub message: String,
}

impl ApiError {
    /// Create an error with an explicit status
    pub fn new(status: StatusCode, error_type: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error_type,
            message: message.into(),
        }
    }

    /// 400 with the client error class
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorClass::ClientError.as_str(),
            message,
        )
    }

    /// 500 with the generic internal message
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorClass::Internal.as_str(),
            "Internal server error",
        )
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        let class = err.class();

        if err.is_client_error() {
            warn!(kind = err.kind().as_str(), error = %err, "Request rejected");
        } else {
            error!(kind = err.kind().as_str(), error = %err, "Request failed");
        }

        let status = StatusCode::from_u16(class.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        Self::new(status, class.as_str(), err.public_message())
    }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    status: &'static str,
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    #[serde(rename = "type")]
    error_type: &'a str,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope {
            status: "error",
            error: ErrorDetail {
                error_type: self.error_type,
                message: &self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::{FormatIssue, ProviderKind};

    #[test]
    fn test_validation_maps_to_400() {
        let err: ApiError =
            GatewayError::validation("Message cannot be empty", Some("message".into())).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type, "invalid_request_error");
        assert_eq!(err.message, "Message cannot be empty");
    }

    #[test]
    fn test_content_blocked_maps_to_400() {
        let err: ApiError = GatewayError::content_blocked("HARM_CATEGORY").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Content blocked: Harm Category");
    }

    #[test]
    fn test_missing_credential_hides_provider() {
        let err: ApiError = GatewayError::MissingCredential {
            provider: ProviderKind::OpenAI,
        }
        .into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type, "configuration_error");
        assert!(!err.message.to_lowercase().contains("openai"));
    }

    #[test]
    fn test_upstream_transport_maps_to_502() {
        let err: ApiError = GatewayError::upstream_transport(
            ProviderKind::Gemini,
            Some(503),
            "HTTP 503 upstream detail",
        )
        .into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.message, "Model API request failed");
    }

    #[test]
    fn test_upstream_format_maps_to_500() {
        let err: ApiError =
            GatewayError::upstream_format(ProviderKind::DeepSeek, FormatIssue::NoChoices).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type, "internal_error");
        assert_eq!(err.message, "No response generated");

        let err: ApiError = GatewayError::malformed(ProviderKind::Gemini, "expected object").into();
        assert_eq!(err.message, "Invalid API response format");
    }

    #[test]
    fn test_internal_hides_detail() {
        let err: ApiError = GatewayError::internal("db password is hunter2").into();
        assert_eq!(err.message, "Internal server error");
    }
}
