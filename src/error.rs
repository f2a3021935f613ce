use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Everything a request can fail with, translated to an HTTP status and a
/// JSON body at the handler boundary. No failure is fatal to the process.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller did not supply an upstream credential.
    #[error("missing API key")]
    MissingApiKey,
    /// One or more required level parameters were absent or blank.
    #[error("missing required fields")]
    MissingFields,
    /// The upstream API responded with a non-success status; carries the
    /// verbatim upstream error body.
    #[error("upstream API error: {0}")]
    Upstream(String),
    /// Transport failures and anything else unexpected.
    #[error("server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingApiKey => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Missing API key",
                    "message": "Provide your OpenAI API key in the apiKey field.",
                }),
            ),
            ApiError::MissingFields => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing required fields" }),
            ),
            ApiError::Upstream(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "OpenAI API error", "detail": detail }),
            ),
            ApiError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Server error", "detail": detail }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_a_client_error() {
        let response = ApiError::MissingApiKey.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_error_is_a_server_error() {
        let response = ApiError::Upstream("rate limited".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(ApiError::MissingApiKey.to_string(), "missing API key");
        assert_eq!(
            ApiError::MissingFields.to_string(),
            "missing required fields"
        );
    }
}
