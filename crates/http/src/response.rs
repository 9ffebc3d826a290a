//! Uniform response envelope for the biblio API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON wrapper carrying `status_code` plus either a `message` or a `result`
/// payload. The HTTP status of the response mirrors `status_code`.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl Envelope {
    /// The standard `{"status_code": 200, "message": "success"}` body.
    pub fn success() -> Self {
        Self::message(StatusCode::OK, "success")
    }

    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: Some(message.into()),
            result: None,
        }
    }

    pub fn result(result: serde_json::Value) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            message: None,
            result: Some(result),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
