//! Error handling for the biblio HTTP layer.
//!
//! Every failure kind collapses into one fixed 500 envelope on the wire;
//! the concrete cause is logged server-side only.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response::Envelope;

/// Application error types raised by request handlers
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("invalid query string: {0}")]
    Query(#[from] QueryRejection),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a not found error
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        Envelope::message(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_collapses_to_500() {
        let response = AppError::not_found("book", 42).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_error_collapses_to_500() {
        let error = AppError::Internal(anyhow::anyhow!("database connection failed"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_names_the_record() {
        let error = AppError::not_found("book", 42);
        assert_eq!(error.to_string(), "book with id 42 not found");
    }
}
