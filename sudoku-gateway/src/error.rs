//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sudoku_core::StoreError;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// An error propagated from the puzzle store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GatewayError {
    /// HTTP status this error is reported with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Store(StoreError::PuzzleNotFound(_)) => StatusCode::NOT_FOUND,
            GatewayError::Store(StoreError::InvalidId { .. }) => StatusCode::BAD_REQUEST,
            GatewayError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
