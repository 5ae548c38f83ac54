use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chantons_acquire::AcquireError;
use serde_json::json;
use thiserror::Error;

/// Caller-facing failure of a catalogue operation.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// Bad caller input (400).
    #[error("{0}")]
    Validation(String),

    /// The catalogue answered with markup we no longer recognize (500).
    #[error("unexpected catalogue page: {0}")]
    Protocol(String),

    /// The catalogue could not be reached or refused the request (500).
    #[error("catalogue unavailable: {0}")]
    Upstream(String),
}

impl CatalogueError {
    /// Stable machine-readable kind, reported next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogueError::Validation(_) => "validation",
            CatalogueError::Protocol(_) => "protocol",
            CatalogueError::Upstream(_) => "upstream",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CatalogueError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogueError::Protocol(_) | CatalogueError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AcquireError> for CatalogueError {
    fn from(err: AcquireError) -> Self {
        match err {
            AcquireError::Protocol(msg) => CatalogueError::Protocol(msg),
            AcquireError::Upstream(msg) => CatalogueError::Upstream(msg),
        }
    }
}

impl IntoResponse for CatalogueError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "{}", self);
        } else {
            tracing::warn!(kind = self.kind(), "{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}
