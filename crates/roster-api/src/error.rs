use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use roster_types::validation::Violation;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request")]
    Validation(Vec<Violation>),

    #[error("The userId already exists : {user_id}")]
    Conflict { user_id: String },

    /// Answered with 400, not 404, to keep the existing client contract.
    #[error("Not found user")]
    NotFound { user_id: String },

    #[error("store failure: {0:#}")]
    Store(anyhow::Error),

    #[error("worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::NotFound { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Store(_) | Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let reason = status.canonical_reason().unwrap_or_default();

        let body = match &self {
            Self::Validation(violations) => json!({
                "status": status.as_u16(),
                "error": reason,
                "message": self.to_string(),
                "violations": violations,
            }),
            Self::Store(_) | Self::Worker(_) => {
                error!("{}", self);
                json!({
                    "status": status.as_u16(),
                    "error": reason,
                    "message": "Internal server error",
                })
            }
            _ => json!({
                "status": status.as_u16(),
                "error": reason,
                "message": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
