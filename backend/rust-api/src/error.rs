use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;

use crate::clients::ProblemLookupError;
use crate::utils::time::now_timestamp;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing slug parameter")]
    MissingSlug,

    #[error("{0}")]
    InvalidBody(String),

    #[error("{source}")]
    ProblemLookup {
        slug: String,
        #[source]
        source: ProblemLookupError,
    },

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingSlug | ApiError::InvalidBody(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            // Upstream message is passed through as-is
            ApiError::ProblemLookup { slug, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": source.to_string(),
                    "slug": slug,
                    "timestamp": now_timestamp(),
                })),
            )
                .into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error",
                    "timestamp": now_timestamp(),
                })),
            )
                .into_response(),
        }
    }
}

/// Converts a handler panic into the generic 500 body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!("Request handler panicked: {}", detail);
    ApiError::Internal.into_response()
}
