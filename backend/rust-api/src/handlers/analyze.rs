use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    error::ApiError,
    extractors::AppJson,
    metrics::ANALYSES_TOTAL,
    models::{AnalysisResponse, AnalyzeRequest},
    services::AppState,
};

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Some(slug) = req.slug() else {
        ANALYSES_TOTAL.with_label_values(&["bad_request"]).inc();
        return Err(ApiError::MissingSlug);
    };

    tracing::info!("Analyzing problem slug={}", slug);

    match state.analyzer.analyze(&slug).await {
        Ok(response) => {
            ANALYSES_TOTAL.with_label_values(&["succeeded"]).inc();
            Ok(Json(response))
        }
        Err(source) => {
            ANALYSES_TOTAL.with_label_values(&["failed"]).inc();
            Err(ApiError::ProblemLookup { slug, source })
        }
    }
}
