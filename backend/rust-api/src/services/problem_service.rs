use std::sync::Arc;

use crate::clients::{ProblemLookupError, ProblemSource};
use crate::metrics;
use crate::models::ProblemInfo;

/// Looks up problem metadata. The only stage whose failure aborts a request.
pub struct ProblemInfoFetcher {
    source: Arc<dyn ProblemSource>,
}

impl ProblemInfoFetcher {
    pub fn new(source: Arc<dyn ProblemSource>) -> Self {
        Self { source }
    }

    pub async fn fetch(&self, slug: &str) -> Result<ProblemInfo, ProblemLookupError> {
        let result =
            metrics::track_upstream_call("leetcode", self.source.fetch_problem(slug)).await;

        match &result {
            Ok(problem) => tracing::info!(
                "Fetched problem slug={}, id={}, difficulty={}",
                slug,
                problem.id,
                problem.difficulty
            ),
            Err(ProblemLookupError::NotFound { .. }) => {
                tracing::warn!("Problem not found: slug={}", slug)
            }
            Err(e) => tracing::error!("Problem lookup failed for slug={}: {}", slug, e),
        }

        result
    }
}
