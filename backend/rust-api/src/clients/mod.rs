//! Adapters for the three external services.
//!
//! Services depend on the traits below rather than on the concrete clients so
//! they can be exercised with in-memory fakes.

use async_trait::async_trait;
use std::time::Duration;

use crate::models::{ProblemInfo, VideoResult};

pub mod gemini;
pub mod leetcode;
pub mod youtube;

pub use gemini::GeminiClient;
pub use leetcode::LeetCodeClient;
pub use youtube::YouTubeClient;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned status {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{service} returned an unexpected response: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },
}

impl UpstreamError {
    pub(crate) fn transport(service: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { service, source }
    }

    pub(crate) fn invalid(service: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            service,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProblemLookupError {
    #[error("Problem '{slug}' not found")]
    NotFound { slug: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Problem metadata lookup by slug.
#[async_trait]
pub trait ProblemSource: Send + Sync {
    async fn fetch_problem(&self, slug: &str) -> Result<ProblemInfo, ProblemLookupError>;
}

/// Free-text completion for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Relevance-ordered video search.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search_videos(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<VideoResult>, UpstreamError>;
}

/// Shared outbound client for every upstream call.
pub fn build_http_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("leetcode-helper-api/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Turns a non-2xx response into `UpstreamError::Status`, keeping the body text.
pub(crate) async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, UpstreamError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(UpstreamError::Status {
        service,
        status,
        body,
    })
}
