use std::sync::Arc;

use crate::clients::{
    build_http_client, GeminiClient, LeetCodeClient, ProblemSource, TextGenerator, VideoSearch,
    YouTubeClient,
};
use crate::config::Config;

pub mod analysis_service;
pub mod analyzer;
pub mod problem_service;
pub mod video_service;

use analysis_service::AnalysisGenerator;
use analyzer::ProblemAnalyzer;
use problem_service::ProblemInfoFetcher;
use video_service::VideoFinder;

pub struct AppState {
    pub config: Config,
    pub analyzer: ProblemAnalyzer,
}

impl AppState {
    /// Wires the real upstream clients from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_http_client(config.http_timeout_secs)?;

        let problems = Arc::new(LeetCodeClient::new(
            http_client.clone(),
            config.leetcode_graphql_url.clone(),
        ));
        let generator = Arc::new(GeminiClient::new(
            http_client.clone(),
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
        ));
        let videos = Arc::new(YouTubeClient::new(
            http_client,
            config.youtube_api_url.clone(),
            config.youtube_api_key.clone(),
        ));

        tracing::info!(
            "Upstream clients ready: leetcode={}, gemini={} ({}), youtube={}",
            config.leetcode_graphql_url,
            config.gemini_api_url,
            config.gemini_model,
            config.youtube_api_url
        );

        Ok(Self::with_upstreams(config, problems, generator, videos))
    }

    /// Builds the state around arbitrary upstream implementations.
    pub fn with_upstreams(
        config: Config,
        problems: Arc<dyn ProblemSource>,
        generator: Arc<dyn TextGenerator>,
        videos: Arc<dyn VideoSearch>,
    ) -> Self {
        let analyzer = ProblemAnalyzer::new(
            ProblemInfoFetcher::new(problems),
            AnalysisGenerator::new(generator, config.target_languages.clone()),
            VideoFinder::new(videos, config.video_query_prefix.clone()),
        );

        Self { config, analyzer }
    }
}
