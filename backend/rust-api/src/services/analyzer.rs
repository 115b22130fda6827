use crate::clients::ProblemLookupError;
use crate::models::AnalysisResponse;
use crate::services::{
    analysis_service::AnalysisGenerator, problem_service::ProblemInfoFetcher,
    video_service::VideoFinder,
};

/// Per-request pipeline: problem info, then analysis and videos side by side.
pub struct ProblemAnalyzer {
    problems: ProblemInfoFetcher,
    analysis: AnalysisGenerator,
    videos: VideoFinder,
}

impl ProblemAnalyzer {
    pub fn new(
        problems: ProblemInfoFetcher,
        analysis: AnalysisGenerator,
        videos: VideoFinder,
    ) -> Self {
        Self {
            problems,
            analysis,
            videos,
        }
    }

    pub async fn analyze(&self, slug: &str) -> Result<AnalysisResponse, ProblemLookupError> {
        let problem = self.problems.fetch(slug).await?;

        // Both stages degrade internally and only need the problem info.
        let (analysis, videos) = tokio::join!(
            self.analysis
                .generate(&problem.title, &problem.id, problem.difficulty),
            self.videos.search(&problem.title),
        );

        tracing::info!(
            "Analysis ready for slug={}: {} hints, {} videos",
            slug,
            analysis.hints.len(),
            videos.len()
        );

        Ok(AnalysisResponse::assemble(slug, problem, analysis, videos))
    }
}
