#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use leetcode_helper_api::{
    clients::{ProblemLookupError, ProblemSource, TextGenerator, UpstreamError, VideoSearch},
    config::Config,
    create_router,
    models::{Difficulty, ProblemInfo, VideoResult},
    services::AppState,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use tower::ServiceExt;

pub enum ProblemOutcome {
    Found(ProblemInfo),
    NotFound,
    Unavailable,
    Panics,
}

pub struct FakeProblems {
    outcome: ProblemOutcome,
    calls: AtomicUsize,
}

impl FakeProblems {
    pub fn new(outcome: ProblemOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn two_sum() -> Arc<Self> {
        Self::new(ProblemOutcome::Found(ProblemInfo {
            id: "1".to_string(),
            title: "Two Sum".to_string(),
            difficulty: Difficulty::Easy,
        }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProblemSource for FakeProblems {
    async fn fetch_problem(&self, slug: &str) -> Result<ProblemInfo, ProblemLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            ProblemOutcome::Found(problem) => Ok(problem.clone()),
            ProblemOutcome::NotFound => Err(ProblemLookupError::NotFound {
                slug: slug.to_string(),
            }),
            ProblemOutcome::Unavailable => Err(UpstreamError::InvalidResponse {
                service: "leetcode",
                message: "connection reset".to_string(),
            }
            .into()),
            ProblemOutcome::Panics => panic!("metadata client exploded"),
        }
    }
}

pub struct FakeGenerator {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, UpstreamError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or_else(|| UpstreamError::InvalidResponse {
            service: "gemini",
            message: "quota exhausted".to_string(),
        })
    }
}

pub struct FakeVideos {
    videos: Option<Vec<VideoResult>>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeVideos {
    pub fn returning(videos: Vec<VideoResult>) -> Arc<Self> {
        Arc::new(Self {
            videos: Some(videos),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            videos: None,
            queries: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl VideoSearch for FakeVideos {
    async fn search_videos(
        &self,
        query: &str,
        _max_results: usize,
    ) -> Result<Vec<VideoResult>, UpstreamError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.videos.clone().ok_or_else(|| UpstreamError::InvalidResponse {
            service: "youtube",
            message: "forbidden".to_string(),
        })
    }
}

pub fn video(id: &str, title: &str) -> VideoResult {
    VideoResult {
        video_id: id.to_string(),
        title: title.to_string(),
        channel_title: "NeetCode".to_string(),
        thumbnail_url: format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg"),
        published_at: "2021-06-01T12:00:00Z".to_string(),
    }
}

pub fn test_config() -> Config {
    Config::with_credentials("test-gemini-key", "test-youtube-key")
}

pub fn create_test_app_with_config(
    config: Config,
    problems: Arc<FakeProblems>,
    generator: Arc<FakeGenerator>,
    videos: Arc<FakeVideos>,
) -> Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let state = AppState::with_upstreams(config, problems, generator, videos);
    create_router(Arc::new(state))
}

pub fn create_test_app(
    problems: Arc<FakeProblems>,
    generator: Arc<FakeGenerator>,
    videos: Arc<FakeVideos>,
) -> Router {
    create_test_app_with_config(test_config(), problems, generator, videos)
}

pub fn analyze_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}
