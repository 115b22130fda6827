use std::sync::Arc;

use crate::clients::VideoSearch;
use crate::metrics::{self, VIDEO_SEARCH_FAILURES_TOTAL};
use crate::models::VideoResult;

pub const MAX_VIDEO_RESULTS: usize = 5;
const QUERY_SUFFIX: &str = "solution explanation";

/// Finds explanation videos for a problem. Never fails: any upstream error
/// yields an empty list.
pub struct VideoFinder {
    search: Arc<dyn VideoSearch>,
    query_prefix: String,
}

impl VideoFinder {
    pub fn new(search: Arc<dyn VideoSearch>, query_prefix: impl Into<String>) -> Self {
        Self {
            search,
            query_prefix: query_prefix.into(),
        }
    }

    pub fn search_query(&self, query: &str) -> String {
        [self.query_prefix.trim(), query.trim(), QUERY_SUFFIX]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub async fn search(&self, query: &str) -> Vec<VideoResult> {
        let search_query = self.search_query(query);

        match metrics::track_upstream_call(
            "youtube",
            self.search.search_videos(&search_query, MAX_VIDEO_RESULTS),
        )
        .await
        {
            Ok(mut videos) => {
                videos.truncate(MAX_VIDEO_RESULTS);
                tracing::debug!("Found {} videos for query='{}'", videos.len(), search_query);
                videos
            }
            Err(e) => {
                tracing::warn!("Video search failed for query='{}': {}", search_query, e);
                VIDEO_SEARCH_FAILURES_TOTAL.inc();
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::UpstreamError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubSearch {
        videos: Option<Vec<VideoResult>>,
        calls: Mutex<Vec<(String, usize)>>,
    }

    #[async_trait]
    impl VideoSearch for StubSearch {
        async fn search_videos(
            &self,
            query: &str,
            max_results: usize,
        ) -> Result<Vec<VideoResult>, UpstreamError> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), max_results));
            self.videos
                .clone()
                .ok_or_else(|| UpstreamError::invalid("youtube", "quota exceeded"))
        }
    }

    fn video(id: &str) -> VideoResult {
        VideoResult {
            video_id: id.to_string(),
            title: format!("Video {id}"),
            channel_title: "Channel".to_string(),
            thumbnail_url: String::new(),
            published_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn builds_query_and_caps_results() {
        let stub = Arc::new(StubSearch {
            videos: Some((0..8).map(|i| video(&i.to_string())).collect()),
            calls: Mutex::new(Vec::new()),
        });
        let finder = VideoFinder::new(stub.clone(), "LeetCode");

        let videos = finder.search("Two Sum").await;

        assert_eq!(videos.len(), MAX_VIDEO_RESULTS);
        assert_eq!(videos[0].video_id, "0");
        let calls = stub.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[("LeetCode Two Sum solution explanation".to_string(), 5)]
        );
    }

    #[tokio::test]
    async fn returns_empty_list_when_search_fails() {
        let stub = Arc::new(StubSearch {
            videos: None,
            calls: Mutex::new(Vec::new()),
        });
        let finder = VideoFinder::new(stub, "LeetCode");

        assert!(finder.search("Two Sum").await.is_empty());
    }

    #[test]
    fn empty_prefix_is_skipped() {
        let stub = Arc::new(StubSearch {
            videos: Some(Vec::new()),
            calls: Mutex::new(Vec::new()),
        });
        let finder = VideoFinder::new(stub, "");
        assert_eq!(finder.search_query("LRU Cache"), "LRU Cache solution explanation");
    }
}
