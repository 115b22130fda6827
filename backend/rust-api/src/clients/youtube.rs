use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ensure_success, UpstreamError, VideoSearch};
use crate::models::VideoResult;

const SERVICE: &str = "youtube";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

impl SearchItem {
    fn into_video(self) -> Option<VideoResult> {
        let video_id = self.id.video_id?;
        let thumbnail_url = self
            .snippet
            .thumbnails
            .medium
            .and_then(|thumbnail| thumbnail.url)
            .unwrap_or_default();

        Some(VideoResult {
            video_id,
            title: self.snippet.title,
            channel_title: self.snippet.channel_title,
            thumbnail_url,
            published_at: self.snippet.published_at,
        })
    }
}

/// YouTube Data API v3 search client.
pub struct YouTubeClient {
    http_client: Client,
    api_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(http_client: Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search_videos(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<VideoResult>, UpstreamError> {
        let url = format!("{}/search", self.api_url.trim_end_matches('/'));
        let max_results = max_results.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("order", "relevance"),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;

        let payload: SearchResponse = ensure_success(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(|e| UpstreamError::invalid(SERVICE, e.to_string()))?;

        Ok(payload
            .items
            .into_iter()
            .filter_map(SearchItem::into_video)
            .collect())
    }
}
