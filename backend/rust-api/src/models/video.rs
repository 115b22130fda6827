use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoResult {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    /// Empty when the search service returned no thumbnail.
    pub thumbnail_url: String,
    pub published_at: String,
}
