use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::problem::{Difficulty, ProblemInfo};
use super::video::VideoResult;
use crate::utils::{number::number_to_string, time::now_timestamp};

/// Algorithm summary and progressive hints for one problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    pub algorithms: String,
    pub hints: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub slug: Option<Value>,
}

impl AnalyzeRequest {
    /// Trimmed slug. Numbers are accepted as their decimal text; null, blank
    /// strings and other JSON types count as missing.
    pub fn slug(&self) -> Option<String> {
        let slug = match self.slug.as_ref()? {
            Value::String(text) => text.trim().to_string(),
            Value::Number(number) => number_to_string(number),
            _ => return None,
        };

        (!slug.is_empty()).then_some(slug)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub slug: String,
    pub problem_id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub algorithms: String,
    pub hints: Vec<String>,
    pub youtube_links: Vec<VideoResult>,
    pub timestamp: String,
}

impl AnalysisResponse {
    pub fn assemble(
        slug: &str,
        problem: ProblemInfo,
        analysis: AnalysisResult,
        videos: Vec<VideoResult>,
    ) -> Self {
        Self {
            slug: slug.to_string(),
            problem_id: problem.id,
            title: problem.title,
            difficulty: problem.difficulty,
            algorithms: analysis.algorithms,
            hints: analysis.hints,
            youtube_links: videos,
            timestamp: now_timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_slug_counts_as_missing() {
        let req: AnalyzeRequest = serde_json::from_str(r#"{"slug": "   "}"#).unwrap();
        assert_eq!(req.slug(), None);

        let req: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.slug(), None);

        let req: AnalyzeRequest = serde_json::from_str(r#"{"slug": null}"#).unwrap();
        assert_eq!(req.slug(), None);

        let req: AnalyzeRequest = serde_json::from_str(r#"{"slug": " two-sum "}"#).unwrap();
        assert_eq!(req.slug().as_deref(), Some("two-sum"));
    }

    #[test]
    fn non_string_slug_does_not_reject_the_body() {
        let req: AnalyzeRequest = serde_json::from_str(r#"{"slug": 123}"#).unwrap();
        assert_eq!(req.slug().as_deref(), Some("123"));

        let req: AnalyzeRequest = serde_json::from_str(r#"{"slug": 7.0}"#).unwrap();
        assert_eq!(req.slug().as_deref(), Some("7"));

        let req: AnalyzeRequest = serde_json::from_str(r#"{"slug": ["two-sum"]}"#).unwrap();
        assert_eq!(req.slug(), None);

        let req: AnalyzeRequest = serde_json::from_str(r#"{"slug": false}"#).unwrap();
        assert_eq!(req.slug(), None);
    }

    #[test]
    fn response_serializes_with_camel_case_fields() {
        let response = AnalysisResponse::assemble(
            "two-sum",
            ProblemInfo {
                id: "1".into(),
                title: "Two Sum".into(),
                difficulty: Difficulty::Easy,
            },
            AnalysisResult {
                algorithms: "Hash map".into(),
                hints: vec!["Look up complements".into()],
            },
            vec![],
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["problemId"], "1");
        assert_eq!(json["difficulty"], "Easy");
        assert_eq!(json["youtubeLinks"], serde_json::json!([]));
        assert!(json["timestamp"].is_string());
    }
}
