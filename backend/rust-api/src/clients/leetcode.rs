use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{ensure_success, ProblemLookupError, ProblemSource, UpstreamError};
use crate::models::{Difficulty, ProblemInfo};

const SERVICE: &str = "leetcode";

const QUESTION_QUERY: &str = r#"
    query questionData($titleSlug: String!) {
        question(titleSlug: $titleSlug) {
            questionId
            title
            difficulty
        }
    }
"#;

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<QuestionData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct QuestionData {
    #[serde(default)]
    question: Option<Question>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Question {
    question_id: String,
    title: String,
    difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// LeetCode GraphQL metadata client.
pub struct LeetCodeClient {
    http_client: Client,
    graphql_url: String,
}

impl LeetCodeClient {
    pub fn new(http_client: Client, graphql_url: impl Into<String>) -> Self {
        Self {
            http_client,
            graphql_url: graphql_url.into(),
        }
    }
}

#[async_trait]
impl ProblemSource for LeetCodeClient {
    async fn fetch_problem(&self, slug: &str) -> Result<ProblemInfo, ProblemLookupError> {
        let body = json!({
            "query": QUESTION_QUERY,
            "variables": { "titleSlug": slug },
        });

        let response = self
            .http_client
            .post(&self.graphql_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;

        let payload: GraphqlResponse = ensure_success(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(|e| UpstreamError::invalid(SERVICE, e.to_string()))?;

        // A null or absent question means an unknown slug, even alongside `errors`
        match payload.data {
            Some(QuestionData {
                question: Some(question),
            }) => Ok(ProblemInfo {
                id: question.question_id,
                title: question.title,
                difficulty: question.difficulty,
            }),
            Some(QuestionData { question: None }) => Err(ProblemLookupError::NotFound {
                slug: slug.to_string(),
            }),
            None if !payload.errors.is_empty() => {
                let messages: Vec<&str> =
                    payload.errors.iter().map(|e| e.message.as_str()).collect();
                Err(UpstreamError::invalid(SERVICE, messages.join("; ")).into())
            }
            None => Err(UpstreamError::invalid(SERVICE, "response has no `data` field").into()),
        }
    }
}
