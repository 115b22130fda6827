use serde::Deserialize;
use std::env;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
const DEFAULT_LEETCODE_GRAPHQL_URL: &str = "https://leetcode.com/graphql";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_url: String,
    pub youtube_api_key: String,
    pub youtube_api_url: String,
    pub leetcode_graphql_url: String,
    pub http_timeout_secs: u64,
    /// Languages the analysis prompt asks the model to focus on.
    pub target_languages: Vec<String>,
    pub video_query_prefix: String,
    /// `user:password` for the metrics endpoint. Metrics are not served when unset.
    pub metrics_auth: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/*.toml first, APP_* variables override it
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let lookup = |key: &str, var: &str| -> Option<String> {
            settings
                .get_string(key)
                .ok()
                .or_else(|| env::var(var).ok())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let gemini_api_key = lookup("gemini.api_key", "GEMINI_API_KEY").ok_or_else(|| {
            config::ConfigError::Message("GEMINI_API_KEY must be set".to_string())
        })?;

        let youtube_api_key = lookup("youtube.api_key", "YOUTUBE_API_KEY").ok_or_else(|| {
            config::ConfigError::Message("YOUTUBE_API_KEY must be set".to_string())
        })?;

        let port = match lookup("server.port", "PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| config::ConfigError::Message(format!("Invalid PORT '{raw}': {e}")))?,
            None => 3000,
        };

        let http_timeout_secs = match lookup("http.timeout_secs", "HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                config::ConfigError::Message(format!("Invalid HTTP_TIMEOUT_SECS '{raw}': {e}"))
            })?,
            None => 30,
        };

        let target_languages = lookup("analysis.target_languages", "TARGET_LANGUAGES")
            .map(|raw| parse_list(&raw))
            .filter(|languages| !languages.is_empty())
            .unwrap_or_else(|| vec!["C++".to_string(), "Python".to_string()]);

        Ok(Config {
            host: lookup("server.host", "HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            gemini_api_key,
            gemini_model: lookup("gemini.model", "GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_url: lookup("gemini.api_url", "GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            youtube_api_key,
            youtube_api_url: lookup("youtube.api_url", "YOUTUBE_API_URL")
                .unwrap_or_else(|| DEFAULT_YOUTUBE_API_URL.to_string()),
            leetcode_graphql_url: lookup("leetcode.graphql_url", "LEETCODE_GRAPHQL_URL")
                .unwrap_or_else(|| DEFAULT_LEETCODE_GRAPHQL_URL.to_string()),
            http_timeout_secs,
            target_languages,
            video_query_prefix: lookup("videos.query_prefix", "VIDEO_QUERY_PREFIX")
                .unwrap_or_else(|| "LeetCode".to_string()),
            metrics_auth: lookup("metrics.auth", "METRICS_AUTH"),
        })
    }

    /// Configuration with the given credentials and every other field at its default.
    pub fn with_credentials(gemini_api_key: &str, youtube_api_key: &str) -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 3000,
            gemini_api_key: gemini_api_key.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            youtube_api_key: youtube_api_key.to_string(),
            youtube_api_url: DEFAULT_YOUTUBE_API_URL.to_string(),
            leetcode_graphql_url: DEFAULT_LEETCODE_GRAPHQL_URL.to_string(),
            http_timeout_secs: 30,
            target_languages: vec!["C++".to_string(), "Python".to_string()],
            video_query_prefix: "LeetCode".to_string(),
            metrics_auth: None,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
