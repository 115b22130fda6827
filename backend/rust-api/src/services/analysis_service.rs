use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

use crate::clients::TextGenerator;
use crate::metrics::{self, ANALYSIS_FALLBACKS_TOTAL};
use crate::models::{AnalysisResult, Difficulty};
use crate::utils::number::number_to_string;

lazy_static! {
    // Opening (```json, ```python, ...) and closing fences, with the rest of the fence line.
    static ref CODE_FENCE: Regex = Regex::new(r"```[A-Za-z0-9_+\-]*[ \t]*\r?\n?").unwrap();
}

const FALLBACK_HINTS: [&str; 3] = [
    "Start by understanding the problem constraints and edge cases",
    "Consider the time and space complexity requirements",
    "Think about common patterns for this type of problem",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepairError {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("model output is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("`algorithms` is missing or empty")]
    MissingAlgorithms,

    #[error("`hints` is not an array")]
    HintsNotArray,

    #[error("`hints` is empty")]
    EmptyHints,
}

impl RepairError {
    fn reason(&self) -> &'static str {
        match self {
            RepairError::NoJsonObject => "no_json_object",
            RepairError::InvalidJson(_) => "invalid_json",
            RepairError::MissingAlgorithms => "missing_algorithms",
            RepairError::HintsNotArray => "hints_not_array",
            RepairError::EmptyHints => "empty_hints",
        }
    }
}

/// Asks the AI service for an algorithm summary plus hints and always returns a
/// well-formed result, degrading to [`fallback_analysis`] on any failure.
pub struct AnalysisGenerator {
    generator: Arc<dyn TextGenerator>,
    target_languages: Vec<String>,
}

impl AnalysisGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, target_languages: Vec<String>) -> Self {
        Self {
            generator,
            target_languages,
        }
    }

    pub async fn generate(
        &self,
        title: &str,
        problem_id: &str,
        difficulty: Difficulty,
    ) -> AnalysisResult {
        let prompt = build_prompt(title, problem_id, difficulty, &self.target_languages);

        let raw = match metrics::track_upstream_call(
            "gemini",
            self.generator.generate_text(&prompt),
        )
        .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("AI generation failed for problem={}: {}", problem_id, e);
                ANALYSIS_FALLBACKS_TOTAL
                    .with_label_values(&["upstream_error"])
                    .inc();
                return fallback_analysis(title, difficulty);
            }
        };

        match repair_analysis(&raw) {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!("Discarding malformed AI reply for problem={}: {}", problem_id, e);
                ANALYSIS_FALLBACKS_TOTAL
                    .with_label_values(&[e.reason()])
                    .inc();
                fallback_analysis(title, difficulty)
            }
        }
    }
}

pub fn build_prompt(
    title: &str,
    problem_id: &str,
    difficulty: Difficulty,
    target_languages: &[String],
) -> String {
    let languages = target_languages.join(" and ");

    format!(
        r#"You are an expert competitive programming coach.
Analyze LeetCode problem #{problem_id} "{title}" (difficulty: {difficulty}).

1. Recommend the algorithms and data structures best suited to solve it, with time and space complexity notes.
2. Provide an ordered list of progressive hints, from a gentle nudge to a near-complete approach. Every hint must be a plain string.
3. Where implementation details matter, focus on {languages}.

Respond with ONLY a JSON object with exactly these two fields and nothing else (no markdown, no code fences, no commentary):
{{
  "algorithms": "string describing the recommended algorithms, data structures and complexity",
  "hints": ["first hint", "second hint", "third hint"]
}}"#
    )
}

/// Deterministic result served whenever the AI reply cannot be used.
pub fn fallback_analysis(title: &str, difficulty: Difficulty) -> AnalysisResult {
    AnalysisResult {
        algorithms: format!(
            "Error generating analysis for {}. Try manual analysis using {} level approaches.",
            title, difficulty
        ),
        hints: FALLBACK_HINTS.iter().map(|hint| hint.to_string()).collect(),
    }
}

/// Extracts and validates the analysis object embedded in free-form model output.
pub fn repair_analysis(raw: &str) -> Result<AnalysisResult, RepairError> {
    tracing::debug!(raw = %raw, "Raw AI reply");

    let cleaned = CODE_FENCE.replace_all(raw, "");

    let start = cleaned.find('{').ok_or(RepairError::NoJsonObject)?;
    let end = cleaned.rfind('}').ok_or(RepairError::NoJsonObject)?;
    if end <= start {
        return Err(RepairError::NoJsonObject);
    }

    let extracted = &cleaned[start..=end];
    tracing::debug!(extracted = %extracted, "Extracted AI JSON");

    let value: Value =
        serde_json::from_str(extracted).map_err(|e| RepairError::InvalidJson(e.to_string()))?;

    let algorithms = value
        .get("algorithms")
        .filter(|algorithms| is_truthy(algorithms))
        .ok_or(RepairError::MissingAlgorithms)?;

    let hints = value
        .get("hints")
        .and_then(Value::as_array)
        .ok_or(RepairError::HintsNotArray)?;
    if hints.is_empty() {
        return Err(RepairError::EmptyHints);
    }

    Ok(AnalysisResult {
        algorithms: coerce_to_string(algorithms),
        hints: hints
            .iter()
            .enumerate()
            .map(|(index, hint)| match hint {
                Value::Object(_) | Value::Array(_) | Value::Null => {
                    format!("Hint {}: {}", index + 1, hint)
                }
                other => coerce_to_string(other),
            })
            .collect(),
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Number(number) => number_to_string(number),
        other => other.to_string(),
    }
}
