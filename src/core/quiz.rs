//! Quiz data model and chain payload handling.
//!
//! These types define the stable contract between the pipeline stages and the
//! chain backend. They must stay deterministic: question keys are held in a
//! `BTreeMap` so serialized output is stable across runs.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single multiple-choice question as produced by the generation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    /// Question text.
    pub mcq: String,
    /// Option key (e.g. `"a"`) to option text.
    pub options: BTreeMap<String, String>,
    /// Key of the correct option.
    pub correct: String,
}

/// Full quiz keyed by question id (usually `"1"`, `"2"`, ...).
pub type Quiz = BTreeMap<String, QuizItem>;

/// Token/cost accounting reported by a chain stage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
}

impl Usage {
    /// Accumulate another stage's usage into this report.
    pub fn absorb(&mut self, other: &Usage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
        self.total_cost += other.total_cost;
    }
}

/// Output of the generation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorOutput {
    pub quiz: Quiz,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Output of the review stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutput {
    pub review: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Extract the JSON payload from raw chain output.
///
/// Backends frequently wrap the payload in a Markdown code fence or surround
/// it with prose. A fenced block wins; otherwise the outermost `{...}` span
/// is taken.
pub fn extract_json(raw: &str) -> Result<String> {
    let fence = Regex::new(r"(?s)```(?:json)?\s*(.+?)\s*```").context("compile fence pattern")?;
    if let Some(caps) = fence.captures(raw) {
        return Ok(caps[1].trim().to_string());
    }
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => Ok(raw[start..=end].to_string()),
        _ => bail!("no JSON object found in chain output"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_quiz;

    #[test]
    fn extract_json_passes_bare_object_through() {
        let raw = r#"{"quiz": {}}"#;
        assert_eq!(extract_json(raw).expect("extract"), raw);
    }

    #[test]
    fn extract_json_strips_markdown_fence() {
        let raw = "Here you go:\n```json\n{\"quiz\": {}}\n```\nDone.";
        assert_eq!(extract_json(raw).expect("extract"), "{\"quiz\": {}}");
    }

    #[test]
    fn extract_json_takes_outer_braces_from_prose() {
        let raw = "Result: {\"review\": \"ok\"} -- end";
        assert_eq!(extract_json(raw).expect("extract"), "{\"review\": \"ok\"}");
    }

    #[test]
    fn extract_json_rejects_output_without_object() {
        let err = extract_json("sorry, I cannot do that").unwrap_err();
        assert!(err.to_string().contains("no JSON object"));
    }

    #[test]
    fn usage_absorb_sums_fields() {
        let mut total = Usage::default();
        total.absorb(&Usage {
            prompt_tokens: 100,
            completion_tokens: 40,
            total_tokens: 140,
            total_cost: 0.002,
        });
        total.absorb(&Usage {
            prompt_tokens: 60,
            completion_tokens: 10,
            total_tokens: 70,
            total_cost: 0.001,
        });
        assert_eq!(total.prompt_tokens, 160);
        assert_eq!(total.completion_tokens, 50);
        assert_eq!(total.total_tokens, 210);
        assert!((total.total_cost - 0.003).abs() < 1e-9);
    }

    #[test]
    fn generator_output_round_trips_without_usage() {
        let output = GeneratorOutput {
            quiz: sample_quiz(),
            usage: None,
        };
        let json = serde_json::to_string(&output).expect("serialize");
        assert!(!json.contains("usage"));
        let parsed: GeneratorOutput = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed, output);
    }
}
