//! Test-only helpers for scripted chains and sample quiz data.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;

use anyhow::{Result, anyhow};
use serde_json::json;

use crate::core::quiz::{Quiz, QuizItem};
use crate::io::chain::{Chain, ChainRequest};
use crate::io::template::ResponseTemplate;

/// Chain backend that replays predetermined payloads and records prompts.
pub struct ScriptedChain {
    outputs: RefCell<VecDeque<String>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedChain {
    pub fn new(outputs: Vec<String>) -> Self {
        Self {
            outputs: RefCell::new(outputs.into()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Chain for ScriptedChain {
    fn exec(&self, request: &ChainRequest) -> Result<()> {
        self.prompts.borrow_mut().push(request.prompt.clone());
        let payload = self
            .outputs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("scripted chain has no more outputs"))?;
        if let Some(parent) = request.output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&request.output_path, payload)?;
        Ok(())
    }
}

/// Deterministic question with three options and answer `"b"`.
pub fn quiz_item(mcq: &str) -> QuizItem {
    QuizItem {
        mcq: mcq.to_string(),
        options: [("a", "ocean"), ("b", "desert"), ("c", "forest")]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
        correct: "b".to_string(),
    }
}

/// Two-question quiz with deterministic contents.
pub fn sample_quiz() -> Quiz {
    let mut quiz = Quiz::new();
    quiz.insert(
        "1".to_string(),
        quiz_item("Which biome receives the least rainfall?"),
    );
    quiz.insert(
        "2".to_string(),
        quiz_item("Which biome covers most of the Sahara?"),
    );
    quiz
}

/// Minimal response template in the shape the original tool used.
pub fn sample_template() -> ResponseTemplate {
    let value = json!({
        "1": {
            "mcq": "multiple choice question",
            "options": {
                "a": "choice here",
                "b": "choice here",
                "c": "choice here"
            },
            "correct": "correct answer"
        }
    });
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("sample template is an object"),
    }
}

/// Generation-stage payload for `quiz`, including a small usage report.
pub fn quiz_payload(quiz: &Quiz) -> String {
    serde_json::to_string(&json!({
        "quiz": quiz,
        "usage": {
            "prompt_tokens": 100,
            "completion_tokens": 50,
            "total_tokens": 150,
            "total_cost": 0.002
        }
    }))
    .expect("serialize quiz payload")
}

/// Review-stage payload with a small usage report.
pub fn review_payload(review: &str) -> String {
    serde_json::to_string(&json!({
        "review": review,
        "usage": {
            "prompt_tokens": 40,
            "completion_tokens": 20,
            "total_tokens": 60,
            "total_cost": 0.001
        }
    }))
    .expect("serialize review payload")
}

/// Temp workspace holding a template and a text document ready for a run.
pub fn sample_workspace() -> Result<tempfile::TempDir> {
    let temp = tempfile::tempdir()?;
    let template = sample_template();
    fs::write(
        temp.path().join("Response.json"),
        serde_json::to_string_pretty(&template)?,
    )?;
    fs::create_dir_all(temp.path().join("data"))?;
    fs::write(
        temp.path().join("data/document.txt"),
        "Deserts receive very little rainfall. The Sahara is the largest hot desert.\n",
    )?;
    Ok(temp)
}
