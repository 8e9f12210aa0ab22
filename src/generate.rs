//! Pipeline orchestration for the `generate` command.
//!
//! Coordinates I/O (template, document, chain backend) with the pure core:
//! generation stage first, then the review stage over the generated quiz.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::agents::generator::GeneratorAgent;
use crate::agents::reviewer::ReviewerAgent;
use crate::core::quiz::Usage;
use crate::core::table::{QuizRow, quiz_rows};
use crate::io::chain::Chain;
use crate::io::config::PipelineConfig;
use crate::io::document::read_document;
use crate::io::prompt::GenerateInputs;
use crate::io::template::load_template;

/// Inputs for one pipeline run. Paths are resolved against `workdir`.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub document: PathBuf,
    pub template: PathBuf,
    pub out_dir: PathBuf,
    pub number: Option<u32>,
    pub subject: Option<String>,
    pub tone: Option<String>,
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub quiz_path: PathBuf,
    pub review_path: PathBuf,
    pub rows: Vec<QuizRow>,
    pub review: String,
    pub usage: Usage,
}

/// Run the full generate-then-review pipeline.
pub fn run<C: Chain>(
    workdir: &Path,
    chain: &C,
    config: &PipelineConfig,
    options: &GenerateOptions,
) -> Result<GenerateReport> {
    let template = load_template(&workdir.join(&options.template))?;
    let text = read_document(&workdir.join(&options.document))?;

    let out_dir = workdir.join(&options.out_dir);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output dir {}", out_dir.display()))?;

    let number = options.number.unwrap_or(config.defaults.number);
    let subject = options
        .subject
        .clone()
        .unwrap_or_else(|| config.defaults.subject.clone());
    let tone = options
        .tone
        .clone()
        .unwrap_or_else(|| config.defaults.tone.clone());
    // Each stage gets the full budget; the pipeline is two sequential calls.
    let timeout = Duration::from_secs(config.timeout_secs);

    // The template is passed through to the prompt unmodified.
    let response_json =
        serde_json::to_string_pretty(&template).context("serialize response template")?;

    let inputs = GenerateInputs {
        text,
        number,
        subject: subject.clone(),
        tone,
        response_json,
    };

    let generator = GeneratorAgent::new(&out_dir, config.output_limit_bytes);
    let generated = generator.run(chain, workdir, &out_dir, &inputs, timeout)?;
    info!(questions = generated.quiz.len(), "generation stage complete");

    let quiz_json =
        serde_json::to_string_pretty(&generated.quiz).context("serialize generated quiz")?;

    let reviewer = ReviewerAgent::new(&out_dir, config.output_limit_bytes);
    let reviewed = reviewer.run(
        chain, workdir, &out_dir, &subject, number, &quiz_json, timeout,
    )?;
    info!("review stage complete");

    let mut usage = Usage::default();
    if let Some(stage) = &generated.usage {
        usage.absorb(stage);
    }
    if let Some(stage) = &reviewed.usage {
        usage.absorb(stage);
    }
    info!(
        total_tokens = usage.total_tokens,
        prompt_tokens = usage.prompt_tokens,
        completion_tokens = usage.completion_tokens,
        total_cost = usage.total_cost,
        "usage summary"
    );

    let quiz_path = out_dir.join("quiz.json");
    write_json(&quiz_path, &generated.quiz)?;

    let review_path = out_dir.join("review.md");
    let mut review_doc = reviewed.review.clone();
    if !review_doc.ends_with('\n') {
        review_doc.push('\n');
    }
    fs::write(&review_path, review_doc)
        .with_context(|| format!("write {}", review_path.display()))?;

    Ok(GenerateReport {
        quiz_path,
        review_path,
        rows: quiz_rows(&generated.quiz),
        review: reviewed.review,
        usage,
    })
}

/// Serialize `value` to pretty-printed JSON with trailing newline.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut payload = serde_json::to_string_pretty(value).context("serialize json")?;
    payload.push('\n');
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
