//! Prompt construction for the generation and review stages.

use anyhow::{Context, Result};
use minijinja::{Environment, context};

const GENERATE_TEMPLATE: &str = include_str!("prompts/generate.md");
const REVIEW_TEMPLATE: &str = include_str!("prompts/review.md");

/// Inputs for the generation prompt.
///
/// `response_json` is the serialized ResponseTemplate, injected verbatim so
/// the backend sees the exact shape the user configured.
#[derive(Debug, Clone)]
pub struct GenerateInputs {
    pub text: String,
    pub number: u32,
    pub subject: String,
    pub tone: String,
    pub response_json: String,
}

/// Render the generation-stage prompt.
pub fn render_generate(inputs: &GenerateInputs) -> Result<String> {
    render(
        "generate",
        GENERATE_TEMPLATE,
        context! {
            text => &inputs.text,
            number => inputs.number,
            subject => &inputs.subject,
            tone => &inputs.tone,
            response_json => &inputs.response_json,
        },
    )
}

/// Render the review-stage prompt around the generated quiz.
pub fn render_review(subject: &str, number: u32, quiz_json: &str) -> Result<String> {
    render(
        "review",
        REVIEW_TEMPLATE,
        context! {
            subject => subject,
            number => number,
            quiz_json => quiz_json,
        },
    )
}

fn render(name: &str, source: &str, ctx: minijinja::Value) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(name, source)
        .with_context(|| format!("parse {name} template"))?;
    let template = env.get_template(name)?;
    let rendered = template
        .render(ctx)
        .with_context(|| format!("render {name} template"))?;
    Ok(rendered)
}
