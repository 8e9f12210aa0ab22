//! Review stage: generated quiz in, complexity analysis out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;

use crate::core::quiz::ReviewOutput;
use crate::io::chain::{Chain, ChainRequest, execute_and_load};
use crate::io::prompt::render_review;

use super::write_output_schema;

const REVIEW_OUTPUT_SCHEMA: &str = include_str!("../../schemas/review_output.schema.json");

/// Review-stage wrapper that owns its output schema and prompt.
#[derive(Debug, Clone)]
pub struct ReviewerAgent {
    schema_path: PathBuf,
    output_limit_bytes: usize,
}

impl ReviewerAgent {
    pub fn new(out_dir: &Path, output_limit_bytes: usize) -> Self {
        Self {
            schema_path: out_dir.join("review_output.schema.json"),
            output_limit_bytes,
        }
    }

    pub fn run<C: Chain>(
        &self,
        chain: &C,
        workdir: &Path,
        out_dir: &Path,
        subject: &str,
        number: u32,
        quiz_json: &str,
        timeout: Duration,
    ) -> Result<ReviewOutput> {
        write_output_schema(&self.schema_path, REVIEW_OUTPUT_SCHEMA)?;

        let prompt = render_review(subject, number, quiz_json)?;
        let request = ChainRequest {
            workdir: workdir.to_path_buf(),
            prompt,
            output_schema_path: self.schema_path.clone(),
            output_path: out_dir.join("review_raw.json"),
            chain_log_path: out_dir.join("reviewer.log"),
            timeout,
            output_limit_bytes: self.output_limit_bytes,
        };

        execute_and_load(chain, &request, REVIEW_OUTPUT_SCHEMA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedChain;
    use std::fs;

    #[test]
    fn reviewer_embeds_quiz_in_prompt() {
        let temp = tempfile::tempdir().expect("tempdir");
        let out_dir = temp.path().join("output");
        fs::create_dir_all(&out_dir).expect("out dir");

        let chain = ScriptedChain::new(vec![
            "{\"review\": \"age appropriate\", \"usage\": {\"total_tokens\": 12}}".to_string(),
        ]);
        let agent = ReviewerAgent::new(&out_dir, 10_000);

        let output = agent
            .run(
                &chain,
                temp.path(),
                &out_dir,
                "geography",
                2,
                "{\"1\": {\"mcq\": \"?\"}}",
                Duration::from_secs(5),
            )
            .expect("run");

        assert_eq!(output.review, "age appropriate");
        assert_eq!(output.usage.expect("usage").total_tokens, 12);
        let prompts = chain.prompts();
        assert!(prompts[0].contains("{\"1\": {\"mcq\": \"?\"}}"));
        assert!(prompts[0].contains("geography students"));
    }
}
