//! Generation stage: document text in, typed quiz out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;

use crate::core::quiz::GeneratorOutput;
use crate::io::chain::{Chain, ChainRequest, execute_and_load};
use crate::io::prompt::{GenerateInputs, render_generate};

use super::write_output_schema;

const QUIZ_OUTPUT_SCHEMA: &str = include_str!("../../schemas/quiz_output.schema.json");

/// Generation-stage wrapper that owns its output schema and prompt.
#[derive(Debug, Clone)]
pub struct GeneratorAgent {
    schema_path: PathBuf,
    output_limit_bytes: usize,
}

impl GeneratorAgent {
    pub fn new(out_dir: &Path, output_limit_bytes: usize) -> Self {
        Self {
            schema_path: out_dir.join("quiz_output.schema.json"),
            output_limit_bytes,
        }
    }

    pub fn run<C: Chain>(
        &self,
        chain: &C,
        workdir: &Path,
        out_dir: &Path,
        inputs: &GenerateInputs,
        timeout: Duration,
    ) -> Result<GeneratorOutput> {
        write_output_schema(&self.schema_path, QUIZ_OUTPUT_SCHEMA)?;

        let prompt = render_generate(inputs)?;
        let request = ChainRequest {
            workdir: workdir.to_path_buf(),
            prompt,
            output_schema_path: self.schema_path.clone(),
            output_path: out_dir.join("quiz_raw.json"),
            chain_log_path: out_dir.join("generator.log"),
            timeout,
            output_limit_bytes: self.output_limit_bytes,
        };

        execute_and_load(chain, &request, QUIZ_OUTPUT_SCHEMA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedChain, quiz_payload, sample_quiz};
    use std::fs;

    fn inputs() -> GenerateInputs {
        GenerateInputs {
            text: "deserts receive very little rainfall".to_string(),
            number: 2,
            subject: "geography".to_string(),
            tone: "simple".to_string(),
            response_json: "{\"1\": {}}".to_string(),
        }
    }

    #[test]
    fn generator_runs_chain_with_rendered_prompt() {
        let temp = tempfile::tempdir().expect("tempdir");
        let out_dir = temp.path().join("output");
        fs::create_dir_all(&out_dir).expect("out dir");

        let quiz = sample_quiz();
        let chain = ScriptedChain::new(vec![quiz_payload(&quiz)]);
        let agent = GeneratorAgent::new(&out_dir, 10_000);

        let output = agent
            .run(&chain, temp.path(), &out_dir, &inputs(), Duration::from_secs(5))
            .expect("run");

        assert_eq!(output.quiz, quiz);
        assert!(out_dir.join("quiz_output.schema.json").is_file());
        let prompts = chain.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("deserts receive very little rainfall"));
        assert!(prompts[0].contains("geography students"));
    }

    #[test]
    fn generator_rejects_quiz_missing_fields() {
        let temp = tempfile::tempdir().expect("tempdir");
        let out_dir = temp.path().join("output");
        fs::create_dir_all(&out_dir).expect("out dir");

        // "correct" missing from the question.
        let chain = ScriptedChain::new(vec![
            "{\"quiz\": {\"1\": {\"mcq\": \"?\", \"options\": {\"a\": \"x\", \"b\": \"y\"}}}}"
                .to_string(),
        ]);
        let agent = GeneratorAgent::new(&out_dir, 10_000);

        let err = agent
            .run(&chain, temp.path(), &out_dir, &inputs(), Duration::from_secs(5))
            .unwrap_err();
        assert!(err.to_string().contains("schema validation"));
    }
}
