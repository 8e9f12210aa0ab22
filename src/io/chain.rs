//! Chain backend abstraction for quiz generation and review.
//!
//! The [`Chain`] trait decouples pipeline orchestration from the actual
//! generation backend. The default [`CommandChain`] spawns a user-configured
//! command; tests use scripted chains that return predetermined payloads
//! without spawning processes. This crate never talks to a model service
//! itself — whatever the configured command does is its own business.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::Draft;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::core::quiz::extract_json;
use crate::io::process::run_command_with_timeout;

/// Parameters for one chain invocation.
#[derive(Debug, Clone)]
pub struct ChainRequest {
    /// Working directory for the backend process.
    pub workdir: PathBuf,
    /// Rendered prompt text to feed to the backend.
    pub prompt: String,
    /// Path to the JSON Schema that constrains backend output.
    pub output_schema_path: PathBuf,
    /// Path where the raw backend output is written.
    pub output_path: PathBuf,
    /// Path to write the backend stderr log.
    pub chain_log_path: PathBuf,
    /// Maximum time to wait for the backend to complete.
    pub timeout: Duration,
    /// Truncate captured backend output beyond this many bytes.
    pub output_limit_bytes: usize,
}

/// Abstraction over generation backends.
pub trait Chain {
    /// Run the backend with the given request. Must write raw output to
    /// `request.output_path`.
    fn exec(&self, request: &ChainRequest) -> Result<()>;
}

/// Marker error for backend failures.
///
/// Lets `main` map collaborator failures to a distinct exit code while local
/// input errors (bad config, missing template) stay on the generic path.
#[derive(Debug)]
pub struct ChainFailure(pub String);

impl fmt::Display for ChainFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain failure: {}", self.0)
    }
}

impl std::error::Error for ChainFailure {}

fn chain_failure(message: String) -> anyhow::Error {
    anyhow::Error::new(ChainFailure(message))
}

/// Chain backend that spawns the configured command.
///
/// The prompt goes to the child on stdin; the JSON payload is expected on
/// stdout. The output-schema path is exposed via `MCQGEN_OUTPUT_SCHEMA` so
/// schema-aware backends can constrain their own output.
pub struct CommandChain {
    command: Vec<String>,
}

impl CommandChain {
    pub fn new(command: Vec<String>) -> Result<Self> {
        if command.is_empty() || command[0].trim().is_empty() {
            bail!("chain command must be a non-empty array");
        }
        Ok(Self { command })
    }
}

impl Chain for CommandChain {
    #[instrument(skip_all, fields(timeout_secs = request.timeout.as_secs()))]
    fn exec(&self, request: &ChainRequest) -> Result<()> {
        info!(command = %self.command[0], "starting chain backend");

        if !request.output_schema_path.exists() {
            return Err(anyhow!(
                "missing output schema {}",
                request.output_schema_path.display()
            ));
        }
        if let Some(parent) = request.output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output dir {}", parent.display()))?;
        }

        let mut cmd = Command::new(&self.command[0]);
        cmd.args(&self.command[1..])
            .env("MCQGEN_OUTPUT_SCHEMA", &request.output_schema_path)
            .current_dir(&request.workdir);

        // Spawn failures are collaborator failures too: the request was
        // valid, the configured backend could not run.
        let output = run_command_with_timeout(
            cmd,
            Some(request.prompt.as_bytes()),
            request.timeout,
            request.output_limit_bytes,
        )
        .map_err(|err| chain_failure(format!("backend did not run: {err:#}")))?;

        write_chain_log(&request.chain_log_path, &output.stderr, &output.truncation_notice())?;

        if output.timed_out {
            warn!(timeout_secs = request.timeout.as_secs(), "chain timed out");
            return Err(chain_failure(format!(
                "backend timed out after {:?}",
                request.timeout
            )));
        }
        if !output.status.success() {
            warn!(exit_code = ?output.status.code(), "chain command failed");
            return Err(chain_failure(format!(
                "backend exited with status {:?}",
                output.status.code()
            )));
        }

        fs::write(&request.output_path, &output.stdout)
            .with_context(|| format!("write chain output {}", request.output_path.display()))?;

        debug!("chain backend completed");
        Ok(())
    }
}

fn write_chain_log(path: &Path, stderr: &[u8], notice: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log dir {}", parent.display()))?;
    }
    let mut buf = Vec::with_capacity(stderr.len() + notice.len());
    buf.extend_from_slice(stderr);
    buf.extend_from_slice(notice.as_bytes());
    fs::write(path, buf).with_context(|| format!("write chain log {}", path.display()))
}

/// Run the backend, then read, extract, schema-check, and deserialize its
/// output.
///
/// Malformed or schema-invalid output is a [`ChainFailure`]: the request was
/// valid, the collaborator misbehaved.
pub fn execute_and_load<C: Chain, T: DeserializeOwned>(
    chain: &C,
    request: &ChainRequest,
    schema: &str,
) -> Result<T> {
    chain.exec(request)?;

    let raw = fs::read_to_string(&request.output_path)
        .with_context(|| format!("read chain output {}", request.output_path.display()))?;
    let payload = extract_json(&raw).map_err(|err| chain_failure(err.to_string()))?;
    let instance: Value = serde_json::from_str(&payload)
        .map_err(|err| chain_failure(format!("chain output is not valid JSON: {err}")))?;

    let schema_json: Value = serde_json::from_str(schema).context("parse embedded schema")?;
    validate_schema(&instance, &schema_json)?;

    serde_json::from_value(instance)
        .map_err(|err| chain_failure(format!("chain output does not deserialize: {err}")))
}

/// Validate JSON instance against a JSON Schema (Draft 2020-12).
fn validate_schema(instance: &Value, schema: &Value) -> Result<()> {
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .context("compile json schema")?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        return Err(chain_failure(format!(
            "output failed schema validation:\n- {}",
            messages.join("\n- ")
        )));
    }
    Ok(())
}
