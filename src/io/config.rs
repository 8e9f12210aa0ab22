//! Pipeline configuration stored in `config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Pipeline configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to sensible values, so the empty file
/// left by a fresh scaffold behaves like no file at all.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Wall-clock budget in seconds for each chain stage.
    pub timeout_secs: u64,

    /// Truncate chain stdout/stderr beyond this many bytes.
    pub output_limit_bytes: usize,

    pub chain: ChainConfig,

    pub defaults: GenerationDefaults,
}

/// External chain backend invocation.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChainConfig {
    /// Command to spawn for each stage (e.g. `["mcq-chain"]`). The prompt is
    /// fed on stdin; the JSON payload is expected on stdout.
    pub command: Vec<String>,
}

/// Generation parameters used when the CLI does not override them.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationDefaults {
    pub number: u32,
    pub subject: String,
    pub tone: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            command: vec!["mcq-chain".to_string()],
        }
    }
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            number: 5,
            subject: "general knowledge".to_string(),
            tone: "simple".to_string(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5 * 60,
            output_limit_bytes: 100_000,
            chain: ChainConfig::default(),
            defaults: GenerationDefaults::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be > 0"));
        }
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        if self.chain.command.is_empty() || self.chain.command[0].trim().is_empty() {
            return Err(anyhow!("chain.command must be a non-empty array"));
        }
        if self.defaults.number == 0 || self.defaults.number > 50 {
            return Err(anyhow!("defaults.number must be between 1 and 50"));
        }
        if self.defaults.tone.trim().is_empty() {
            return Err(anyhow!("defaults.tone must be non-empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `PipelineConfig::default()`.
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    if !path.exists() {
        let cfg = PipelineConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PipelineConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
