//! Idempotent workspace scaffolding.
//!
//! A [`ScaffoldPlan`] is a static, ordered list of relative paths. Running
//! [`scaffold`] converges the target tree to "every planned path exists":
//! missing parent directories are created recursively, and each file is
//! created empty only when it is absent or zero-sized. Non-empty files are
//! never truncated or overwritten, so re-running is always safe.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Ordered list of relative paths the scaffolder guarantees exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub files: Vec<PathBuf>,
}

impl ScaffoldPlan {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }
}

/// Skeleton for a fresh quiz-generation workspace.
pub fn default_plan() -> ScaffoldPlan {
    ScaffoldPlan::new(
        [
            "Response.json",
            "config.toml",
            "data/document.txt",
            "output/quiz.json",
            "output/review.md",
            "research/experiments.md",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect(),
    )
}

/// Materialize every path in `plan` under `root`.
///
/// Processes paths strictly in order. OS errors propagate with context naming
/// the failing operation ("create directory ..." vs "create file ..."); no
/// retries, no partial-success report.
pub fn scaffold(root: &Path, plan: &ScaffoldPlan) -> Result<()> {
    for rel in &plan.files {
        if !rel.is_relative() {
            bail!("scaffold path must be relative (got {})", rel.display());
        }
        let target = root.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        if needs_create(&target)? {
            fs::File::create(&target)
                .with_context(|| format!("create file {}", target.display()))?;
            debug!(path = %target.display(), "created empty file");
        }
    }
    Ok(())
}

/// A file needs (re)creation when it is missing or has size zero.
fn needs_create(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len() == 0),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(true),
        Err(err) => Err(err).with_context(|| format!("stat {}", path.display())),
    }
}
