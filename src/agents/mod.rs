//! Stage wrappers around the chain backend.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub mod generator;
pub mod reviewer;

pub(crate) fn write_output_schema(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create schema dir {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write schema {}", path.display()))
}
