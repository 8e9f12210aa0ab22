//! Response-template loading.
//!
//! The template is a JSON mapping describing the shape the chain backend must
//! format its quiz output in. It is read once, held in memory, and passed
//! through to the generation prompt unmodified. Beyond "top level is a
//! mapping" (the data model itself) no schema validation happens here; the
//! template's semantics belong to the chain backend.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Parsed response template. Opaque to this crate.
pub type ResponseTemplate = serde_json::Map<String, Value>;

/// Load the template from `path`.
///
/// Fails with path context when the file is missing, unreadable, malformed
/// JSON (including the empty file a fresh scaffold leaves behind), or not a
/// JSON object at the top level.
pub fn load_template(path: &Path) -> Result<ResponseTemplate> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read template {}", path.display()))?;
    let template: ResponseTemplate = serde_json::from_str(&contents)
        .with_context(|| format!("parse template {} as a JSON mapping", path.display()))?;
    Ok(template)
}
