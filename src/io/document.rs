//! Source-document reading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

/// Read an input document to plain text.
///
/// Supports UTF-8 text formats (`.txt`, `.md`). Other extensions are
/// rejected; document *content* is not inspected or validated.
pub fn read_document(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    match extension {
        "txt" | "md" => {
            fs::read_to_string(path).with_context(|| format!("read document {}", path.display()))
        }
        _ => Err(anyhow!(
            "unsupported document format for {} (expected .txt or .md)",
            path.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_txt_contents() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("notes.txt");
        fs::write(&path, "photosynthesis converts light to energy").expect("write");

        let text = read_document(&path).expect("read");
        assert_eq!(text, "photosynthesis converts light to energy");
    }

    #[test]
    fn reads_markdown_contents() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("notes.md");
        fs::write(&path, "# Biology\n\nCells divide.\n").expect("write");

        let text = read_document(&path).expect("read");
        assert!(text.contains("Cells divide."));
    }

    #[test]
    fn rejects_unsupported_extension() {
        let err = read_document(Path::new("slides.pdf")).unwrap_err();
        assert!(err.to_string().contains("unsupported document format"));
    }

    #[test]
    fn rejects_missing_extension() {
        let err = read_document(Path::new("document")).unwrap_err();
        assert!(err.to_string().contains("unsupported document format"));
    }

    #[test]
    fn missing_file_reports_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = read_document(&temp.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().contains("read document"));
    }
}
