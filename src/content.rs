/*!
 * Per-file content extraction
 *
 * Decides how each file enters the digest: decoded and redacted text,
 * notebook code cells, an opaque binary marker, or a read-error marker.
 * Nothing here aborts the run; every failure degrades to a marker.
 */

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::redact::SecretRedactor;

/// Number of leading bytes probed by the binary check
const BINARY_PROBE_LEN: u64 = 1024;

/// Extension identifying a structured notebook document
const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Outcome of extracting one file's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Decoded text, already redacted and trimmed
    Text(String),
    /// Code cells extracted from a notebook, or an inline placeholder
    Notebook(String),
    /// Classified binary; bytes stay out of the digest
    Binary,
    /// The file could not be opened as text
    Unreadable,
}

/// Check whether a path names a structured notebook document
pub fn is_notebook(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.to_string_lossy().to_lowercase() == NOTEBOOK_EXTENSION)
}

/// Check whether a file should be treated as binary
///
/// Probes the first 1024 bytes for a null byte. Files that cannot be opened
/// or read classify as binary; the error never propagates.
pub fn is_binary(path: &Path) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return true,
    };
    let mut probe = Vec::with_capacity(BINARY_PROBE_LEN as usize);
    match file.take(BINARY_PROBE_LEN).read_to_end(&mut probe) {
        Ok(_) => probe.contains(&0),
        Err(_) => true,
    }
}

/// Extract one file's content for inclusion in the digest
///
/// Notebook handling wins over the binary check, so notebooks containing
/// binary output blobs still yield their code cells.
pub fn extract(path: &Path, redactor: &SecretRedactor) -> FileContent {
    if is_notebook(path) {
        return FileContent::Notebook(extract_notebook(path, redactor));
    }
    if is_binary(path) {
        return FileContent::Binary;
    }
    match fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            FileContent::Text(redactor.redact(text.trim_end()))
        }
        Err(_) => FileContent::Unreadable,
    }
}

#[derive(Debug, Deserialize)]
struct Notebook {
    #[serde(default)]
    cells: Vec<NotebookCell>,
}

#[derive(Debug, Deserialize)]
struct NotebookCell {
    cell_type: String,
    #[serde(default)]
    source: CellSource,
}

/// Cell source is stored either as one string or as a list of line fragments
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for CellSource {
    fn default() -> Self {
        CellSource::Text(String::new())
    }
}

impl CellSource {
    fn text(&self) -> String {
        match self {
            CellSource::Text(text) => text.clone(),
            CellSource::Lines(lines) => lines.concat(),
        }
    }
}

/// Pull redacted code-cell content out of a notebook document
///
/// Cells are joined in original order with a blank-line separator. Parse
/// failures surface as an inline placeholder naming the failure.
fn extract_notebook(path: &Path, redactor: &SecretRedactor) -> String {
    match read_code_cells(path, redactor) {
        Ok(blocks) if blocks.is_empty() => "[No code cells]".to_string(),
        Ok(blocks) => blocks.join("\n\n"),
        Err(err) => format!("[Error reading notebook: {err}]"),
    }
}

fn read_code_cells(path: &Path, redactor: &SecretRedactor) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)?;
    let notebook: Notebook = serde_json::from_str(&raw)?;
    Ok(notebook
        .cells
        .iter()
        .filter(|cell| cell.cell_type == "code")
        .map(|cell| cell.source.text())
        .filter(|source| !source.trim().is_empty())
        .map(|source| redactor.redact(source.trim_end()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_byte_in_prefix_classifies_binary() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("data.py");
        fs::write(&path, b"looks like source\0but is not")?;
        assert!(is_binary(&path));
        Ok(())
    }

    #[test]
    fn test_null_byte_past_probe_window_is_text() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("long.txt");
        let mut bytes = vec![b'a'; 2000];
        bytes.push(0);
        fs::write(&path, &bytes)?;
        assert!(!is_binary(&path));
        Ok(())
    }

    #[test]
    fn test_missing_file_classifies_binary() {
        assert!(is_binary(Path::new("/nonexistent/definitely/missing.bin")));
    }

    #[test]
    fn test_extract_redacts_and_trims_text() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("settings.py");
        fs::write(&path, "password = \"hunter2\"\n\n\n")?;
        let redactor = SecretRedactor::new();
        assert_eq!(
            extract(&path, &redactor),
            FileContent::Text("password = [REDACTED]".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_notebook_code_cells_extracted_in_order() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("analysis.ipynb");
        fs::write(
            &path,
            r##"{
  "cells": [
    {"cell_type": "code", "source": ["import os\n", "print(os.getcwd())"]},
    {"cell_type": "markdown", "source": "# Notes"},
    {"cell_type": "code", "source": "   "},
    {"cell_type": "code", "source": "print(2)\n"}
  ]
}"##,
        )?;
        let redactor = SecretRedactor::new();
        assert_eq!(
            extract(&path, &redactor),
            FileContent::Notebook("import os\nprint(os.getcwd())\n\nprint(2)".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_notebook_without_code_cells() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("prose.ipynb");
        fs::write(&path, r#"{"cells": [{"cell_type": "markdown", "source": "hi"}]}"#)?;
        let redactor = SecretRedactor::new();
        assert_eq!(
            extract(&path, &redactor),
            FileContent::Notebook("[No code cells]".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_malformed_notebook_yields_placeholder() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.ipynb");
        fs::write(&path, "not json at all")?;
        let redactor = SecretRedactor::new();
        match extract(&path, &redactor) {
            FileContent::Notebook(text) => {
                assert!(text.starts_with("[Error reading notebook:"), "got {text}")
            }
            other => panic!("expected notebook placeholder, got {other:?}"),
        }
        Ok(())
    }
}
