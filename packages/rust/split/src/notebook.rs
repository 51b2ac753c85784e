//! nbformat v4 reading and writing.
//!
//! Output mirrors what nbformat itself writes: one-space indentation, sorted
//! keys, non-ASCII left as-is, trailing newline.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, instrument};

use bookprep_shared::{BookprepError, NBFORMAT_MAJOR, Notebook, Result};

/// Read and validate an nbformat v4 notebook.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_notebook(path: &Path) -> Result<Notebook> {
    let content = std::fs::read_to_string(path).map_err(|e| BookprepError::io(path, e))?;
    let notebook = parse_notebook(&content).map_err(|msg| BookprepError::notebook(path, msg))?;
    debug!(cells = notebook.cells.len(), "notebook loaded");
    Ok(notebook)
}

/// Write a notebook to `path`.
pub fn write_notebook(path: &Path, notebook: &Notebook) -> Result<()> {
    let json = render_notebook(notebook)?;
    crate::assembler::write_atomic(path, &json)
}

fn parse_notebook(content: &str) -> std::result::Result<Notebook, String> {
    let notebook: Notebook = serde_json::from_str(content).map_err(|e| e.to_string())?;

    if notebook.nbformat != NBFORMAT_MAJOR {
        return Err(format!(
            "unsupported nbformat {} (expected {NBFORMAT_MAJOR})",
            notebook.nbformat
        ));
    }

    Ok(notebook)
}

pub(crate) fn render_notebook(notebook: &Notebook) -> Result<String> {
    // Going through `Value` sorts every object's keys.
    let value = serde_json::to_value(notebook)
        .map_err(|e| BookprepError::serialize(format!("notebook JSON: {e}")))?;

    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    value
        .serialize(&mut ser)
        .map_err(|e| BookprepError::serialize(format!("notebook JSON: {e}")))?;

    let mut json = String::from_utf8(buf)
        .map_err(|e| BookprepError::serialize(format!("notebook JSON: {e}")))?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use bookprep_shared::Cell;

    use super::*;

    const SAMPLE: &str = r##"{
 "cells": [
  {"cell_type": "markdown", "metadata": {}, "source": ["# Intro\n", "naïve café"]},
  {"cell_type": "code", "execution_count": 1, "metadata": {}, "outputs": [], "source": "print(1)"}
 ],
 "metadata": {"kernelspec": {"name": "python3", "display_name": "Python 3", "language": "python"}},
 "nbformat": 4,
 "nbformat_minor": 5
}"##;

    #[test]
    fn reads_valid_notebook() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("book.ipynb");
        std::fs::write(&path, SAMPLE).expect("write");

        let nb = read_notebook(&path).expect("read");
        assert_eq!(nb.cells.len(), 2);
        assert_eq!(nb.cells[0].text(), "# Intro\nnaïve café");
        assert!(nb.metadata.contains_key("kernelspec"));
    }

    #[test]
    fn rejects_non_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.ipynb");
        std::fs::write(&path, "not a notebook").expect("write");

        let err = read_notebook(&path).unwrap_err();
        assert!(matches!(err, BookprepError::Notebook { .. }));
    }

    #[test]
    fn rejects_old_nbformat() {
        let err = parse_notebook(r#"{"cells": [], "metadata": {}, "nbformat": 3, "nbformat_minor": 0}"#)
            .unwrap_err();
        assert!(err.contains("unsupported nbformat 3"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_notebook(&dir.path().join("absent.ipynb")).unwrap_err();
        assert!(matches!(err, BookprepError::Io { .. }));
    }

    #[test]
    fn render_uses_one_space_indent_and_sorted_keys() {
        let nb = Notebook::new(vec![Cell::markdown("# Café")]);
        let json = render_notebook(&nb).expect("render");

        assert!(json.starts_with("{\n \"cells\": [\n  {\n   \"cell_type\": \"markdown\""));
        assert!(json.contains("Café"));
        assert!(json.ends_with("}\n"));

        let cells = json.find("\"cells\"").expect("cells key");
        let metadata = json.rfind("\"metadata\": {}").expect("metadata key");
        let nbformat = json.find("\"nbformat\": 4").expect("nbformat key");
        assert!(cells < metadata && metadata < nbformat);
    }

    #[test]
    fn write_then_read_preserves_cells() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("source.ipynb");
        std::fs::write(&source, SAMPLE).expect("write");
        let original = read_notebook(&source).expect("read");

        let copy = dir.path().join("copy.ipynb");
        write_notebook(&copy, &original).expect("write notebook");
        let reread = read_notebook(&copy).expect("reread");
        assert_eq!(reread, original);
    }
}
