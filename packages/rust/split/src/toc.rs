//! `_toc.yml` builder.
//!
//! The first section's notebook is the book root; every later section
//! becomes a chapter, in section order.

use std::path::Path;

use tracing::{debug, instrument};

use bookprep_shared::{BookToc, BookprepError, Result, TocChapter, TocEntry};

/// jupyter-book TOC format identifier.
pub const TOC_FORMAT: &str = "jb-book";

/// Build the book TOC from written sections.
///
/// `source` is the notebook the entries came from, used to report an empty
/// split.
#[instrument(skip_all, fields(entries = entries.len()))]
pub fn build_toc(source: &Path, entries: &[TocEntry]) -> Result<BookToc> {
    let Some((root, rest)) = entries.split_first() else {
        return Err(BookprepError::NoSections {
            path: source.to_path_buf(),
        });
    };

    let chapters = rest
        .iter()
        .map(|entry| TocChapter {
            file: entry.file.clone(),
        })
        .collect::<Vec<_>>();

    debug!(root = %root.file, chapters = chapters.len(), "TOC built");

    Ok(BookToc {
        format: TOC_FORMAT.to_string(),
        root: root.file.clone(),
        chapters,
    })
}

/// Serialize a TOC as YAML.
pub fn render_toc(toc: &BookToc) -> Result<String> {
    serde_yaml::to_string(toc).map_err(|e| BookprepError::serialize(format!("_toc.yml: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, file: &str) -> TocEntry {
        TocEntry {
            title: Some(title.into()),
            file: file.into(),
        }
    }

    #[test]
    fn first_entry_is_root() {
        let entries = vec![
            entry("Intro", "01_intro.ipynb"),
            entry("Methods", "02_methods.ipynb"),
            entry("Results", "03_results.ipynb"),
        ];
        let toc = build_toc(Path::new("book.ipynb"), &entries).expect("toc");

        assert_eq!(toc.format, "jb-book");
        assert_eq!(toc.root, "01_intro.ipynb");
        let files: Vec<&str> = toc.chapters.iter().map(|c| c.file.as_str()).collect();
        assert_eq!(files, ["02_methods.ipynb", "03_results.ipynb"]);
    }

    #[test]
    fn single_section_has_no_chapters() {
        let toc = build_toc(Path::new("book.ipynb"), &[entry("Only", "01_only.ipynb")])
            .expect("toc");
        assert!(toc.chapters.is_empty());

        let yaml = render_toc(&toc).expect("render");
        assert!(!yaml.contains("chapters"));
    }

    #[test]
    fn no_entries_is_an_error() {
        let err = build_toc(Path::new("empty.ipynb"), &[]).unwrap_err();
        assert!(matches!(err, BookprepError::NoSections { .. }));
        assert!(err.to_string().contains("empty.ipynb"));
    }

    #[test]
    fn rendered_yaml_reads_back() {
        let entries = vec![
            entry("Intro", "01_intro.ipynb"),
            entry("Methods", "02_methods.ipynb"),
        ];
        let toc = build_toc(Path::new("book.ipynb"), &entries).expect("toc");
        let yaml = render_toc(&toc).expect("render");

        assert!(yaml.starts_with("format: jb-book\n"));
        let parsed: BookToc = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(parsed, toc);

        let raw: serde_yaml::Value = serde_yaml::from_str(&yaml).expect("parse value");
        assert_eq!(raw["chapters"][0]["file"].as_str(), Some("02_methods.ipynb"));
    }
}
