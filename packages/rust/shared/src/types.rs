//! Core domain types: notebook documents, sections, and the book manifests.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Major nbformat version this tool reads and writes.
pub const NBFORMAT_MAJOR: u32 = 4;

/// Minor nbformat version stamped on newly created notebooks.
pub const NBFORMAT_MINOR: u32 = 5;

// ---------------------------------------------------------------------------
// Notebook
// ---------------------------------------------------------------------------

/// An nbformat v4 notebook document.
///
/// Only `cells` is interpreted; everything else is carried through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Ordered cell sequence.
    pub cells: Vec<Cell>,
    /// Notebook-level metadata (kernelspec, language_info, ...).
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Major format version.
    pub nbformat: u32,
    /// Minor format version.
    pub nbformat_minor: u32,
    /// Any other top-level keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Notebook {
    /// A fresh v4 notebook holding `cells`, with empty metadata.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            metadata: Map::new(),
            nbformat: NBFORMAT_MAJOR,
            nbformat_minor: NBFORMAT_MINOR,
            extra: Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single notebook cell.
///
/// `metadata`, `outputs`, `execution_count`, `id`, `attachments` and any other
/// keys live in `extra` and are written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    pub source: CellSource,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cell {
    /// Build a markdown cell with no metadata.
    pub fn markdown(source: impl Into<String>) -> Self {
        Self::with_type(CellType::Markdown, source)
    }

    /// Build a code cell with empty outputs and no execution count.
    pub fn code(source: impl Into<String>) -> Self {
        let mut cell = Self::with_type(CellType::Code, source);
        cell.extra.insert("outputs".into(), Value::Array(Vec::new()));
        cell.extra.insert("execution_count".into(), Value::Null);
        cell
    }

    fn with_type(cell_type: CellType, source: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("metadata".into(), Value::Object(Map::new()));
        Self {
            cell_type,
            source: CellSource::Text(source.into()),
            extra,
        }
    }

    /// The cell's full source text.
    pub fn text(&self) -> Cow<'_, str> {
        self.source.text()
    }
}

/// Cell kind. Unknown kinds are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellType {
    Markdown,
    Code,
    Raw,
    Other(String),
}

impl From<String> for CellType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "markdown" => Self::Markdown,
            "code" => Self::Code,
            "raw" => Self::Raw,
            _ => Self::Other(s),
        }
    }
}

impl From<CellType> for String {
    fn from(t: CellType) -> Self {
        match t {
            CellType::Markdown => "markdown".into(),
            CellType::Code => "code".into(),
            CellType::Raw => "raw".into(),
            CellType::Other(s) => s,
        }
    }
}

/// Cell source as stored on disk: nbformat allows either one string or a
/// list of lines (each keeping its trailing newline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl CellSource {
    /// The joined source text.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Lines(lines) => Cow::Owned(lines.concat()),
        }
    }
}

// ---------------------------------------------------------------------------
// Section / TocEntry
// ---------------------------------------------------------------------------

/// A contiguous run of cells under one top-level heading.
///
/// `title` is `None` only for cells that precede the first heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: Option<String>,
    pub cells: Vec<Cell>,
}

/// A written section: its title paired with the generated notebook filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub title: Option<String>,
    pub file: String,
}

// ---------------------------------------------------------------------------
// _toc.yml
// ---------------------------------------------------------------------------

/// The `_toc.yml` manifest consumed by jupyter-book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookToc {
    /// Always `jb-book`.
    pub format: String,
    /// Filename of the first section's notebook.
    pub root: String,
    /// Every later section, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chapters: Vec<TocChapter>,
}

/// One `- file: <name>` chapter entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocChapter {
    pub file: String,
}

// ---------------------------------------------------------------------------
// _config.yml
// ---------------------------------------------------------------------------

/// The `_config.yml` written next to the split notebooks.
///
/// [`BookConfig::default`] is the fixed payload: search UI, repository,
/// issues and edit buttons off, and no notebook execution at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookConfig {
    pub html: HtmlConfig,
    pub execute: ExecuteConfig,
}

/// `html:` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlConfig {
    pub search: SearchConfig,
    pub use_repository_button: bool,
    pub use_issues_button: bool,
    pub use_edit_page_button: bool,
}

/// `html.search:` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub enabled: bool,
}

/// `execute:` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteConfig {
    /// jupyter-book execution mode (`off`, `auto`, `force`, `cache`).
    pub execute_notebooks: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            html: HtmlConfig {
                search: SearchConfig { enabled: false },
                use_repository_button: false,
                use_issues_button: false,
                use_edit_page_button: false,
            },
            execute: ExecuteConfig {
                execute_notebooks: "off".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_keeps_unknown_fields() {
        let json = r#"{
            "cell_type": "code",
            "execution_count": 3,
            "id": "abc",
            "metadata": {"tags": ["hide"]},
            "outputs": [{"output_type": "stream", "name": "stdout", "text": ["1\n"]}],
            "source": ["print(1)\n", "print(2)"]
        }"#;
        let cell: Cell = serde_json::from_str(json).expect("parse cell");
        assert_eq!(cell.cell_type, CellType::Code);
        assert_eq!(cell.text(), "print(1)\nprint(2)");
        assert_eq!(cell.extra["execution_count"], 3);

        let back = serde_json::to_value(&cell).expect("serialize");
        let orig: Value = serde_json::from_str(json).expect("parse value");
        assert_eq!(back, orig);
    }

    #[test]
    fn unknown_cell_type_is_preserved() {
        let cell: Cell =
            serde_json::from_str(r#"{"cell_type": "heading", "source": "x", "metadata": {}}"#)
                .expect("parse");
        assert_eq!(cell.cell_type, CellType::Other("heading".into()));
        let back = serde_json::to_value(&cell).expect("serialize");
        assert_eq!(back["cell_type"], "heading");
    }

    #[test]
    fn notebook_requires_cells() {
        let err = serde_json::from_str::<Notebook>(r#"{"nbformat": 4, "nbformat_minor": 5}"#);
        assert!(err.is_err());
    }

    #[test]
    fn new_notebook_is_v4() {
        let nb = Notebook::new(vec![Cell::markdown("# Intro")]);
        assert_eq!(nb.nbformat, 4);
        assert_eq!(nb.nbformat_minor, 5);
        assert!(nb.metadata.is_empty());
        assert_eq!(nb.cells.len(), 1);
    }

    #[test]
    fn book_config_default_is_locked_down() {
        let config = BookConfig::default();
        assert!(!config.html.search.enabled);
        assert!(!config.html.use_repository_button);
        assert!(!config.html.use_issues_button);
        assert!(!config.html.use_edit_page_button);
        assert_eq!(config.execute.execute_notebooks, "off");
    }
}
