//! Book directory assembler.
//!
//! Takes partitioned sections and writes the jupyter-book source directory.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use bookprep_shared::{BookConfig, BookToc, BookprepError, Notebook, Result, Section, TocEntry};

use crate::notebook::write_notebook;
use crate::sections::section_filename;
use crate::toc::{build_toc, render_toc};

/// TOC file name expected by jupyter-book.
pub const TOC_FILE: &str = "_toc.yml";

/// Book config file name expected by jupyter-book.
pub const CONFIG_FILE: &str = "_config.yml";

/// Output from a successful book assembly.
#[derive(Debug, Clone)]
pub struct AssembleResult {
    /// Directory the book was written to.
    pub output_dir: PathBuf,
    /// One entry per written notebook, in section order.
    pub entries: Vec<TocEntry>,
    /// The TOC that was written.
    pub toc: BookToc,
}

/// Write one notebook per section, then `_toc.yml` and `_config.yml`.
///
/// Creates the following layout:
/// ```text
/// <output_dir>/
/// ├── 01_<slug>.ipynb
/// ├── 02_<slug>.ipynb
/// ├── ...
/// ├── _toc.yml
/// └── _config.yml
/// ```
///
/// `source` names the notebook the sections came from, for error reporting.
#[instrument(skip_all, fields(output_dir = %output_dir.display(), sections = sections.len()))]
pub fn assemble(output_dir: &Path, source: &Path, sections: Vec<Section>) -> Result<AssembleResult> {
    if sections.is_empty() {
        return Err(BookprepError::NoSections {
            path: source.to_path_buf(),
        });
    }

    std::fs::create_dir_all(output_dir).map_err(|e| BookprepError::io(output_dir, e))?;

    let mut entries = Vec::with_capacity(sections.len());
    for (i, section) in sections.into_iter().enumerate() {
        let file = section_filename(i + 1, section.title.as_deref());
        let path = output_dir.join(&file);
        let cell_count = section.cells.len();

        write_notebook(&path, &Notebook::new(section.cells))?;
        debug!(file = %file, cells = cell_count, "wrote section notebook");

        entries.push(TocEntry {
            title: section.title,
            file,
        });
    }

    let toc = build_toc(source, &entries)?;
    write_atomic(&output_dir.join(TOC_FILE), &render_toc(&toc)?)?;
    write_book_config(output_dir)?;

    info!(
        notebooks = entries.len(),
        root = %toc.root,
        "book assembly complete"
    );

    Ok(AssembleResult {
        output_dir: output_dir.to_path_buf(),
        entries,
        toc,
    })
}

/// Write the fixed `_config.yml` into `output_dir`.
pub fn write_book_config(output_dir: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(&BookConfig::default())
        .map_err(|e| BookprepError::serialize(format!("{CONFIG_FILE}: {e}")))?;
    write_atomic(&output_dir.join(CONFIG_FILE), &yaml)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write `content` to a sibling temp file, then rename it over `path`.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = path.with_file_name(format!(".{file_name}.tmp"));

    std::fs::write(&temp, content).map_err(|e| BookprepError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| BookprepError::io(path, e))?;

    debug!(path = %path.display(), size = content.len(), "wrote file");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
