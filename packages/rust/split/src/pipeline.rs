//! End-to-end split pipeline: notebook → sections → chapter notebooks + TOC + config.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use bookprep_shared::{BookToc, Result, SplitConfig, TocEntry};

use crate::assembler;
use crate::notebook::read_notebook;
use crate::sections::partition;

/// Result of the split pipeline.
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// Directory holding the written book sources.
    pub output_dir: PathBuf,
    /// Written notebooks, in section order.
    pub entries: Vec<TocEntry>,
    /// The `_toc.yml` contents.
    pub toc: BookToc,
    /// Number of cells in the source notebook.
    pub cell_count: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Split the configured notebook into a jupyter-book source directory.
///
/// Fails before writing anything if the notebook is invalid or has no cells.
#[instrument(skip_all, fields(
    input = %config.input_notebook.display(),
    output_dir = %config.output_dir.display(),
))]
pub fn split_notebook(config: &SplitConfig) -> Result<SplitResult> {
    let start = Instant::now();

    let notebook = read_notebook(&config.input_notebook)?;
    let cell_count = notebook.cells.len();

    let sections = partition(notebook.cells);
    info!(cells = cell_count, sections = sections.len(), "notebook partitioned");

    let assembled = assembler::assemble(&config.output_dir, &config.input_notebook, sections)?;

    let elapsed = start.elapsed();
    info!(
        notebooks = assembled.entries.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "notebook split complete"
    );

    Ok(SplitResult {
        output_dir: assembled.output_dir,
        entries: assembled.entries,
        toc: assembled.toc,
        cell_count,
        elapsed,
    })
}
