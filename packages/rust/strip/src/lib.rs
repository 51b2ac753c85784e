//! Search-UI removal for built HTML books.
//!
//! Walks a built HTML tree and strips the search form, the `bd-search`
//! container, and search `<input>` tags from every `.html` file using plain
//! regex substitution (see [`strip_search`]). Files are rewritten in place,
//! and only when something was removed.

mod passes;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use bookprep_shared::{BookprepError, InputRule, Result, StripConfig};

/// File suffix selected for stripping.
const HTML_SUFFIX: &str = ".html";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Outcome of stripping a whole tree.
#[derive(Debug, Clone)]
pub struct StripReport {
    /// Number of `.html` files examined.
    pub scanned: usize,
    /// Files that were rewritten, in traversal order.
    pub modified: Vec<PathBuf>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting stripping status.
pub trait StripProgress {
    /// Called before each `.html` file is processed.
    fn file_scanned(&self, path: &Path, current: usize);
    /// Called after a file was rewritten.
    fn file_stripped(&self, path: &Path);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl StripProgress for SilentProgress {
    fn file_scanned(&self, _path: &Path, _current: usize) {}
    fn file_stripped(&self, _path: &Path) {}
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Remove search UI fragments from one HTML document.
///
/// Applies, in order: the search `<form>` pass, the `bd-search` `<div>` pass,
/// and the search `<input>` pass whose extent is chosen by `rule`.
pub fn strip_search(html: &str, rule: InputRule) -> String {
    passes::run_pipeline(html, rule)
}

/// Strip one file in place. Returns `true` if the file was rewritten.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn strip_file(path: &Path, rule: InputRule) -> Result<bool> {
    let html = std::fs::read_to_string(path).map_err(|e| BookprepError::io(path, e))?;
    let stripped = strip_search(&html, rule);

    if stripped == html {
        debug!("no search markup found");
        return Ok(false);
    }

    std::fs::write(path, &stripped).map_err(|e| BookprepError::io(path, e))?;
    info!(
        removed_bytes = html.len().saturating_sub(stripped.len()),
        "stripped search from file"
    );
    Ok(true)
}

/// Strip every `.html` file under `root`, one at a time.
///
/// Stops at the first traversal, read, or write error.
#[instrument(skip_all, fields(root = %root.display(), %rule))]
pub fn strip_tree(
    root: &Path,
    rule: InputRule,
    reporter: &dyn StripProgress,
) -> Result<StripReport> {
    let start = Instant::now();
    let mut scanned = 0;
    let mut modified = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
            BookprepError::io(path, e.into())
        })?;

        if entry.file_type().is_dir() || !is_html(entry.path()) {
            continue;
        }

        scanned += 1;
        reporter.file_scanned(entry.path(), scanned);

        if strip_file(entry.path(), rule)? {
            reporter.file_stripped(entry.path());
            modified.push(entry.into_path());
        }
    }

    let elapsed = start.elapsed();
    info!(
        scanned,
        modified = modified.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "search stripping complete"
    );

    Ok(StripReport {
        scanned,
        modified,
        elapsed,
    })
}

/// Run [`strip_tree`] with a merged runtime configuration.
pub fn run(config: &StripConfig, reporter: &dyn StripProgress) -> Result<StripReport> {
    strip_tree(&config.build_dir, config.input_rule, reporter)
}

fn is_html(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(HTML_SUFFIX))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
