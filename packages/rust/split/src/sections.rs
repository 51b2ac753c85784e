//! Section partitioning and output file naming.

use std::sync::LazyLock;

use regex::Regex;

use bookprep_shared::{Cell, CellType, Section};

/// Slug used for cells that precede the first heading.
const UNTITLED_SLUG: &str = "untitled";

/// Title of a top-level heading cell, or `None` for any other cell.
///
/// A heading cell is a markdown cell whose trimmed source starts with `"# "`.
/// The title is its first line without the leading `#` marker.
pub fn heading_title(cell: &Cell) -> Option<String> {
    if cell.cell_type != CellType::Markdown {
        return None;
    }

    let text = cell.text();
    let trimmed = text.trim();
    if !trimmed.starts_with("# ") {
        return None;
    }

    let first_line = trimmed.lines().next().unwrap_or(trimmed);
    Some(first_line.trim_start_matches('#').trim().to_string())
}

/// Group cells into sections, starting a new one at every heading cell.
///
/// Cells before the first heading form an untitled leading section. The split
/// is lossless: concatenating every section's cells yields `cells` again.
pub fn partition(cells: Vec<Cell>) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for cell in cells {
        if let Some(title) = heading_title(&cell) {
            sections.extend(current.take());
            current = Some(Section {
                title: Some(title),
                cells: vec![cell],
            });
        } else {
            current
                .get_or_insert_with(|| Section {
                    title: None,
                    cells: Vec::new(),
                })
                .cells
                .push(cell);
        }
    }

    sections.extend(current);
    sections
}

/// Filesystem-safe slug: lowercase, runs of non-`[a-z0-9]` become `_`,
/// no leading or trailing `_`.
pub fn slugify(title: &str) -> String {
    static NON_SLUG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

    let lower = title.to_lowercase();
    NON_SLUG_RE
        .replace_all(&lower, "_")
        .trim_matches('_')
        .to_string()
}

/// Output notebook name for the 1-based `index`th section, e.g. `01_intro.ipynb`.
pub fn section_filename(index: usize, title: Option<&str>) -> String {
    let slug = title.map_or_else(|| UNTITLED_SLUG.to_string(), slugify);
    format!("{index:02}_{slug}.ipynb")
}
