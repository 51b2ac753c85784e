//! Notebook splitting for jupyter-book.
//!
//! Splits one notebook into per-chapter notebooks at every top-level
//! (`# `) markdown heading, then writes the `_toc.yml` and `_config.yml`
//! that jupyter-book needs to build them as a book.

pub mod assembler;
pub mod notebook;
pub mod pipeline;
pub mod sections;
pub mod toc;

pub use notebook::{read_notebook, write_notebook};
pub use pipeline::{SplitResult, split_notebook};
pub use sections::{heading_title, partition, section_filename, slugify};
pub use toc::build_toc;
