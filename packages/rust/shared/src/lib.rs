//! Shared types, error model, and configuration for bookprep.
//!
//! This crate is the foundation depended on by all other bookprep crates.
//! It provides:
//! - [`BookprepError`], the unified error type
//! - Domain types ([`Notebook`], [`Cell`], [`Section`], [`TocEntry`], [`BookToc`], [`BookConfig`])
//! - Configuration ([`AppConfig`], [`StripConfig`], [`SplitConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, InputRule, SplitConfig, SplitSection, StripConfig, StripSection, config_dir,
    config_file_path, init_config, init_config_at, load_config, load_config_from,
};
pub use error::{BookprepError, Result};
pub use types::{
    BookConfig, BookToc, Cell, CellSource, CellType, ExecuteConfig, HtmlConfig, NBFORMAT_MAJOR,
    NBFORMAT_MINOR, Notebook, SearchConfig, Section, TocChapter, TocEntry,
};
