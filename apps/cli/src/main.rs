//! bookprep CLI: publishing helpers for notebook-based books.
//!
//! Splits a single notebook into jupyter-book chapters and strips the search
//! UI out of the built HTML.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
