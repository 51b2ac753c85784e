//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use bookprep_shared::{
    AppConfig, InputRule, SplitConfig, StripConfig, init_config, init_config_at, load_config,
    load_config_from,
};
use bookprep_strip::StripProgress;
use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// bookprep: prepare a notebook-based book for jupyter-book.
#[derive(Parser)]
#[command(
    name = "bookprep",
    version,
    about = "Split a notebook into jupyter-book chapters and strip search UI from the built HTML.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.bookprep/bookprep.toml).
    #[arg(long, global = true, env = "BOOKPREP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Remove search forms, containers and inputs from every built HTML page.
    StripSearch {
        /// Built HTML directory (defaults to book/_build/html).
        #[arg(long)]
        build_dir: Option<PathBuf>,

        /// Extent of the search <input> pass: tag or to-end.
        #[arg(long)]
        input_rule: Option<InputRule>,
    },

    /// Split a notebook into chapter notebooks plus _toc.yml and _config.yml.
    Split {
        /// Source notebook (defaults to data_101_book.ipynb).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory (defaults to book).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "bookprep=warn",
        1 => "bookprep=info",
        2 => "bookprep=debug",
        _ => "bookprep=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::StripSearch {
            build_dir,
            input_rule,
        } => {
            let config = strip_config(&resolve_config(config_path)?, build_dir, input_rule);
            cmd_strip_search(&config)
        }
        Command::Split { input, out } => {
            let config = split_config(&resolve_config(config_path)?, input, out);
            cmd_split(&config)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(config_path),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load the config file named on the command line, or the default one.
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Merge CLI flags over the file/default stripper settings.
fn strip_config(
    app: &AppConfig,
    build_dir: Option<PathBuf>,
    input_rule: Option<InputRule>,
) -> StripConfig {
    let mut config = StripConfig::from(app);
    if let Some(dir) = build_dir {
        config.build_dir = dir;
    }
    if let Some(rule) = input_rule {
        config.input_rule = rule;
    }
    config
}

/// Merge CLI flags over the file/default splitter settings.
fn split_config(app: &AppConfig, input: Option<PathBuf>, out: Option<PathBuf>) -> SplitConfig {
    let mut config = SplitConfig::from(app);
    if let Some(input) = input {
        config.input_notebook = input;
    }
    if let Some(out) = out {
        config.output_dir = out;
    }
    config
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_strip_search(config: &StripConfig) -> Result<()> {
    info!(
        build_dir = %config.build_dir.display(),
        input_rule = %config.input_rule,
        "stripping search UI"
    );

    let reporter = CliProgress::new();
    let report = bookprep_strip::run(config, &reporter);
    reporter.spinner.finish_and_clear();
    let report = report?;

    println!("All search bars removed from built HTML.");
    info!(
        scanned = report.scanned,
        modified = report.modified.len(),
        "strip-search finished"
    );

    Ok(())
}

fn cmd_split(config: &SplitConfig) -> Result<()> {
    info!(
        input = %config.input_notebook.display(),
        out = %config.output_dir.display(),
        "splitting notebook"
    );

    let result = bookprep_split::split_notebook(config)?;

    let out = result.output_dir.display().to_string();
    println!("Notebook split complete. Now run:");
    println!();
    println!("jupyter-book build {}/", out.trim_end_matches('/'));
    info!(
        notebooks = result.entries.len(),
        cells = result.cell_count,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "split finished"
    );

    Ok(())
}

fn cmd_config_init(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => {
            init_config_at(p)?;
            p.to_path_buf()
        }
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl StripProgress for CliProgress {
    fn file_scanned(&self, path: &Path, current: usize) {
        self.spinner
            .set_message(format!("Scanning [{current}] {}", path.display()));
    }

    fn file_stripped(&self, path: &Path) {
        // `println` on a hidden bar is dropped, so suspend instead.
        self.spinner
            .suspend(|| println!("Stripped search from: {}", path.display()));
    }
}
