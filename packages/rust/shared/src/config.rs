//! Application configuration for bookprep.
//!
//! User config lives at `~/.bookprep/bookprep.toml`.
//! CLI flags override config file values, which override defaults.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BookprepError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "bookprep.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".bookprep";

// ---------------------------------------------------------------------------
// Config structs (matching bookprep.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Search stripper settings.
    #[serde(default)]
    pub strip: StripSection,

    /// Notebook splitter settings.
    #[serde(default)]
    pub split: SplitSection,
}

/// `[strip]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripSection {
    /// Root of the built HTML tree to clean.
    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    /// How far the `<input ...search...>` pass removes.
    #[serde(default)]
    pub input_rule: InputRule,
}

impl Default for StripSection {
    fn default() -> Self {
        Self {
            build_dir: default_build_dir(),
            input_rule: InputRule::default(),
        }
    }
}

fn default_build_dir() -> String {
    "book/_build/html".into()
}

/// `[split]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSection {
    /// Notebook to split.
    #[serde(default = "default_input_notebook")]
    pub input_notebook: String,

    /// Directory receiving the chapter notebooks, `_toc.yml` and `_config.yml`.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for SplitSection {
    fn default() -> Self {
        Self {
            input_notebook: default_input_notebook(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_input_notebook() -> String {
    "data_101_book.ipynb".into()
}
fn default_output_dir() -> String {
    "book".into()
}

// ---------------------------------------------------------------------------
// InputRule
// ---------------------------------------------------------------------------

/// Extent of the `<input ...search...>` removal pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputRule {
    /// Remove only the matching `<input>` tag.
    #[default]
    Tag,
    /// Remove from the matching `<input>` tag through the end of the document.
    ToEnd,
}

impl fmt::Display for InputRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag => f.write_str("tag"),
            Self::ToEnd => f.write_str("to-end"),
        }
    }
}

impl FromStr for InputRule {
    type Err = BookprepError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tag" => Ok(Self::Tag),
            "to-end" => Ok(Self::ToEnd),
            other => Err(BookprepError::config(format!(
                "unknown input rule '{other}': expected 'tag' or 'to-end'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Runtime configs (merged from config file + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime stripper configuration.
#[derive(Debug, Clone)]
pub struct StripConfig {
    /// Root directory to walk for `.html` files.
    pub build_dir: PathBuf,
    /// Extent of the search-input pass.
    pub input_rule: InputRule,
}

impl From<&AppConfig> for StripConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            build_dir: PathBuf::from(&config.strip.build_dir),
            input_rule: config.strip.input_rule,
        }
    }
}

/// Runtime splitter configuration.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Source notebook.
    pub input_notebook: PathBuf,
    /// Output directory (created if absent).
    pub output_dir: PathBuf,
}

impl From<&AppConfig> for SplitConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            input_notebook: PathBuf::from(&config.split.input_notebook),
            output_dir: PathBuf::from(&config.split.output_dir),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.bookprep/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| BookprepError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.bookprep/bookprep.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| BookprepError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| BookprepError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let path = config_file_path()?;
    init_config_at(&path)?;
    Ok(path)
}

/// Write a default config file at `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| BookprepError::io(dir, e))?;
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| BookprepError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| BookprepError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("build_dir"));
        assert!(toml_str.contains("data_101_book.ipynb"));
        assert!(toml_str.contains("input_rule = \"tag\""));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[split]
output_dir = "site"

[strip]
input_rule = "to-end"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.split.output_dir, "site");
        assert_eq!(config.split.input_notebook, "data_101_book.ipynb");
        assert_eq!(config.strip.build_dir, "book/_build/html");
        assert_eq!(config.strip.input_rule, InputRule::ToEnd);
    }

    #[test]
    fn runtime_configs_from_app_config() {
        let app = AppConfig::default();
        let strip = StripConfig::from(&app);
        assert_eq!(strip.build_dir, PathBuf::from("book/_build/html"));
        assert_eq!(strip.input_rule, InputRule::Tag);

        let split = SplitConfig::from(&app);
        assert_eq!(split.input_notebook, PathBuf::from("data_101_book.ipynb"));
        assert_eq!(split.output_dir, PathBuf::from("book"));
    }

    #[test]
    fn input_rule_parses_and_displays() {
        assert_eq!("tag".parse::<InputRule>().expect("tag"), InputRule::Tag);
        assert_eq!("to-end".parse::<InputRule>().expect("to-end"), InputRule::ToEnd);
        assert_eq!(InputRule::ToEnd.to_string(), "to-end");

        let err = "greedy".parse::<InputRule>().unwrap_err();
        assert!(err.to_string().contains("unknown input rule"));
    }

    #[test]
    fn init_then_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        init_config_at(&path).expect("init");
        let loaded = load_config_from(&path).expect("load");
        assert_eq!(loaded.split.output_dir, "book");
        assert_eq!(loaded.strip.input_rule, InputRule::Tag);
    }

    #[test]
    fn malformed_config_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[strip\nbuild_dir = 1").expect("write");

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, BookprepError::Config { .. }));
    }
}
