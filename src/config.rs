use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for git-changelog.
///
/// Controls where the document is written, how commits are grouped, and
/// whether assembly runs in incremental (append) or full mode.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Destination path for the generated document
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Repository URL; enables commit links and the comparison-links footer
    #[serde(default)]
    pub repo_url: Option<String>,

    /// Group commits under Keep-a-Changelog category headings
    #[serde(default = "default_true")]
    pub group_by_type: bool,

    /// Render and detect an Unreleased section
    #[serde(default = "default_true")]
    pub include_unreleased: bool,

    /// Render the Other category for commits outside the known types
    #[serde(default = "default_true")]
    pub include_other: bool,

    /// Overrides the current version used in comparison links.
    /// Derived from the newest tag (or "0.1.0") when unset.
    #[serde(default)]
    pub latest_version: Option<String>,

    /// Splice new commits into an existing document instead of regenerating
    #[serde(default = "default_true")]
    pub append: bool,
}

fn default_output_file() -> String {
    "CHANGELOG.md".to_string()
}

fn default_true() -> bool {
    true
}

/// Version used for comparison links when no tag has ever been created.
pub const FALLBACK_VERSION: &str = "0.1.0";

impl Default for Config {
    fn default() -> Self {
        Config {
            output_file: default_output_file(),
            repo_url: None,
            group_by_type: true,
            include_unreleased: true,
            include_other: true,
            latest_version: None,
            append: true,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog.toml` in current directory
/// 3. `changelog.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./changelog.toml").exists() {
        fs::read_to_string("./changelog.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("changelog.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
