//! Wizard configuration: defaults for every prompt and UI settings.
//!
//! The config lives in a YAML file, `~/.ekko/config.yml` unless overridden:
//!
//! ```yaml
//! defaults:
//!   project_name: my-app
//!   framework: next
//!   auth: none
//!   database: none
//!   tooling: [shadcn]
//!   shadcn_color: neutral
//! ui:
//!   max_rows: 10
//!   color: true
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::Path;

use ekko_core::prompt::DEFAULT_MAX_ROWS;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::selections::{Auth, Database, Framework, ShadcnColor, Tool};

/// Default path for the wizard configuration file
pub const DEFAULT_CONFIG_PATH: &str = "~/.ekko/config.yml";

/// Project name suggested when the config has none
pub const DEFAULT_PROJECT_NAME: &str = "my-app";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EkkoConfig {
    pub defaults: Defaults,
    pub ui: UiConfig,
}

/// Answers pre-selected in each prompt, and used as-is with `--yes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub project_name: String,
    pub framework: Framework,
    pub auth: Auth,
    pub database: Database,
    pub tooling: Vec<Tool>,
    pub shadcn_color: ShadcnColor,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            framework: Framework::default(),
            auth: Auth::default(),
            database: Database::default(),
            tooling: Vec::new(),
            shadcn_color: ShadcnColor::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Rows shown at once by list prompts.
    pub max_rows: usize,
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            color: true,
        }
    }
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use ekko_cli::config::get_config_path;
///
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Loads the wizard configuration.
///
/// A missing file at the default location means built-in defaults; a missing
/// file at an explicitly given path is an error.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file contains invalid YAML or unknown option values
pub fn load_config(config_path_arg: &Option<String>) -> Result<EkkoConfig> {
    let config_path = get_config_path(config_path_arg);
    debug!("Config path: `{config_path}`");

    if config_path_arg.is_none() && !Path::new(&config_path).exists() {
        debug!("No config file found, using built-in defaults");
        return Ok(EkkoConfig::default());
    }

    let contents = fs::read_to_string(&config_path)
        .map_err(|e| Error::io_error("config".to_string(), config_path.clone(), e))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, config_path: &str) -> Result<EkkoConfig> {
    if contents.trim().is_empty() {
        return Ok(EkkoConfig::default());
    }

    serde_yaml::from_str(contents).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            config_path.to_string(),
            e,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_get_config_path_with_none() {
        let result = get_config_path(&None);
        assert!(result.ends_with(".ekko/config.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_config_path_with_tilde() {
        let result = get_config_path(&Some("~/ekko.yml".to_string()));
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("ekko.yml"));
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            r"
defaults:
  project_name: storefront
  framework: tanstack-start
  auth: better-auth
  database: drizzle
  tooling: [tanstack-query, shadcn]
  shadcn_color: slate
ui:
  max_rows: 4
  color: false
",
        );
        let path = Some(file.path().to_str().unwrap().to_string());
        let config = load_config(&path).unwrap();

        assert_eq!(config.defaults.project_name, "storefront");
        assert_eq!(config.defaults.framework, Framework::TanstackStart);
        assert_eq!(config.defaults.auth, Auth::BetterAuth);
        assert_eq!(config.defaults.database, Database::Drizzle);
        assert_eq!(config.defaults.tooling, vec![Tool::TanstackQuery, Tool::Shadcn]);
        assert_eq!(config.defaults.shadcn_color, ShadcnColor::Slate);
        assert_eq!(config.ui.max_rows, 4);
        assert!(!config.ui.color);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = write_config("defaults:\n  auth: clerk\n");
        let path = Some(file.path().to_str().unwrap().to_string());
        let config = load_config(&path).unwrap();

        assert_eq!(config.defaults.auth, Auth::Clerk);
        assert_eq!(config.defaults.project_name, DEFAULT_PROJECT_NAME);
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = write_config("\n");
        let path = Some(file.path().to_str().unwrap().to_string());
        assert_eq!(load_config(&path).unwrap(), EkkoConfig::default());
    }

    #[test]
    fn test_unknown_value_is_yaml_error() {
        let file = write_config("defaults:\n  database: mongo\n");
        let path = file.path().to_str().unwrap().to_string();
        let error = load_config(&Some(path.clone())).unwrap_err();

        assert!(matches!(error, Error::Yaml { .. }));
        assert!(error.to_string().contains(&path));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yml").to_str().unwrap().to_string();
        let error = load_config(&Some(path)).unwrap_err();
        assert!(matches!(error, Error::Io { .. }));
    }
}
