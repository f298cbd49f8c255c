//! # Configuration Module
//!
//! This module holds the run configuration of copywriter and the optional
//! configuration file that supplies defaults for it.
//!
//! A configuration file can be specified with `--config`, via the
//! `COPYWRITER_CONFIG` environment variable, or placed in the scanned root as
//! `.copywriter.toml`:
//!
//! ```toml
//! max-depth = 3
//! exclude-dirs = ["bin", "obj"]
//! exclude-names = ["Contoso"]
//! include-names = ["Acme"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".copywriter.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "COPYWRITER_CONFIG";

/// The settings of one run.
///
/// Built once at startup from the command line and the configuration file,
/// then shared read-only with every file task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
  /// Compute and report changes without writing them
  pub dry_run: bool,

  /// Directory to search
  pub root: PathBuf,

  /// Levels of subdirectories to search; 0 searches only `root`
  pub max_depth: usize,

  /// Year written into copyright strings
  pub year: u32,

  /// Directory names to skip, compared case-insensitively
  pub excluded_dirs: Vec<String>,

  /// Copyright owners that must never be edited
  pub excluded_names: Vec<String>,

  /// Copyright owners that may be edited; empty allows every owner
  pub included_names: Vec<String>,
}

/// Values a configuration file may provide.
///
/// Every key is optional. Unknown keys are rejected so typos do not go
/// unnoticed.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
  /// Default recursion depth, used when `--max-depth` is not given
  pub max_depth: Option<usize>,

  /// Directory names to skip
  pub exclude_dirs: Vec<String>,

  /// Copyright owners that must never be edited
  pub exclude_names: Vec<String>,

  /// Copyright owners that may be edited
  pub include_names: Vec<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A configuration value is invalid.
  #[error("Invalid value for '{key}': {message}")]
  Invalid { key: String, message: String },
}

impl FileConfig {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: FileConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    verbose_log!(
      "Loaded config: {} excluded dirs, {} excluded names, {} included names",
      config.exclude_dirs.len(),
      config.exclude_names.len(),
      config.include_names.len()
    );

    Ok(config)
  }

  /// Rejects empty strings in any list.
  fn validate(&self) -> Result<(), ConfigError> {
    let lists = [
      ("exclude-dirs", &self.exclude_dirs),
      ("exclude-names", &self.exclude_names),
      ("include-names", &self.include_names),
    ];

    for (key, values) in lists {
      validate_names(key, values)?;
    }

    Ok(())
  }
}

/// Checks that no entry of a name list is empty.
///
/// An empty owner name would be contained in every copyright string, and an
/// empty directory name matches nothing.
pub fn validate_names(key: &str, values: &[String]) -> Result<(), ConfigError> {
  if values.iter().any(|value| value.is_empty()) {
    return Err(ConfigError::Invalid {
      key: key.to_string(),
      message: "names cannot be empty".to_string(),
    });
  }
  Ok(())
}

/// Command-line values that are merged over a [`FileConfig`].
#[derive(Debug, Default, Clone)]
pub struct CliValues {
  pub dry_run: bool,
  pub root: PathBuf,
  pub max_depth: Option<usize>,
  pub year: u32,
  pub excluded_dirs: Vec<String>,
  pub excluded_names: Vec<String>,
  pub included_names: Vec<String>,
}

impl RunConfig {
  /// Builds the run configuration from command-line values and an optional
  /// configuration file.
  ///
  /// `--max-depth` on the command line overrides the file. Name lists are
  /// the file's entries followed by the command line's, without duplicates.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::Invalid`] if a command-line list contains an
  /// empty name.
  pub fn merge(cli: CliValues, file: Option<FileConfig>) -> Result<Self, ConfigError> {
    validate_names("--exclude-dir", &cli.excluded_dirs)?;
    validate_names("--exclude-name", &cli.excluded_names)?;
    validate_names("--include-name", &cli.included_names)?;

    let file = file.unwrap_or_default();

    Ok(Self {
      dry_run: cli.dry_run,
      root: cli.root,
      max_depth: cli.max_depth.or(file.max_depth).unwrap_or(0),
      year: cli.year,
      excluded_dirs: union(file.exclude_dirs, cli.excluded_dirs),
      excluded_names: union(file.exclude_names, cli.excluded_names),
      included_names: union(file.include_names, cli.included_names),
    })
  }
}

/// Appends `extra` to `base`, keeping the first occurrence of each value.
fn union(base: Vec<String>, extra: Vec<String>) -> Vec<String> {
  let mut merged: Vec<String> = Vec::with_capacity(base.len() + extra.len());
  for value in base.into_iter().chain(extra) {
    if !merged.contains(&value) {
      merged.push(value);
    }
  }
  merged
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `COPYWRITER_CONFIG` environment variable
/// 3. `.copywriter.toml` in the scanned root
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `root` - The directory being scanned
///
/// # Returns
///
/// The path to the configuration file, or `None` if no config file is found.
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  // 1. Explicit path from CLI takes highest priority
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  // 2. Check environment variable
  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  // 3. Check the scanned root
  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.is_file() {
    verbose_log!("Using config in root: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `root` - The directory being scanned
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if no config file is used. An explicit
/// path that cannot be read is an error.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<FileConfig>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => {
      let config = FileConfig::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
  }

  fn cli_values() -> CliValues {
    CliValues {
      root: PathBuf::from("."),
      year: 2024,
      ..CliValues::default()
    }
  }

  #[test]
  fn test_parse_valid_config() {
    let config_content = concat!(
      "max-depth = 3\n",
      "exclude-dirs = [\"bin\", \"obj\"]\n",
      "exclude-names = [\"Contoso\"]\n",
      "include-names = [\"Acme\"]\n",
    );

    let config: FileConfig = toml::from_str(config_content).expect("valid config should parse");

    assert_eq!(config.max_depth, Some(3));
    assert_eq!(config.exclude_dirs, names(&["bin", "obj"]));
    assert_eq!(config.exclude_names, names(&["Contoso"]));
    assert_eq!(config.include_names, names(&["Acme"]));
  }

  #[test]
  fn test_parse_empty_config() {
    let config: FileConfig = toml::from_str("").expect("empty config should parse");
    assert_eq!(config, FileConfig::default());
  }

  #[test]
  fn test_unknown_keys_are_rejected() {
    let result: Result<FileConfig, _> = toml::from_str("max_depth = 3\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_validate_empty_name() {
    let config = FileConfig {
      include_names: names(&["Acme", ""]),
      ..FileConfig::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "include-names"));
  }

  #[test]
  fn test_load_config_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "exclude-dirs = [\"bin\"]\n").expect("write config");

    let config = FileConfig::load(&config_path).expect("load config");
    assert_eq!(config.exclude_dirs, names(&["bin"]));
  }

  #[test]
  fn test_load_invalid_toml() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "exclude-dirs = [\"bin\"").expect("write config");

    let result = FileConfig::load(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
  }

  #[test]
  fn test_load_missing_explicit_config() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("missing.toml");

    let result = load_config(Some(&missing), temp_dir.path(), false);
    assert!(result.is_err());
  }

  #[test]
  fn test_discover_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let explicit = temp_dir.path().join("custom.toml");

    let discovered = discover_config_path(Some(&explicit), temp_dir.path());
    assert_eq!(discovered, Some(explicit));
  }

  #[test]
  fn test_no_config_skips_discovery() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), "max-depth = 2\n").expect("write config");

    let config = load_config(None, temp_dir.path(), true).expect("load");
    assert!(config.is_none());
  }

  #[test]
  fn test_merge_without_file() {
    let config = RunConfig::merge(cli_values(), None).expect("merge");

    assert_eq!(config.max_depth, 0);
    assert_eq!(config.year, 2024);
    assert!(config.excluded_dirs.is_empty());
    assert!(config.included_names.is_empty());
  }

  #[test]
  fn test_merge_cli_depth_overrides_file() {
    let file = FileConfig {
      max_depth: Some(4),
      ..FileConfig::default()
    };

    let config = RunConfig::merge(cli_values(), Some(file.clone())).expect("merge");
    assert_eq!(config.max_depth, 4);

    let cli = CliValues {
      max_depth: Some(1),
      ..cli_values()
    };
    let config = RunConfig::merge(cli, Some(file)).expect("merge");
    assert_eq!(config.max_depth, 1);
  }

  #[test]
  fn test_merge_lists_are_unioned_in_order() {
    let file = FileConfig {
      exclude_dirs: names(&["bin", "obj"]),
      include_names: names(&["Acme"]),
      ..FileConfig::default()
    };
    let cli = CliValues {
      excluded_dirs: names(&["obj", "packages"]),
      included_names: names(&["Globex", "Acme"]),
      ..cli_values()
    };

    let config = RunConfig::merge(cli, Some(file)).expect("merge");

    assert_eq!(config.excluded_dirs, names(&["bin", "obj", "packages"]));
    assert_eq!(config.included_names, names(&["Acme", "Globex"]));
  }

  #[test]
  fn test_merge_rejects_empty_cli_name() {
    let cli = CliValues {
      excluded_names: names(&[""]),
      ..cli_values()
    };

    let result = RunConfig::merge(cli, None);
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
  }
}
