use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub api: ApiConfig,
  /// Category used as the startup filter (none means unfiltered)
  pub default_category: Option<String>,
  /// Override for the fact history file location
  pub history_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  pub url: String,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      url: "https://api.chucknorris.io".to_string(),
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./c9s.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/c9s/config.yaml
  ///
  /// No file anywhere means defaults - c9s runs without configuration.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("c9s.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("c9s").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    Ok(config)
  }

  /// Resolve the history file path, falling back to the data directory.
  pub fn history_path(&self) -> Result<PathBuf> {
    if let Some(p) = &self.history_file {
      return Ok(p.clone());
    }

    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("c9s").join("facts.json"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.api.url, "https://api.chucknorris.io");
    assert!(config.default_category.is_none());
    assert!(config.history_file.is_none());
  }

  #[test]
  fn test_parse_full() {
    let yaml = "\
api:
  url: http://localhost:8080
default_category: dev
history_file: /tmp/facts.json
";
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.api.url, "http://localhost:8080");
    assert_eq!(config.default_category.as_deref(), Some("dev"));
    assert_eq!(config.history_file, Some(PathBuf::from("/tmp/facts.json")));
  }

  #[test]
  fn test_parse_partial_keeps_defaults() {
    let config: Config = serde_yaml::from_str("default_category: movie\n").unwrap();
    assert_eq!(config.api.url, "https://api.chucknorris.io");
    assert_eq!(config.default_category.as_deref(), Some("movie"));
  }
}
