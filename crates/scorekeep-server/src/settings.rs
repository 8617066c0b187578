//! Runtime server configuration.
//!
//! Layered from an optional TOML file and `SCOREKEEP_*` environment
//! variables; the environment wins.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Deployment environment. Only `Development` exposes store error details in
/// 500 responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
  Development,
  #[default]
  Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:            String,
  #[serde(default = "default_port")]
  pub port:            u16,
  #[serde(default = "default_database_path")]
  pub database_path:   PathBuf,
  /// Origins allowed to make cross-origin requests. Empty allows any.
  #[serde(default)]
  pub allowed_origins: Vec<String>,
  #[serde(default)]
  pub environment:     Environment,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 3000 }

fn default_database_path() -> PathBuf { PathBuf::from("scores.db") }

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn expose_error_details(&self) -> bool {
    self.environment == Environment::Development
  }
}

/// The `SCOREKEEP_*` environment source. `SCOREKEEP_ALLOWED_ORIGINS` is a
/// comma-separated list.
pub fn environment() -> config::Environment {
  config::Environment::with_prefix("SCOREKEEP")
    .try_parsing(true)
    .list_separator(",")
    .with_list_parse_key("allowed_origins")
}

/// Load configuration from `path` (if it exists) and the process environment.
pub fn load(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  load_from(path, environment())
}

fn load_from(
  path: &Path,
  env: config::Environment,
) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(env)
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn env(vars: &[(&str, &str)]) -> config::Environment {
    let map = vars
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect::<config::Map<_, _>>();
    environment().source(Some(map))
  }

  fn temp_toml(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir()
      .join(format!("scorekeep-{name}-{}.toml", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn defaults_apply_without_file_or_env() {
    let cfg = load_from(Path::new("/nonexistent/scorekeep.toml"), env(&[])).unwrap();
    assert_eq!(cfg.address(), "0.0.0.0:3000");
    assert_eq!(cfg.database_path, PathBuf::from("scores.db"));
    assert!(cfg.allowed_origins.is_empty());
    assert_eq!(cfg.environment, Environment::Production);
    assert!(!cfg.expose_error_details());
  }

  #[test]
  fn file_values_are_read() {
    let path = temp_toml(
      "file",
      r#"
        port = 8081
        database_path = "/var/lib/scorekeep/scores.db"
        allowed_origins = ["https://game.example"]
        environment = "development"
      "#,
    );
    let cfg = load_from(&path, env(&[])).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.port, 8081);
    assert_eq!(cfg.database_path, PathBuf::from("/var/lib/scorekeep/scores.db"));
    assert_eq!(cfg.allowed_origins, vec!["https://game.example".to_string()]);
    assert!(cfg.expose_error_details());
  }

  #[test]
  fn environment_overrides_file() {
    let path = temp_toml("override", "port = 8081\n");
    let cfg = load_from(
      &path,
      env(&[
        ("SCOREKEEP_PORT", "9090"),
        ("SCOREKEEP_ALLOWED_ORIGINS", "https://a.example,https://b.example"),
      ]),
    )
    .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.port, 9090);
    assert_eq!(
      cfg.allowed_origins,
      vec!["https://a.example".to_string(), "https://b.example".to_string()]
    );
  }

  #[test]
  fn unknown_environment_is_an_error() {
    let result = load_from(
      Path::new("/nonexistent/scorekeep.toml"),
      env(&[("SCOREKEEP_ENVIRONMENT", "staging")]),
    );
    assert!(result.is_err());
  }

  #[test]
  fn tilde_expansion_leaves_absolute_paths_alone() {
    let p = Path::new("/data/scores.db");
    assert_eq!(expand_tilde(p), p.to_path_buf());
  }
}
