//! Runtime configuration, read from an optional TOML file overlaid with
//! `BUFETE_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Which [`bufete_core::DocumentStore`] backend to serve from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  Sqlite,
  /// Process-local; everything is lost on exit.
  Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  /// Public origin used in hypermedia links and `Location` headers.
  pub base_url:         String,
  pub backend:          Backend,
  pub store_path:       PathBuf,
  /// Insert sample lawyers at startup when the collection is empty.
  pub seed_sample_data: bool,
  /// Generated lawyers and clients to add on every start; 0 disables.
  pub fake_records:     usize,
}

impl ServerConfig {
  /// Load from `path` (if it exists) and the environment, on top of defaults.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::from_builder(
      config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("BUFETE").try_parsing(true)),
    )
  }

  fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
  ) -> anyhow::Result<Self> {
    let settings = builder
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .set_default("base_url", "")?
      .set_default("backend", "sqlite")?
      .set_default("store_path", "bufete.db")?
      .set_default("seed_sample_data", true)?
      .set_default("fake_records", 0)?
      .build()
      .context("failed to read configuration")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  /// The socket address to bind, as `host:port`.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
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
  use config::{File, FileFormat};

  use super::*;

  #[test]
  fn defaults_without_sources() {
    let cfg = ServerConfig::from_builder(config::Config::builder()).unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:8080");
    assert_eq!(cfg.backend, Backend::Sqlite);
    assert_eq!(cfg.store_path, PathBuf::from("bufete.db"));
    assert_eq!(cfg.base_url, "");
    assert!(cfg.seed_sample_data);
    assert_eq!(cfg.fake_records, 0);
  }

  #[test]
  fn toml_overrides_defaults() {
    let toml = r#"
      port = 9000
      backend = "memory"
      base_url = "https://bufete.example"
      seed_sample_data = false
      fake_records = 5
    "#;
    let cfg = ServerConfig::from_builder(
      config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
    )
    .unwrap();

    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.backend, Backend::Memory);
    assert_eq!(cfg.base_url, "https://bufete.example");
    assert!(!cfg.seed_sample_data);
    assert_eq!(cfg.fake_records, 5);
  }

  #[test]
  fn unknown_backend_is_rejected() {
    let result = ServerConfig::from_builder(
      config::Config::builder()
        .add_source(File::from_str(r#"backend = "firestore""#, FileFormat::Toml)),
    );
    assert!(result.is_err());
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/bufete.toml")).unwrap();
    assert_eq!(cfg.port, 8080);
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/data/bufete.db")),
      PathBuf::from(home).join("data/bufete.db")
    );
    assert_eq!(expand_tilde(Path::new("/srv/bufete.db")), PathBuf::from("/srv/bufete.db"));
  }
}
