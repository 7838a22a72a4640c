//! Layered server configuration: TOML file, then `VERIVOICE_*` environment.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use verivoice_store_rest::RestConfig;

/// Runtime server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:  String,
  #[serde(default = "default_port")]
  pub port:  u16,
  #[serde(default)]
  pub store: StoreConfig,
}

/// Which backend holds the `petitions` and `signers` tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
  Sqlite { path: PathBuf },
  Rest(RestConfig),
}

impl Default for StoreConfig {
  fn default() -> Self { Self::Sqlite { path: PathBuf::from("verivoice.db") } }
}

fn default_host() -> String { "127.0.0.1".into() }

fn default_port() -> u16 { 8080 }

impl ServerConfig {
  /// Read `path` if it exists, then overlay the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("VERIVOICE")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

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
