//! Runtime configuration.
//!
//! Layered, lowest precedence first: built-in defaults, the optional TOML
//! file, `FOODSHARE_*` environment variables, then command-line overrides.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
  pub db_path:        PathBuf,
  pub cache_ttl_secs: u64,
  pub host:           String,
  pub port:           u16,
}

impl Settings {
  pub fn load(file: &Path, db_override: Option<&Path>) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("db_path", "database.db")?
      .set_default("cache_ttl_secs", 60)?
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("FOODSHARE"))
      .set_override_option(
        "db_path",
        db_override.map(|p| p.to_string_lossy().into_owned()),
      )?
      .build()
      .context("failed to read configuration")?;

    let mut parsed: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;
    parsed.db_path = expand_tilde(&parsed.db_path);
    Ok(parsed)
  }

  pub fn cache_ttl(&self) -> Duration { Duration::from_secs(self.cache_ttl_secs) }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
