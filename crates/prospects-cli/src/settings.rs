//! Layered settings: defaults, then the TOML file, then `PROSPECTS_*`
//! environment variables. CLI flags are applied by the caller.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use prospects_core::reminder::DEFAULT_REMINDER_DELAY;
use prospects_store_json::{APP_DIR_NAME, JsonFileStore};
use serde::Deserialize;

// ─── Settings ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
  /// Overrides the platform default store location.
  #[serde(default)]
  pub store_path:    Option<PathBuf>,
  #[serde(default)]
  pub notifications: NotificationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
  /// Whether reminder authorization is granted when requested.
  #[serde(default = "default_enabled")]
  pub enabled:    bool,
  #[serde(default = "default_delay_secs")]
  pub delay_secs: u64,
}

impl Default for NotificationSettings {
  fn default() -> Self {
    Self {
      enabled:    default_enabled(),
      delay_secs: default_delay_secs(),
    }
  }
}

fn default_enabled() -> bool { true }

fn default_delay_secs() -> u64 { DEFAULT_REMINDER_DELAY.as_secs() }

/// `<config dir>/prospects/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
  dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"))
}

/// `<data dir>/prospects/prospects.log`, independent of the store location.
pub fn default_log_path() -> Option<PathBuf> {
  dirs::data_dir().map(|d| d.join(APP_DIR_NAME).join("prospects.log"))
}

/// The `PROSPECTS_*` variables; `__` separates nested keys, e.g.
/// `PROSPECTS_NOTIFICATIONS__DELAY_SECS`.
pub fn environment() -> config::Environment {
  config::Environment::with_prefix("PROSPECTS")
    .prefix_separator("_")
    .separator("__")
    .try_parsing(true)
}

impl Settings {
  /// Read settings from `path` (required) or the default config file
  /// (optional), overlaid with `PROSPECTS_*` environment variables.
  pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
    Self::load_with(path, environment())
  }

  fn load_with(path: Option<&Path>, env: config::Environment) -> anyhow::Result<Self> {
    let mut builder = config::Config::builder();

    match path {
      Some(path) => {
        builder = builder.add_source(config::File::from(path.to_path_buf()).required(true));
      }
      None => {
        if let Some(default) = default_config_path() {
          builder = builder.add_source(config::File::from(default).required(false));
        }
      }
    }

    let settings = builder
      .add_source(env)
      .build()
      .context("failed to read configuration")?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// The store at `override_path`, else the configured path, else the
  /// platform default.
  pub fn store(&self, override_path: Option<&Path>) -> anyhow::Result<JsonFileStore> {
    match override_path.or(self.store_path.as_deref()) {
      Some(path) => Ok(JsonFileStore::open(expand_tilde(path))),
      None => JsonFileStore::default_location().context("resolving default store path"),
    }
  }

  pub fn reminder_delay(&self) -> Duration {
    Duration::from_secs(self.notifications.delay_secs)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}
