use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use jardine_mealplan::Options;
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const MIN_DEBOUNCE_MS: u64 = 400;
pub const MAX_DEBOUNCE_MS: u64 = 800;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub shopping: ShoppingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Row of `kv_store` holding the snapshot.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            key: default_storage_key(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite:jardine.db".to_string()
}

fn default_storage_key() -> String {
    jardine_db::DEFAULT_KEY.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    /// Turns cloud sync, recipe import and AI aggregation on.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Deserialize, Clone)]
pub struct SyncConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    MIN_DEBOUNCE_MS
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Weeks kept planned ahead, 0 turns horizon growth off.
    #[serde(default = "default_horizon_weeks")]
    pub horizon_weeks: usize,
    #[serde(default)]
    pub dated_weeks: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon_weeks: default_horizon_weeks(),
            dated_weeks: false,
        }
    }
}

fn default_horizon_weeks() -> usize {
    jardine_shared::mealplan::DEFAULT_WEEKS
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShoppingConfig {
    #[serde(default = "default_local_fallback")]
    pub local_fallback: bool,
}

impl Default for ShoppingConfig {
    fn default() -> Self {
        Self {
            local_fallback: default_local_fallback(),
        }
    }
}

fn default_local_fallback() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. `JARDINE_API_KEY`
    /// 2. Environment variables (JARDINE__REMOTE__BASE_URL, etc.)
    /// 3. Config file specified by path, `CONFIG_PATH` or `config/default.toml`
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("storage.database_url", default_database_url())?
            .set_default("storage.key", default_storage_key())?
            .set_default("sync.debounce_ms", default_debounce_ms())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, a missing file keeps the defaults
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("JARDINE")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(api_key) = env::var("JARDINE_API_KEY") {
            builder = builder.set_override("remote.api_key", api_key)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS).contains(&self.sync.debounce_ms) {
            return Err(format!(
                "sync debounce_ms must be between {MIN_DEBOUNCE_MS} and {MAX_DEBOUNCE_MS}, got {}",
                self.sync.debounce_ms
            ));
        }
        if self.storage.key.trim().is_empty() {
            return Err("Storage key must not be empty".to_string());
        }
        if self.remote.enabled {
            if self.remote.base_url.trim().is_empty() {
                return Err("Remote base_url is required when remote is enabled".to_string());
            }
            if self.remote.api_key.trim().is_empty() {
                return Err("Remote api_key is required when remote is enabled".to_string());
            }
        }
        if self.remote.timeout_secs == 0 {
            return Err("Remote timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.sync.debounce_ms)
    }

    pub fn coordinator_options(&self) -> Options {
        Options {
            debounce: self.debounce(),
            horizon_weeks: Some(self.planner.horizon_weeks).filter(|weeks| *weeks > 0),
            dated: self.planner.dated_weeks,
        }
    }
}
