use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub hashing: HashingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub provider_type: ProviderType,
    pub sanity: Option<SanityConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub token: String,
    pub api_host: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Argon2id のパラメータ。未指定の項目はライブラリの既定値
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HashingConfig {
    pub memory_cost_kib: Option<u32>,
    pub time_cost: Option<u32>,
    pub parallelism: Option<u32>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Memory,
    Sanity,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::new_with_config("config/default")
    }

    pub fn new_with_config(config_path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(config_path))
            .add_source(Environment::with_prefix("CREDENTIALS_SERVICE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
