use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_SERVICE_ACCOUNT_KEY_PATH: &str = "./serviceAccountKey.json";

#[derive(Debug, Clone)]
pub struct ItemConfig {
    pub common: core_config::Config,
    pub credentials: CredentialsConfig,
    pub store: StoreConfig,
    /// Answer a missing item with 404 instead of 200. The error body is the
    /// same either way.
    pub strict_not_found: bool,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CredentialsConfig {
    pub key_path: String,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl ItemConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Builds the service settings from `lookup`, which resolves a variable
    /// name to its value.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()) == "prod";

        Ok(ItemConfig {
            common,
            // The key file has a fixed default location in every environment
            credentials: CredentialsConfig {
                key_path: get_env(
                    &lookup,
                    "SERVICE_ACCOUNT_KEY_PATH",
                    Some(DEFAULT_SERVICE_ACCOUNT_KEY_PATH),
                    false,
                )?,
            },
            store: StoreConfig {
                backend: get_env(&lookup, "STORE_BACKEND", Some("mongo"), is_prod)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
                seed_path: lookup("STORE_SEED_PATH"),
            },
            strict_not_found: get_env(&lookup, "STRICT_NOT_FOUND", Some("false"), false)?
                .parse()
                .map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!("Invalid STRICT_NOT_FOUND: {}", e))
                })?,
            otlp_endpoint: lookup("OTLP_ENDPOINT"),
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}
