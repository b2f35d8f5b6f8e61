use std::env;
use std::path::PathBuf;

use dotenv::dotenv;
use log::{info, warn};
use serde::Deserialize;

use crate::error::{GatewayError, GatewayResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub supabase: SupabaseConfig,
    pub mutations: MutationConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub images_bucket: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MutationConfig {
    pub image_retries: u32,
    pub rollback_on_failure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub path: PathBuf,
}

const LOCAL_SUPABASE_URL: &str = "http://localhost:54321";

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load `.env` files, then read the configuration from the process
    /// environment.
    pub fn load() -> GatewayResult<Self> {
        match env::var("ENV_FILE_PATH") {
            Ok(env_file_path) if !env_file_path.is_empty() => {
                info!("Loading environment from ENV_FILE_PATH: {}", env_file_path);
                dotenv::from_filename(&env_file_path).ok();
            }
            _ => {
                dotenv().ok();
                let environment_hint = env::var("RUST_ENV")
                    .unwrap_or_else(|_| "development".to_string())
                    .parse()
                    .unwrap_or(Environment::Development);
                let env_file = format!(".env.{:?}", environment_hint).to_lowercase();
                if env_file != ".env.development" {
                    let _ = dotenv::from_filename(&env_file);
                }
            }
        }

        let environment = env::var("RUST_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .parse()
            .unwrap_or(Environment::Development);

        info!("Loading configuration for environment: {:?}", environment);

        let config = Self::from_source(environment, &|key: &str| env::var(key).ok())?;
        config.log_configuration();
        Ok(config)
    }

    /// Build a configuration from any key lookup; `load` passes the process
    /// environment.
    pub fn from_source(
        environment: Environment,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> GatewayResult<Self> {
        let config = Config {
            supabase: Self::load_supabase_config(&environment, lookup)?,
            mutations: Self::load_mutation_config(lookup),
            storage: Self::load_storage_config(lookup),
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    fn load_supabase_config(
        env: &Environment,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> GatewayResult<SupabaseConfig> {
        let (url, anon_key) = match env {
            Environment::Production => (
                lookup("SUPABASE_URL")
                    .ok_or_else(|| GatewayError::Config("SUPABASE_URL must be set in production".into()))?,
                lookup("SUPABASE_ANON_KEY").ok_or_else(|| {
                    GatewayError::Config("SUPABASE_ANON_KEY must be set in production".into())
                })?,
            ),
            Environment::Development | Environment::Test => (
                lookup("SUPABASE_URL").unwrap_or_else(|| LOCAL_SUPABASE_URL.to_string()),
                lookup("SUPABASE_ANON_KEY").unwrap_or_default(),
            ),
        };

        let timeout_seconds = match lookup("GATEWAY_TIMEOUT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid GATEWAY_TIMEOUT '{}', using 10 seconds", raw);
                10
            }),
            None => 10,
        };

        Ok(SupabaseConfig {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
            images_bucket: lookup("SUPABASE_IMAGES_BUCKET").unwrap_or_else(|| "images".to_string()),
            timeout_seconds,
        })
    }

    fn load_mutation_config(lookup: &dyn Fn(&str) -> Option<String>) -> MutationConfig {
        MutationConfig {
            image_retries: lookup("IMAGE_RETRIES")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(2),
            rollback_on_failure: lookup("IMAGE_ROLLBACK")
                .and_then(|raw| parse_bool(&raw))
                .unwrap_or(true),
        }
    }

    fn load_storage_config(lookup: &dyn Fn(&str) -> Option<String>) -> StorageConfig {
        StorageConfig {
            path: lookup("MAJIN_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".majin-storage.json")),
        }
    }

    fn validate(&self) -> GatewayResult<()> {
        let url = url::Url::parse(&self.supabase.url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(GatewayError::Config(format!(
                "SUPABASE_URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.supabase.images_bucket.trim().is_empty() {
            return Err(GatewayError::Config("SUPABASE_IMAGES_BUCKET cannot be empty".into()));
        }

        if self.supabase.timeout_seconds == 0 {
            return Err(GatewayError::Config("GATEWAY_TIMEOUT must be positive".into()));
        }

        if self.environment == Environment::Production && !self.supabase.url.starts_with("https://") {
            warn!("Production Supabase URL is not using https: {}", self.supabase.url);
        }

        Ok(())
    }

    pub fn log_configuration(&self) {
        let key_prefix = self.supabase.anon_key.get(..6).unwrap_or("");
        info!("Configuration loaded:");
        info!("  Environment: {:?}", self.environment);
        info!("  Supabase URL: {}", self.supabase.url);
        info!("  Supabase anon key: {}...", key_prefix);
        info!("  Images bucket: {}", self.supabase.images_bucket);
        info!("  Request timeout: {}s", self.supabase.timeout_seconds);
        info!(
            "  Image retries: {}, rollback on failure: {}",
            self.mutations.image_retries, self.mutations.rollback_on_failure
        );
        info!("  Client storage: {}", self.storage.path.display());
    }
}
