use crate::ConfigError;
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::info;

pub const DEFAULT_MONGO_HOST: &str = "jokecluster.6tsxl.mongodb.net";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;

/// Where per-user history lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryBackend {
    Mongo,
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub username: String,
    pub password: String,
    pub database: String,
    pub collection: String,
    pub host: String,
    /// Replaces the URI built from the fields above.
    pub uri: Option<String>,
}

impl MongoConfig {
    #[must_use]
    pub fn connection_uri(&self) -> String {
        if let Some(uri) = &self.uri {
            return uri.clone();
        }

        format!(
            "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName=JokeCluster",
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password),
            self.host
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `None` when history is kept in memory.
    pub mongo: Option<MongoConfig>,
    pub cohere_key: String,
    pub cohere_base_url: Option<String>,
    pub cohere_model: Option<String>,
    pub generation_timeout: Duration,
    pub static_dir: PathBuf,
}

impl Config {
    /// Read the process environment.
    pub fn from_env(backend: HistoryBackend) -> Result<Self, ConfigError> {
        Self::from_lookup(backend, |key| env::var(key).ok())
    }

    /// Build the configuration from `lookup`. Every missing required key is
    /// reported at once. Empty values count as missing.
    pub fn from_lookup<F>(backend: HistoryBackend, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut missing = Vec::new();
        let mut require = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };

        let cohere_key = require("COHERE_KEY");
        let mongo = match backend {
            HistoryBackend::Mongo => Some(MongoConfig {
                username: require("MONGO_DB_USERNAME"),
                password: require("MONGO_DB_PASSWORD"),
                database: require("MONGO_DB_NAME"),
                collection: require("MONGO_COLLECTION"),
                host: get("MONGO_DB_HOST").unwrap_or_else(|| DEFAULT_MONGO_HOST.to_string()),
                uri: get("MONGO_DB_URI"),
            }),
            HistoryBackend::InMemory => {
                info!("keeping joke history in memory");
                None
            }
        };

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let timeout_secs = parse_or(
            "GENERATION_TIMEOUT_SECS",
            get("GENERATION_TIMEOUT_SECS"),
            DEFAULT_GENERATION_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "GENERATION_TIMEOUT_SECS",
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            mongo,
            cohere_key,
            cohere_base_url: get("COHERE_BASE_URL"),
            cohere_model: get("COHERE_MODEL"),
            generation_timeout: Duration::from_secs(timeout_secs),
            static_dir: get("STATIC_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
        })
    }
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid(key, format!("{value:?}: {e}"))),
        None => Ok(default),
    }
}
