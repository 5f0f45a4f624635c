use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown STORE_BACKEND '{0}' (expected memory, redis or postgres)")]
    UnknownBackend(String),

    #[error("{0} must be set when STORE_BACKEND={1}")]
    MissingVar(&'static str, StoreBackend),
}

/// Which key-value table the diary store talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Memory,
    Redis,
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Redis => "redis",
            StoreBackend::Postgres => "postgres",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_address: String,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source so tests don't
    /// have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => StoreBackend::default(),
        };

        let config = Config {
            server_address: lookup("SERVER_ADDRESS")
                .unwrap_or_else(|| "0.0.0.0:3003".to_string()),
            store_backend,
            database_url: lookup("DATABASE_URL"),
            redis_url: lookup("REDIS_URL"),
        };

        match store_backend {
            StoreBackend::Redis if config.redis_url.is_none() => {
                Err(ConfigError::MissingVar("REDIS_URL", store_backend))
            }
            StoreBackend::Postgres if config.database_url.is_none() => {
                Err(ConfigError::MissingVar("DATABASE_URL", store_backend))
            }
            _ => Ok(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_memory_backend() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.server_address, "0.0.0.0:3003");
    }

    #[test]
    fn redis_backend_requires_url() {
        let err = Config::from_lookup(lookup_from(&[("STORE_BACKEND", "redis")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("REDIS_URL", _)));

        let config = Config::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "Redis"),
            ("REDIS_URL", "redis://127.0.0.1/"),
        ]))
        .unwrap();
        assert_eq!(config.store_backend, StoreBackend::Redis);
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let err =
            Config::from_lookup(lookup_from(&[("STORE_BACKEND", "postgres")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL", _)));
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = Config::from_lookup(lookup_from(&[("STORE_BACKEND", "dynamo")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBackend(name) if name == "dynamo"));
    }
}
