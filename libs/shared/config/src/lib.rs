use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown store backend '{0}'")]
    UnknownStoreBackend(String),
}

/// Which persistence collaborator backs the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Memory,
    Supabase,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "supabase" => Ok(StoreBackend::Supabase),
            other => Err(ConfigError::UnknownStoreBackend(other.to_string())),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Supabase => write!(f, "supabase"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_backend: StoreBackend,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub bind_address: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::default(),
        };

        let config = Self {
            store_backend,
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    if store_backend == StoreBackend::Supabase {
                        warn!("SUPABASE_URL not set, using empty value");
                    }
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    if store_backend == StoreBackend::Supabase {
                        warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    }
                    String::new()
                }),
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
        };

        if config.store_backend == StoreBackend::Supabase && !config.is_supabase_configured() {
            warn!("Supabase backend selected but not fully configured");
        }

        Ok(config)
    }

    /// In-memory configuration used by tests and local runs.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn supabase(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            store_backend: StoreBackend::Supabase,
            supabase_url: url.into(),
            supabase_anon_key: anon_key.into(),
            ..Self::default()
        }
    }

    pub fn is_supabase_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_backend_names() {
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert_eq!(" Supabase ".parse::<StoreBackend>(), Ok(StoreBackend::Supabase));
        assert_eq!(
            "SQLite".parse::<StoreBackend>(),
            Err(ConfigError::UnknownStoreBackend("sqlite".to_string()))
        );
    }

    #[test]
    fn unknown_backend_error_names_the_value() {
        let err = "redis".parse::<StoreBackend>().unwrap_err();
        assert_eq!(err.to_string(), "unknown store backend 'redis'");
    }

    #[test]
    fn supabase_config_requires_url_and_key() {
        assert!(AppConfig::supabase("http://localhost:54321", "anon").is_supabase_configured());
        assert!(!AppConfig::supabase("", "anon").is_supabase_configured());
        assert!(!AppConfig::in_memory().is_supabase_configured());
    }
}
