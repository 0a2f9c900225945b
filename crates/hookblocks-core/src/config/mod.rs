//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every section has defaults, so an empty file is valid.

pub mod cache;
pub mod logging;
pub mod registry;
pub mod store;

use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::logging::LoggingConfig;
use self::registry::RegistryConfig;
use self::store::StoreConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`HOOKBLOCKS__CACHE__PROVIDER`).
pub const ENV_PREFIX: &str = "HOOKBLOCKS";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cache provider settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Registry snapshot and notice settings.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Record store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional; values missing from it fall back to defaults.
    /// Environment variables prefixed with `HOOKBLOCKS__` are applied last.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from(std::path::Path::new(path)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.cache.provider, "memory");
        assert_eq!(config.registry.snapshot_ttl_seconds, 43_200);
        assert_eq!(config.registry.default_priority, 10);
        assert_eq!(config.store.provider, "memory");
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [registry]
            snapshot_ttl_seconds = 60

            [store]
            provider = "postgres"
            "#,
        )
        .unwrap();
        assert_eq!(config.registry.snapshot_ttl_seconds, 60);
        assert_eq!(config.registry.notice_ttl_seconds, 60);
        assert_eq!(config.store.provider, "postgres");
        assert_eq!(config.logging.level, "info");
    }
}
