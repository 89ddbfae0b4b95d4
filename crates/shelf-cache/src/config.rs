//! Cache configuration and layered settings loading

use std::path::Path;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use shelf_cache_openlibrary::OpenLibraryConfig;
use thiserror::Error;

/// Base name of the optional settings file in the working directory
pub const DEFAULT_SETTINGS_BASENAME: &str = "shelf-cache";

/// Prefix of environment overrides (`SHELF_CACHE__CACHE__TTL_MS=...`)
pub const ENV_PREFIX: &str = "SHELF_CACHE";

/// Configuration shared by the book and search caches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long an entry stays fresh after it was stored
    pub ttl: Duration,
    /// Period of the background sweep
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            sweep_interval: Duration::from_secs(10 * 60),
        }
    }
}

impl CacheConfig {
    /// Create config with specific TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Default::default()
        }
    }

    /// Set the sweep period
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Failure to load [`Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl SettingsError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Everything needed to build a [`Catalog`](crate::Catalog)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub cache: CacheConfig,
    pub open_library: OpenLibraryConfig,
}

impl Settings {
    /// Load settings: `shelf-cache.{toml,json,yaml}` if present, then
    /// `SHELF_CACHE__*` environment variables
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_builder(Self::layered(None))
    }

    /// Like [`Settings::load`], with an explicit file that must exist,
    /// layered between the default file and the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Self::from_builder(Self::layered(Some(path.as_ref())))
    }

    fn layered(path: Option<&Path>) -> ConfigBuilder<DefaultState> {
        let mut builder = Config::builder()
            .add_source(File::with_name(DEFAULT_SETTINGS_BASENAME).required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    /// Resolve settings from an arbitrary set of sources
    ///
    /// Missing keys fall back to the defaults.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let raw: RawSettings = builder.build()?.try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, SettingsError> {
        let defaults = Settings::default();

        let ttl = raw
            .cache
            .ttl_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.cache.ttl);

        let sweep_interval = match raw.cache.sweep_interval_ms {
            Some(0) => {
                return Err(SettingsError::invalid(
                    "cache.sweep_interval_ms",
                    "must be greater than zero",
                ));
            }
            Some(ms) => Duration::from_millis(ms),
            None => defaults.cache.sweep_interval,
        };

        let request_timeout = match raw.open_library.request_timeout_ms {
            Some(0) => {
                return Err(SettingsError::invalid(
                    "open_library.request_timeout_ms",
                    "must be greater than zero",
                ));
            }
            Some(ms) => Duration::from_millis(ms),
            None => defaults.open_library.request_timeout,
        };

        let base_url = non_blank("open_library.base_url", raw.open_library.base_url)?
            .unwrap_or(defaults.open_library.base_url);
        let covers_base_url =
            non_blank("open_library.covers_base_url", raw.open_library.covers_base_url)?
                .unwrap_or(defaults.open_library.covers_base_url);

        Ok(Settings {
            cache: CacheConfig {
                ttl,
                sweep_interval,
            },
            open_library: OpenLibraryConfig {
                base_url,
                covers_base_url,
                request_timeout,
                user_agent: raw
                    .open_library
                    .user_agent
                    .unwrap_or(defaults.open_library.user_agent),
            },
        })
    }
}

fn non_blank(key: &'static str, value: Option<String>) -> Result<Option<String>, SettingsError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(SettingsError::invalid(key, "must not be empty")),
        other => Ok(other),
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    cache: RawCacheSettings,
    open_library: RawOpenLibrarySettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    ttl_ms: Option<u64>,
    sweep_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawOpenLibrarySettings {
    base_url: Option<String>,
    covers_base_url: Option<String>,
    request_timeout_ms: Option<u64>,
    user_agent: Option<String>,
}
