//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `STOREFRONT_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `CATALOG_API_URL` - Catalog and order API base URL (default: <http://localhost:3010>)
//! - `CATALOG_CACHE_TTL_SECS` - How long catalog reads are cached (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default catalog API location.
pub const DEFAULT_CATALOG_API_URL: &str = "http://localhost:3010";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Catalog API configuration
    pub catalog: CatalogApiConfig,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Where catalog data comes from and how long it is reused.
#[derive(Debug, Clone)]
pub struct CatalogApiConfig {
    /// API base URL; paths such as `/products` are joined onto it.
    pub base_url: Url,
    /// Stale time for cached catalog reads.
    pub cache_ttl: Duration,
}

/// Sentry settings. Sentry stays off unless a DSN is given.
#[derive(Debug, Clone, Default)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, coloured output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_source(source: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = EnvSource(source);

        let host = env.parse_or_default("STOREFRONT_HOST", "127.0.0.1")?;
        let port = env.parse_or_default("STOREFRONT_PORT", "3000")?;
        let base_url = env.get_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;
        let log_format = env.parse_or_default("STOREFRONT_LOG_FORMAT", "pretty")?;

        let catalog = CatalogApiConfig {
            base_url: env.parse_or_default("CATALOG_API_URL", DEFAULT_CATALOG_API_URL)?,
            cache_ttl: Duration::from_secs(env.parse_or_default("CATALOG_CACHE_TTL_SECS", "300")?),
        };

        let sentry = SentryConfig {
            dsn: env.get_optional("SENTRY_DSN"),
            environment: env.get_optional("SENTRY_ENVIRONMENT"),
            sample_rate: env.parse_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            traces_sample_rate: env.parse_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        };

        Ok(Self {
            host,
            port,
            base_url,
            log_format,
            catalog,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` flag.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct EnvSource<F>(F);

impl<F: Fn(&str) -> Option<String>> EnvSource<F> {
    /// Get an optional variable. Blank values count as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or_default<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.catalog.base_url.as_str(), "http://localhost:3010/");
        assert_eq!(config.catalog.cache_ttl, Duration::from_secs(300));
        assert!(config.sentry.dsn.is_none());
        assert!((config.sentry.sample_rate - 1.0).abs() < f32::EPSILON);
        assert!(!config.secure_cookies());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_BASE_URL", "https://shop.example.com"),
            ("STOREFRONT_LOG_FORMAT", "JSON"),
            ("CATALOG_API_URL", "http://api.internal:9000"),
            ("CATALOG_CACHE_TTL_SECS", "30"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.catalog.base_url.host_str(), Some("api.internal"));
        assert_eq!(config.catalog.cache_ttl, Duration::from_secs(30));
        assert!(config.sentry.dsn.is_some());
        assert!(config.secure_cookies());
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("SENTRY_DSN", ""), ("STOREFRONT_PORT", "  ")]).unwrap();
        assert!(config.sentry.dsn.is_none());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_invalid_catalog_url() {
        let err = load(&[("CATALOG_API_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CATALOG_API_URL"));
    }

    #[test]
    fn test_invalid_log_format() {
        assert!(load(&[("STOREFRONT_LOG_FORMAT", "xml")]).is_err());
    }
}
