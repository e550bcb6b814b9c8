//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `VERDANT_HOST` - Bind address (default: 127.0.0.1)
//! - `VERDANT_PORT` - Listen port (default: 3000)
//! - `VERDANT_BASE_URL` - Public URL for the storefront (default: `http://localhost:3000`)
//! - `VERDANT_CATALOG_DELAY_MS` - Simulated catalog latency (default: 500)
//! - `VERDANT_CATALOG_SOURCE` - `mock` or `unavailable` (default: mock)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_TRACES_SAMPLE_RATE` - Fraction of requests traced (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::catalog::{CatalogSource, MockCatalog, UnavailableCatalog};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_CATALOG_DELAY_MS: &str = "500";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which catalog source to serve products from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogSourceKind {
    /// Hardcoded products after a simulated delay.
    #[default]
    Mock,
    /// Always fails; shows the error page.
    Unavailable,
}

impl FromStr for CatalogSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "unavailable" => Ok(Self::Unavailable),
            other => Err(format!("expected 'mock' or 'unavailable', got '{other}'")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Simulated latency of the mock catalog
    pub catalog_delay: Duration,
    /// Catalog source selection
    pub catalog_source: CatalogSourceKind,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = parse_var::<IpAddr>("VERDANT_HOST", &get("VERDANT_HOST", DEFAULT_HOST))?;
        let port = parse_var::<u16>("VERDANT_PORT", &get("VERDANT_PORT", DEFAULT_PORT))?;
        let base_url = parse_base_url(&get("VERDANT_BASE_URL", DEFAULT_BASE_URL))?;
        let catalog_delay = Duration::from_millis(parse_var::<u64>(
            "VERDANT_CATALOG_DELAY_MS",
            &get("VERDANT_CATALOG_DELAY_MS", DEFAULT_CATALOG_DELAY_MS),
        )?);
        let catalog_source = parse_var::<CatalogSourceKind>(
            "VERDANT_CATALOG_SOURCE",
            &get("VERDANT_CATALOG_SOURCE", "mock"),
        )?;
        let sentry_traces_sample_rate = parse_var::<f32>(
            "SENTRY_TRACES_SAMPLE_RATE",
            &get("SENTRY_TRACES_SAMPLE_RATE", "0.0"),
        )?;
        if !(0.0..=1.0).contains(&sentry_traces_sample_rate) {
            return Err(ConfigError::InvalidEnvVar(
                "SENTRY_TRACES_SAMPLE_RATE".to_string(),
                "must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            base_url,
            catalog_delay,
            catalog_source,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }

    /// Build the configured catalog source.
    #[must_use]
    pub fn catalog_source(&self) -> Arc<dyn CatalogSource> {
        match self.catalog_source {
            CatalogSourceKind::Mock => Arc::new(MockCatalog::new(self.catalog_delay)),
            CatalogSourceKind::Unavailable => Arc::new(UnavailableCatalog),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable's value, naming the variable in the error.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the base URL, which must be http(s) with a host.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("VERDANT_BASE_URL".to_string(), reason);

    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("base_url must have a host".to_string()));
    }
    Ok(url)
}
