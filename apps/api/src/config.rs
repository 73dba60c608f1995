//! API configuration module.
//!
//! Configuration is loaded from environment variables (after `.env`) with
//! fallback to defaults.

use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use estoque_core::UsdRate;

/// Default quote endpoint (USD → BRL).
pub const DEFAULT_QUOTE_URL: &str = "https://economia.awesomeapi.com.br/last/USD-BRL";

/// Default allowed browser origins.
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost,http://localhost:80";

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind host
    pub http_host: String,

    /// Bind port
    pub http_port: u16,

    /// SQLite path for the user table
    pub database_url: String,

    /// HS256 signing secret
    pub secret_key: String,

    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,

    /// Quote service endpoint
    pub quote_url: String,

    /// Timeout for every quote lookup
    pub quote_timeout: Duration,

    /// Rate used by catalog operations when the quote service fails
    pub quote_fallback_rate: Option<UsdRate>,

    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_host: "0.0.0.0".to_string(),
            http_port: 8000,
            database_url: "estoque.db".to_string(),
            secret_key: "estoque-dev-secret-change-in-production".to_string(),
            access_token_expire_minutes: 30,
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            quote_timeout: Duration::from_secs(5),
            quote_fallback_rate: None,
            cors_origins: split_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let secret_key = match env::var("SECRET_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!("SECRET_KEY not set, using development secret");
                defaults.secret_key
            }
        };

        let quote_timeout_secs: u64 = parse_var("QUOTE_TIMEOUT_SECS", 5)?;
        if quote_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("QUOTE_TIMEOUT_SECS".to_string()));
        }

        let quote_fallback_rate = match env::var("QUOTE_FALLBACK_RATE") {
            Ok(raw) if !raw.trim().is_empty() => {
                let value = Decimal::from_str(raw.trim())
                    .map_err(|_| ConfigError::InvalidValue("QUOTE_FALLBACK_RATE".to_string()))?;
                let rate = UsdRate::new(value)
                    .map_err(|_| ConfigError::InvalidValue("QUOTE_FALLBACK_RATE".to_string()))?;
                Some(rate)
            }
            _ => None,
        };

        let access_token_expire_minutes: i64 = parse_var("ACCESS_TOKEN_EXPIRE_MINUTES", 30)?;
        if access_token_expire_minutes <= 0 {
            return Err(ConfigError::InvalidValue(
                "ACCESS_TOKEN_EXPIRE_MINUTES".to_string(),
            ));
        }

        Ok(ApiConfig {
            http_host: env::var("HTTP_HOST").unwrap_or(defaults.http_host),
            http_port: parse_var("HTTP_PORT", defaults.http_port)?,
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            secret_key,
            access_token_expire_minutes,
            quote_url: env::var("QUOTE_URL").unwrap_or(defaults.quote_url),
            quote_timeout: Duration::from_secs(quote_timeout_secs),
            quote_fallback_rate,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or(defaults.cors_origins),
        })
    }

    /// Returns the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Token lifetime in seconds.
    pub fn access_token_lifetime_secs(&self) -> i64 {
        self.access_token_expire_minutes * 60
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
