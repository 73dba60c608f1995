//! # Currency Rate Gateway
//!
//! Fetches the spot USD → BRL quote from the external quote service.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET {quote_url}   (one bounded timeout, no retry, no cache)           │
//! │       │                                                                 │
//! │       ├── connect error / timeout / non-2xx ──► RateError::Unavailable │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  { "USDBRL": { "bid": "5.4321", ... } }                                 │
//! │       │                                                                 │
//! │       ├── missing key / bad number / bid <= 0 ──► RateError::Malformed │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UsdRate(5.4321)                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use estoque_core::UsdRate;

/// Quote lookup failures.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    /// The quote service could not be reached in time or answered non-2xx.
    #[error("Quote service unavailable: {0}")]
    Unavailable(String),

    /// The quote service answered with a payload we can't use.
    #[error("Malformed quote payload: {0}")]
    Malformed(String),
}

/// Source of the current USD quote.
#[async_trait]
pub trait RateGateway: Send + Sync {
    /// Fetches the current quote. Every call hits the source.
    async fn get_usd_rate(&self) -> Result<UsdRate, RateError>;
}

// =============================================================================
// AwesomeAPI Gateway
// =============================================================================

/// HTTP gateway for the AwesomeAPI `last/USD-BRL` endpoint.
pub struct AwesomeApiGateway {
    client: Client,
    url: Url,
}

impl AwesomeApiGateway {
    /// Builds a gateway whose every request is bounded by `timeout`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, RateError> {
        let url = Url::parse(url).map_err(|e| RateError::Unavailable(format!("bad url: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RateError::Unavailable(e.to_string()))?;
        Ok(AwesomeApiGateway { client, url })
    }
}

#[async_trait]
impl RateGateway for AwesomeApiGateway {
    async fn get_usd_rate(&self) -> Result<UsdRate, RateError> {
        debug!(url = %self.url, "Fetching USD quote");

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Quote request failed");
                RateError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Quote service returned an error status");
            return Err(RateError::Unavailable(format!("status {status}")));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                RateError::Unavailable(e.to_string())
            } else {
                RateError::Malformed(e.to_string())
            }
        })?;

        let rate = parse_quote(&body)?;
        debug!(rate = %rate, "USD quote fetched");
        Ok(rate)
    }
}

/// Extracts `USDBRL.bid` from a quote payload.
///
/// The service sends the bid as a string; a bare number is also accepted.
pub fn parse_quote(body: &str) -> Result<UsdRate, RateError> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| RateError::Malformed(e.to_string()))?;

    let bid = payload
        .get("USDBRL")
        .and_then(|q| q.get("bid"))
        .ok_or_else(|| RateError::Malformed("missing USDBRL.bid".to_string()))?;

    let value = match bid {
        Value::String(s) => Decimal::from_str(s.trim()),
        Value::Number(n) => Decimal::from_str(&n.to_string()),
        other => return Err(RateError::Malformed(format!("unexpected bid: {other}"))),
    }
    .map_err(|e| RateError::Malformed(e.to_string()))?;

    UsdRate::new(value).map_err(|e| RateError::Malformed(e.to_string()))
}
