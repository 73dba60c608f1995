//! Quote endpoint and the rate lookup used by catalog handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use estoque_core::UsdRate;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::AppState;

/// Body of `GET /cotacao-dolar`.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub cotacao: UsdRate,
}

/// `GET /cotacao-dolar`
///
/// Reports the gateway's own outcome; the configured fallback rate is
/// never used here.
pub async fn get_usd_quote(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<QuoteResponse>> {
    let cotacao = state.rates.get_usd_rate().await?;
    Ok(Json(QuoteResponse { cotacao }))
}

/// Rate for catalog responses: the live quote, or the configured fallback
/// when the quote service fails.
pub(crate) async fn catalog_rate(state: &AppState) -> ApiResult<UsdRate> {
    match state.rates.get_usd_rate().await {
        Ok(rate) => Ok(rate),
        Err(err) => match state.config.quote_fallback_rate {
            Some(fallback) => {
                warn!(error = %err, rate = %fallback, "Quote lookup failed, using fallback rate");
                Ok(fallback)
            }
            None => Err(err.into()),
        },
    }
}
