//! Sale handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use estoque_core::filter::SaleFilter;
use estoque_core::{NewSale, Sale};

use crate::auth::AuthUser;
use crate::broadcast::InventoryEvent;
use crate::error::ApiResult;
use crate::AppState;

/// Query of `GET /api/vendas`.
#[derive(Debug, Default, Deserialize)]
pub struct SaleQuery {
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
}

/// `POST /api/vendas`
pub async fn register_sale(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewSale>, JsonRejection>,
) -> ApiResult<Json<Sale>> {
    let Json(input) = payload?;

    let sale = state.db.sales().register(input).await?;
    info!(
        sale_id = sale.id,
        product_id = sale.product_id,
        quantity = sale.quantity,
        user = %user.username,
        "Sale registered"
    );

    state.hub.publish(&InventoryEvent::SaleRegistered { venda: sale.clone() });
    Ok(Json(sale))
}

/// `GET /api/vendas?data_inicio=..&data_fim=..`
pub async fn list_sales(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    query: Result<Query<SaleQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Sale>>> {
    let Query(query) = query?;
    let filter = SaleFilter::parse(query.data_inicio.as_deref(), query.data_fim.as_deref())?;
    Ok(Json(state.db.sales().list(&filter).await))
}
