//! Dashboard handlers. Read-only; no quote lookup.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use estoque_core::{CategoryBreakdown, Sale, TopProduct};

use crate::auth::AuthUser;
use crate::AppState;

/// `GET /api/dashboard/vendas-recentes`
pub async fn recent_sales(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<Sale>> {
    Json(state.db.dashboard().recent_sales().await)
}

/// `GET /api/dashboard/vendas-categoria`
pub async fn sales_by_category(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Json<CategoryBreakdown> {
    Json(state.db.dashboard().sales_by_category().await)
}

/// `GET /api/dashboard/produtos-mais-vendidos`
pub async fn top_selling_products(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<TopProduct>> {
    Json(state.db.dashboard().top_selling_products().await)
}
