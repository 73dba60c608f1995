//! Product handlers.
//!
//! ```text
//! POST /api/produtos
//!   1. validate body
//!   2. category lookup                  ── unknown category ─► 404
//!   3. rate lookup (live or fallback)   ── fails ─► 503/500, nothing stored
//!   4. store.create                     (category re-checked under the lock)
//!   5. view = product + status + valor_dolar
//!
//! GET /api/produtos?categorias=1,2&descricao=x
//!   one rate lookup per request, never per product
//! ```

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{RawQuery, State};
use axum::Json;
use tracing::info;

use estoque_core::filter::ProductFilter;
use estoque_core::{NewProduct, ProductView, ValidationError};

use crate::auth::AuthUser;
use crate::broadcast::InventoryEvent;
use crate::error::ApiResult;
use crate::services::quotes::catalog_rate;
use crate::AppState;

/// `POST /api/produtos`
pub async fn create_product(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<Json<ProductView>> {
    let Json(input) = payload?;
    input.validate()?;
    state.db.categories().get_by_id(input.category_id).await?;

    // fetched before the insert so a failed lookup leaves the catalog unchanged
    let rate = catalog_rate(&state).await?;

    let product = state.db.products().create(input).await?;
    let view = product.view(rate);
    info!(
        product_id = product.id,
        status = %view.status,
        user = %user.username,
        "Product created"
    );

    state.hub.publish(&InventoryEvent::ProductCreated {
        produto: view.clone(),
    });
    Ok(Json(view))
}

/// `GET /api/produtos`
pub async fn list_products(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<Vec<ProductView>>> {
    let filter = parse_product_filter(query.as_deref().unwrap_or(""))?;

    let rate = catalog_rate(&state).await?;
    let products = state.db.products().list(&filter).await;
    Ok(Json(products.iter().map(|p| p.view(rate)).collect()))
}

/// Parses the product listing query.
///
/// `categorias` may be comma separated, repeated, or sent as `categorias[]`.
pub fn parse_product_filter(query: &str) -> Result<ProductFilter, ValidationError> {
    let mut filter = ProductFilter::default();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "categorias" | "categorias[]" | "category_ids" | "category_ids[]" => {
                filter.push_category_ids(&value)?
            }
            "descricao" | "description" => filter.set_description(&value),
            _ => {}
        }
    }
    Ok(filter)
}
