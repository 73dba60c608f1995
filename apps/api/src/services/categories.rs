//! Category handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use estoque_core::{Category, NewCategory};

use crate::auth::AuthUser;
use crate::broadcast::InventoryEvent;
use crate::error::ApiResult;
use crate::AppState;

/// `POST /api/categorias`
pub async fn create_category(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Json(input) = payload?;

    let category = state.db.categories().create(input).await?;
    info!(category_id = category.id, user = %user.username, "Category created");

    state.hub.publish(&InventoryEvent::CategoryCreated {
        categoria: category.clone(),
    });
    Ok(Json(category))
}

/// `GET /api/categorias`
pub async fn list_categories(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<Category>> {
    Json(state.db.categories().list().await)
}
