//! Axum application builder.
//!
//! Configures routes, middleware, and state for the server.
//!
//! # Routes
//!
//! Open:
//! - `GET /`, `GET /health`
//! - `POST /login`, `POST /api/login`, `POST /api/register`
//! - `GET /ws`
//!
//! Bearer token required:
//! - `GET|POST /api/categorias`
//! - `GET|POST /api/produtos`
//! - `GET|POST /api/vendas`
//! - `GET /api/dashboard/{vendas-recentes,vendas-categoria,produtos-mais-vendidos}`
//! - `GET /cotacao-dolar`

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::broadcast::ws_handler;
use crate::services::{categories, dashboard, health, products, quotes, sales, users};
use crate::AppState;

/// Create the Axum application with all routes.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        // Auth
        .route("/login", post(users::login))
        .route("/api/login", post(users::login))
        .route("/api/register", post(users::register))
        // Catalog
        .route(
            "/api/categorias",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/produtos",
            get(products::list_products).post(products::create_product),
        )
        // Ledger
        .route(
            "/api/vendas",
            get(sales::list_sales).post(sales::register_sale),
        )
        // Dashboard
        .route("/api/dashboard/vendas-recentes", get(dashboard::recent_sales))
        .route(
            "/api/dashboard/vendas-categoria",
            get(dashboard::sales_by_category),
        )
        .route(
            "/api/dashboard/produtos-mais-vendidos",
            get(dashboard::top_selling_products),
        )
        // Quote
        .route("/cotacao-dolar", get(quotes::get_usd_quote))
        // WebSocket
        .route("/ws", get(ws_handler))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}
