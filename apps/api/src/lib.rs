//! # Estoque API
//!
//! HTTP + WebSocket server for the inventory frontend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Estoque API Server                               │
//! │                                                                         │
//! │  Browser ──► axum (8000) ──► AuthUser ──► handlers ──► estoque-db       │
//! │     ▲                                        │                          │
//! │     │                                        ├──► RateGateway (reqwest) │
//! │     │                                        │                          │
//! │     └──────── /ws ◄── BroadcastHub ◄─────────┘  InventoryEvent          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod auth;
pub mod broadcast;
pub mod config;
pub mod error;
pub mod rates;
pub mod services;

use std::sync::Arc;

use estoque_db::Database;

// Re-exports
pub use app::create_app;
pub use broadcast::{BroadcastHub, InventoryEvent};
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use rates::{AwesomeApiGateway, RateError, RateGateway};

use crate::auth::JwtManager;

/// Shared application state.
pub struct AppState {
    pub db: Database,
    pub rates: Arc<dyn RateGateway>,
    pub jwt: JwtManager,
    pub hub: BroadcastHub,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires state from its parts; the JWT manager comes from `config`.
    pub fn new(db: Database, rates: Arc<dyn RateGateway>, config: ApiConfig) -> Self {
        let jwt = JwtManager::new(&config.secret_key, config.access_token_lifetime_secs());
        AppState {
            db,
            rates,
            jwt,
            hub: BroadcastHub::new(),
            config,
        }
    }
}
