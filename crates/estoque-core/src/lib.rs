//! # estoque-core: Pure Business Logic for Estoque
//!
//! Domain types and rules for the inventory backend, as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Estoque Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    Produtos ──► Vendas ──► Dashboard ──► Cotação               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / WebSocket                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ estoque-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  status   │  │ dashboard │  │ validation│  │   │
//! │  │   │  Product  │  │ classify  │  │  ranking  │  │   rules   │  │   │
//! │  │   │   Sale    │  │           │  │  totals   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              estoque-db (Inventory store + users)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Sale, views)
//! - [`status`] - Stock status classification
//! - [`money`] - Exchange rate type and USD conversion
//! - [`filter`] - Product and sale list filters
//! - [`dashboard`] - Sales rankings
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use estoque_core::status::{classify, StockStatus};
//!
//! assert_eq!(classify(3, 5), StockStatus::Red);
//! assert_eq!(classify(10, 5), StockStatus::Yellow);
//! assert_eq!(classify(11, 5), StockStatus::Green);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dashboard;
pub mod error;
pub mod filter;
pub mod money;
pub mod status;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::UsdRate;
pub use status::{classify, StockStatus};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of sales returned by the "recent sales" dashboard.
pub const RECENT_SALES_LIMIT: usize = 4;

/// Number of categories ranked individually before the rest is summed.
pub const TOP_CATEGORIES_LIMIT: usize = 3;

/// Number of products in the best-sellers dashboard.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// Surplus over the suggested quantity still considered "yellow".
pub const YELLOW_MARGIN: i64 = 5;
