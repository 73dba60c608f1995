//! # estoque-db: Storage Layer for Estoque
//!
//! Owns the server's state: the in-memory catalog and sales ledger, and the
//! SQLite-backed user table.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Estoque Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (POST /api/vendas)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    estoque-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ CategoryRepo  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ 001_usuarios │  │   │
//! │  │   │ InventoryStore│    │ SaleRepo      │    │              │  │   │
//! │  │   │  (store.rs)   │    │ DashboardRepo │    │              │  │   │
//! │  │   │               │    │ UserRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Database handle and pool configuration
//! - [`store`] - Lock-guarded inventory
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use estoque_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("estoque.db")).await?;
//!
//! let category = db.categories().create(input).await?;
//! let sale = db.sales().register(new_sale).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{Inventory, InventoryStore};

// Repository re-exports for convenience
pub use repository::{
    CategoryRepository, DashboardRepository, ProductRepository, SaleRepository, UserRecord,
    UserRepository,
};
