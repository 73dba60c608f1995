//! # Repository Module
//!
//! Repository implementations for Estoque.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.sales().register(input)                                    │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │ Category / Product / Sale /  │   │ UserRepository               │   │
//! │  │ Dashboard repositories       │   │                              │   │
//! │  └──────────────┬───────────────┘   └──────────────┬───────────────┘   │
//! │                 ▼                                  ▼                    │
//! │        InventoryStore (memory)              SqlitePool (usuarios)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`] - Category create/list
//! - [`ProductRepository`] - Product create/list/get
//! - [`SaleRepository`] - Sales ledger
//! - [`DashboardRepository`] - Sales rankings
//! - [`UserRepository`] - User accounts

pub mod category;
pub mod dashboard;
pub mod product;
pub mod sale;
pub mod user;

pub use category::CategoryRepository;
pub use dashboard::DashboardRepository;
pub use product::ProductRepository;
pub use sale::SaleRepository;
pub use user::{UserRecord, UserRepository};
