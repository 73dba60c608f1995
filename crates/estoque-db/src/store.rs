//! # Inventory Store
//!
//! In-process catalog and sales ledger behind a single lock.
//!
//! ## Locking Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   InventoryStore (cheap to clone)                       │
//! │                                                                         │
//! │   Arc<RwLock<Inventory>>                                                │
//! │   ┌─────────────────────────────────────────────────────────────────┐   │
//! │   │  categories: Vec<Category>   (creation order)                   │   │
//! │   │  products:   Vec<Product>    (creation order)                   │   │
//! │   │  sales:      Vec<Sale>       (creation order)                   │   │
//! │   │  ids:        IdSequences     (one AtomicI64 per entity)         │   │
//! │   └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │   with_inventory      ── read lock ── many readers at once              │
//! │   with_inventory_mut  ── write lock ─ whole check-then-act sequence     │
//! │                                                                         │
//! │   register_sale: find → check stock → decrement → assign id → append   │
//! │                  all under one write guard; readers never see half     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here survives a restart.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use estoque_core::{Category, Product, Sale};

// =============================================================================
// Id Sequences
// =============================================================================

/// Monotonic id counters, one per entity type, starting at 1.
///
/// Ids never depend on collection length.
#[derive(Debug, Default)]
pub struct IdSequences {
    category: AtomicI64,
    product: AtomicI64,
    sale: AtomicI64,
}

impl IdSequences {
    pub fn next_category(&self) -> i64 {
        self.category.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn next_product(&self) -> i64 {
        self.product.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn next_sale(&self) -> i64 {
        self.sale.fetch_add(1, Ordering::SeqCst) + 1
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// All catalog and ledger state.
#[derive(Debug, Default)]
pub struct Inventory {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub ids: IdSequences,
}

impl Inventory {
    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: i64) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }
}

// =============================================================================
// Store Handle
// =============================================================================

/// Shared handle to the inventory.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    inner: Arc<RwLock<Inventory>>,
}

impl InventoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the inventory.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = store.with_inventory(|inv| inv.products.len()).await;
    /// ```
    pub async fn with_inventory<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Inventory) -> R,
    {
        let inventory = self.inner.read().await;
        f(&inventory)
    }

    /// Executes a function with exclusive write access to the inventory.
    ///
    /// The closure is synchronous, so the guard is never held across an
    /// await point.
    pub async fn with_inventory_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Inventory) -> R,
    {
        let mut inventory = self.inner.write().await;
        f(&mut inventory)
    }
}
