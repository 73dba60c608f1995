//! # Dashboard Repository
//!
//! Read-only rankings. Each query runs under one read guard, so it sees a
//! consistent snapshot of catalog and ledger.

use estoque_core::dashboard;
use estoque_core::{
    CategoryBreakdown, Sale, TopProduct, RECENT_SALES_LIMIT, TOP_CATEGORIES_LIMIT,
    TOP_PRODUCTS_LIMIT,
};

use crate::store::InventoryStore;

/// Repository for dashboard queries.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    store: InventoryStore,
}

impl DashboardRepository {
    /// Creates a new DashboardRepository.
    pub fn new(store: InventoryStore) -> Self {
        DashboardRepository { store }
    }

    /// The most recent sales, newest first (at most 4).
    pub async fn recent_sales(&self) -> Vec<Sale> {
        self.store
            .with_inventory(|inv| dashboard::recent_sales(&inv.sales, RECENT_SALES_LIMIT))
            .await
    }

    /// Units sold for the top 3 categories plus the rest.
    pub async fn sales_by_category(&self) -> CategoryBreakdown {
        self.store
            .with_inventory(|inv| {
                dashboard::sales_by_category(
                    &inv.sales,
                    &inv.products,
                    &inv.categories,
                    TOP_CATEGORIES_LIMIT,
                )
            })
            .await
    }

    /// The 10 best-selling products.
    pub async fn top_selling_products(&self) -> Vec<TopProduct> {
        self.store
            .with_inventory(|inv| {
                dashboard::top_selling_products(&inv.sales, &inv.products, TOP_PRODUCTS_LIMIT)
            })
            .await
    }
}
