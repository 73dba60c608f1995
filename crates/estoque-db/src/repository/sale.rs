//! # Sale Repository
//!
//! The sales ledger: registering sales against product stock.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    register(NewSale)                                    │
//! │                                                                         │
//! │  1. Validate quantity > 0                                              │
//! │       │                                                                 │
//! │       ▼   ┌──────────────── write lock held ────────────────┐          │
//! │  2. Find product ──► ✗ ProductNotFound                     │          │
//! │       │                                                     │          │
//! │       ▼                                                     │          │
//! │  3. quantity > stock? ──► ✗ InsufficientStock (unchanged)  │          │
//! │       │                                                     │          │
//! │       ▼                                                     │          │
//! │  4. stock -= quantity                                       │          │
//! │  5. next sale id, stamp UTC now, append                     │          │
//! │           └─────────────────────────────────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, warn};

use estoque_core::filter::SaleFilter;
use estoque_core::{CoreError, NewSale, Sale};

use crate::error::DbResult;
use crate::store::InventoryStore;

/// Repository for sale operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    store: InventoryStore,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(store: InventoryStore) -> Self {
        SaleRepository { store }
    }

    /// Records a sale and decrements the product's stock.
    ///
    /// All-or-nothing: on any error neither stock nor ledger change.
    ///
    /// ## Errors
    /// - `CoreError::Validation` if quantity <= 0
    /// - `CoreError::ProductNotFound`
    /// - `CoreError::InsufficientStock` if quantity exceeds stock
    pub async fn register(&self, input: NewSale) -> DbResult<Sale> {
        input.validate()?;

        let result = self
            .store
            .with_inventory_mut(|inv| -> Result<Sale, CoreError> {
                let product = inv
                    .product_mut(input.product_id)
                    .ok_or(CoreError::ProductNotFound(input.product_id))?;

                if input.quantity > product.stock_quantity {
                    return Err(CoreError::InsufficientStock {
                        product_id: product.id,
                        available: product.stock_quantity,
                        requested: input.quantity,
                    });
                }
                product.stock_quantity -= input.quantity;

                let sale = Sale {
                    id: inv.ids.next_sale(),
                    product_id: input.product_id,
                    quantity: input.quantity,
                    sale_timestamp: Utc::now(),
                };
                inv.sales.push(sale.clone());
                Ok(sale)
            })
            .await;

        match result {
            Ok(sale) => {
                debug!(
                    sale_id = sale.id,
                    product_id = sale.product_id,
                    quantity = sale.quantity,
                    "Sale registered"
                );
                Ok(sale)
            }
            Err(err) => {
                warn!(product_id = input.product_id, error = %err, "Sale rejected");
                Err(err.into())
            }
        }
    }

    /// Sales within the filter's window, in creation order.
    pub async fn list(&self, filter: &SaleFilter) -> Vec<Sale> {
        self.store
            .with_inventory(|inv| {
                inv.sales
                    .iter()
                    .filter(|s| filter.matches(s))
                    .cloned()
                    .collect()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::category::CategoryRepository;
    use crate::repository::product::ProductRepository;
    use estoque_core::{NewCategory, NewProduct};
    use rust_decimal_macros::dec;

    async fn setup(stock: i64) -> (InventoryStore, SaleRepository) {
        let store = InventoryStore::new();
        CategoryRepository::new(store.clone())
            .create(NewCategory {
                description: "Bebidas".to_string(),
            })
            .await
            .unwrap();
        ProductRepository::new(store.clone())
            .create(NewProduct {
                description: "Refrigerante".to_string(),
                unit_value: dec!(6.00),
                stock_quantity: stock,
                suggested_quantity: 10,
                category_id: 1,
            })
            .await
            .unwrap();
        (store.clone(), SaleRepository::new(store))
    }

    async fn stock_of(store: &InventoryStore, id: i64) -> i64 {
        store
            .with_inventory(|inv| inv.product(id).map(|p| p.stock_quantity))
            .await
            .unwrap()
    }

    fn sale(product_id: i64, quantity: i64) -> NewSale {
        NewSale {
            product_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_register_decrements_stock() {
        let (store, repo) = setup(5).await;

        let recorded = repo.register(sale(1, 3)).await.unwrap();
        assert_eq!(recorded.id, 1);
        assert_eq!(recorded.quantity, 3);
        assert_eq!(stock_of(&store, 1).await, 2);
        assert_eq!(repo.list(&SaleFilter::default()).await, vec![recorded]);
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_state_unchanged() {
        let (store, repo) = setup(3).await;

        let result = repo.register(sale(1, 5)).await;
        assert!(matches!(
            result,
            Err(DbError::Domain(CoreError::InsufficientStock {
                product_id: 1,
                available: 3,
                requested: 5,
            }))
        ));
        assert_eq!(stock_of(&store, 1).await, 3);
        assert!(repo.list(&SaleFilter::default()).await.is_empty());
    }

    #[tokio::test]
    async fn test_sell_exact_stock() {
        let (store, repo) = setup(2).await;

        repo.register(sale(1, 1)).await.unwrap();
        repo.register(sale(1, 1)).await.unwrap();
        assert_eq!(stock_of(&store, 1).await, 0);

        assert!(repo.register(sale(1, 1)).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_product_and_bad_quantity() {
        let (_, repo) = setup(2).await;

        assert!(matches!(
            repo.register(sale(7, 1)).await,
            Err(DbError::Domain(CoreError::ProductNotFound(7)))
        ));
        assert!(matches!(
            repo.register(sale(1, 0)).await,
            Err(DbError::Domain(CoreError::Validation(_)))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sales_never_oversell() {
        let (store, repo) = setup(50).await;

        let handles: Vec<_> = (0..80)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.register(sale(1, 1)).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            if let Ok(sale) = handle.await.unwrap() {
                ids.push(sale.id);
            }
        }

        assert_eq!(ids.len(), 50);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        assert_eq!(stock_of(&store, 1).await, 0);
    }
}
