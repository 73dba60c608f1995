//! # Product Repository
//!
//! Catalog operations for products.
//!
//! ## Key Operations
//! - Create (category must exist)
//! - Filtered listing (zero-stock products never listed)
//! - Lookup by id
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(NewProduct)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate fields ──► ✗ Validation          (store untouched)           │
//! │       │                                                                 │
//! │       ▼  write lock                                                     │
//! │  category exists? ──► ✗ CategoryNotFound   (store untouched)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next product id, append                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use estoque_core::filter::ProductFilter;
use estoque_core::{CoreError, NewProduct, Product};

use crate::error::DbResult;
use crate::store::InventoryStore;

/// Repository for product operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let product = repo.create(input).await?;
/// let listed = repo.list(&ProductFilter::default()).await;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: InventoryStore,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(store: InventoryStore) -> Self {
        ProductRepository { store }
    }

    /// Creates a product in an existing category.
    ///
    /// ## Errors
    /// - `CoreError::Validation` for bad fields
    /// - `CoreError::CategoryNotFound` if `category_id` is unknown
    pub async fn create(&self, input: NewProduct) -> DbResult<Product> {
        input.validate()?;

        let product = self
            .store
            .with_inventory_mut(|inv| {
                if inv.category(input.category_id).is_none() {
                    return Err(CoreError::CategoryNotFound(input.category_id));
                }

                let product = Product {
                    id: inv.ids.next_product(),
                    description: input.description.trim().to_string(),
                    unit_value: input.unit_value,
                    stock_quantity: input.stock_quantity,
                    suggested_quantity: input.suggested_quantity,
                    category_id: input.category_id,
                };
                inv.products.push(product.clone());
                Ok(product)
            })
            .await?;

        debug!(
            product_id = product.id,
            category_id = product.category_id,
            status = %product.status(),
            "Product created"
        );
        Ok(product)
    }

    /// Products matching the filter, in creation order.
    pub async fn list(&self, filter: &ProductFilter) -> Vec<Product> {
        self.store
            .with_inventory(|inv| {
                inv.products
                    .iter()
                    .filter(|p| filter.matches(p))
                    .cloned()
                    .collect()
            })
            .await
    }

    /// Gets a product by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Product> {
        self.store
            .with_inventory(|inv| inv.product(id).cloned())
            .await
            .ok_or_else(|| CoreError::ProductNotFound(id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::category::CategoryRepository;
    use estoque_core::{NewCategory, StockStatus};
    use rust_decimal_macros::dec;

    async fn setup() -> (InventoryStore, ProductRepository) {
        let store = InventoryStore::new();
        CategoryRepository::new(store.clone())
            .create(NewCategory {
                description: "Bebidas".to_string(),
            })
            .await
            .unwrap();
        let repo = ProductRepository::new(store.clone());
        (store, repo)
    }

    fn new_product(description: &str, stock: i64, category_id: i64) -> NewProduct {
        NewProduct {
            description: description.to_string(),
            unit_value: dec!(7.50),
            stock_quantity: stock,
            suggested_quantity: 10,
            category_id,
        }
    }

    #[tokio::test]
    async fn test_create_product() {
        let (_, repo) = setup().await;

        let product = repo.create(new_product("Suco", 2, 1)).await.unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.status(), StockStatus::Red);
        assert_eq!(repo.get_by_id(1).await.unwrap(), product);
    }

    #[tokio::test]
    async fn test_create_with_unknown_category_leaves_store_unchanged() {
        let (store, repo) = setup().await;

        let result = repo.create(new_product("Suco", 2, 99)).await;
        assert!(matches!(
            result,
            Err(DbError::Domain(CoreError::CategoryNotFound(99)))
        ));

        let count = store.with_inventory(|inv| inv.products.len()).await;
        assert_eq!(count, 0);

        // the failed attempt did not burn an id
        let next = repo.create(new_product("Agua", 1, 1)).await.unwrap();
        assert_eq!(next.id, 1);
    }

    #[tokio::test]
    async fn test_list_excludes_zero_stock_and_filters() {
        let (_, repo) = setup().await;
        repo.create(new_product("Suco de Laranja", 5, 1)).await.unwrap();
        repo.create(new_product("Agua", 0, 1)).await.unwrap();
        repo.create(new_product("Suco de Uva", 3, 1)).await.unwrap();

        let all = repo.list(&ProductFilter::default()).await;
        let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let mut filter = ProductFilter::default();
        filter.set_description("uva");
        let uva = repo.list(&filter).await;
        assert_eq!(uva.len(), 1);
        assert_eq!(uva[0].id, 3);

        let mut filter = ProductFilter::default();
        filter.push_category_ids("2").unwrap();
        assert!(repo.list(&filter).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let (_, repo) = setup().await;
        assert!(matches!(
            repo.get_by_id(5).await,
            Err(DbError::Domain(CoreError::ProductNotFound(5)))
        ));
    }
}
