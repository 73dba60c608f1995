//! # Category Repository
//!
//! Create and list operations over the in-memory catalog.

use tracing::debug;

use estoque_core::{Category, CoreError, NewCategory};

use crate::error::DbResult;
use crate::store::InventoryStore;

/// Repository for category operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    store: InventoryStore,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(store: InventoryStore) -> Self {
        CategoryRepository { store }
    }

    /// Creates a category with the next id. The description is stored trimmed.
    pub async fn create(&self, input: NewCategory) -> DbResult<Category> {
        input.validate()?;
        let description = input.description.trim().to_string();

        let category = self
            .store
            .with_inventory_mut(|inv| {
                let category = Category {
                    id: inv.ids.next_category(),
                    description,
                };
                inv.categories.push(category.clone());
                category
            })
            .await;

        debug!(category_id = category.id, "Category created");
        Ok(category)
    }

    /// All categories in creation order.
    pub async fn list(&self) -> Vec<Category> {
        self.store.with_inventory(|inv| inv.categories.clone()).await
    }

    /// Gets a category by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Category> {
        self.store
            .with_inventory(|inv| inv.category(id).cloned())
            .await
            .ok_or_else(|| CoreError::CategoryNotFound(id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;

    fn new_category(description: &str) -> NewCategory {
        NewCategory {
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_in_order() {
        let repo = CategoryRepository::new(InventoryStore::new());

        let first = repo.create(new_category("Bebidas")).await.unwrap();
        let second = repo.create(new_category("  Limpeza ")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.description, "Limpeza");

        let all = repo.list().await;
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_description() {
        let repo = CategoryRepository::new(InventoryStore::new());

        let result = repo.create(new_category("   ")).await;
        assert!(matches!(
            result,
            Err(DbError::Domain(CoreError::Validation(_)))
        ));
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_category() {
        let repo = CategoryRepository::new(InventoryStore::new());
        assert!(matches!(
            repo.get_by_id(3).await,
            Err(DbError::Domain(CoreError::CategoryNotFound(3)))
        ));
    }
}
