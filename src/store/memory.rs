//! In-memory ingredient store for tests and local development.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{IngredientStore, StoreError, StoreResult};
use crate::models::Ingredient;
use crate::pagination::Pagination;

/// Ingredient store holding everything in process memory.
///
/// Clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryIngredientStore {
    ingredients: Arc<RwLock<Vec<Ingredient>>>,
}

impl MemoryIngredientStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IngredientStore for MemoryIngredientStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Ingredient>> {
        let ingredients = self.ingredients.read().await;
        Ok(ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner_id: &str,
        pagination: Pagination,
    ) -> StoreResult<Vec<Ingredient>> {
        let ingredients = self.ingredients.read().await;
        let mut owned: Vec<Ingredient> = ingredients
            .iter()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        // Same stable order as the SQL backend.
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(owned
            .into_iter()
            .skip(usize::try_from(pagination.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(pagination.limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn count_by_owner(&self, owner_id: &str) -> StoreResult<u64> {
        let ingredients = self.ingredients.read().await;
        Ok(ingredients.iter().filter(|i| i.owner_id == owner_id).count() as u64)
    }

    async fn insert(&self, ingredient: &Ingredient) -> StoreResult<()> {
        let mut ingredients = self.ingredients.write().await;
        if ingredients.iter().any(|i| i.id == ingredient.id) {
            return Err(StoreError::Constraint(format!(
                "duplicate ingredient id {}",
                ingredient.id
            )));
        }
        ingredients.push(ingredient.clone());
        Ok(())
    }

    async fn update(&self, ingredient: &Ingredient) -> StoreResult<()> {
        let mut ingredients = self.ingredients.write().await;
        match ingredients.iter_mut().find(|i| i.id == ingredient.id) {
            Some(existing) => {
                *existing = ingredient.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut ingredients = self.ingredients.write().await;
        let len_before = ingredients.len();
        ingredients.retain(|i| i.id != id);
        Ok(ingredients.len() < len_before)
    }
}
