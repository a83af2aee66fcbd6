//! Persistence layer for ingredients.
//!
//! [`IngredientStore`] is the narrow seam between handlers and storage.
//! Production uses [`PgIngredientStore`]; tests and the dev loop use
//! [`MemoryIngredientStore`].

mod memory;
mod pg;

pub use memory::MemoryIngredientStore;
pub use pg::{connect_pool, PgIngredientStore};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Ingredient;
use crate::pagination::Pagination;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Error raised by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found
    #[error("record not found")]
    NotFound,

    /// Constraint violation (unique, foreign key, check)
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation()
                    || db_err.is_foreign_key_violation()
                    || db_err.is_check_violation() =>
            {
                Self::Constraint(db_err.to_string())
            }
            other => Self::Database(other.to_string()),
        }
    }
}

/// Storage operations over ingredients.
///
/// Ordering is stable (creation time, then id), so consecutive pages of
/// `find_by_owner` partition the owned set without duplicates or gaps.
#[async_trait]
pub trait IngredientStore: Send + Sync {
    /// Find an ingredient by its identifier.
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Ingredient>>;

    /// Find ingredients owned by `owner_id`, in stable order, bounded by
    /// `pagination`.
    async fn find_by_owner(
        &self,
        owner_id: &str,
        pagination: Pagination,
    ) -> StoreResult<Vec<Ingredient>>;

    /// Count all ingredients owned by `owner_id`.
    async fn count_by_owner(&self, owner_id: &str) -> StoreResult<u64>;

    /// Persist a new ingredient.
    async fn insert(&self, ingredient: &Ingredient) -> StoreResult<()>;

    /// Persist changes to an existing ingredient.
    ///
    /// Returns [`StoreError::NotFound`] if the record no longer exists.
    async fn update(&self, ingredient: &Ingredient) -> StoreResult<()>;

    /// Delete an ingredient by id.
    ///
    /// Returns `false` if no record with that id existed.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}
