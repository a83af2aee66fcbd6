//! The ingredient entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ingredient owned by a single user.
///
/// The identifier and owner are assigned at creation and never change;
/// edits only touch the descriptive fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ingredient {
    /// Store-assigned identifier
    pub id: Uuid,
    /// Display name, e.g. "Sel"
    pub name: String,
    /// Measurement unit, e.g. "g", "ml", "pcs"
    pub unit: String,
    /// Quantity on hand, strictly positive
    pub quantity: f64,
    /// Optional unit price
    pub price: Option<f64>,
    /// Identity of the user who created the ingredient
    pub owner_id: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Validated ingredient data produced by form binding.
///
/// Deliberately carries no owner: the owner always comes from the
/// authenticated session, never from client input.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientDraft {
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub price: Option<f64>,
}

impl Ingredient {
    /// Create a new ingredient from a validated draft, owned by `owner_id`.
    #[must_use]
    pub fn new(draft: IngredientDraft, owner_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            unit: draft.unit,
            quantity: draft.quantity,
            price: draft.price,
            owner_id: owner_id.into(),
            created_at: Utc::now(),
        }
    }

    /// Apply a validated draft to this ingredient in place.
    ///
    /// Identifier, owner, and creation timestamp are untouched.
    pub fn apply(&mut self, draft: IngredientDraft) {
        self.name = draft.name;
        self.unit = draft.unit;
        self.quantity = draft.quantity;
        self.price = draft.price;
    }

    /// Whether `user_id` is the owner of this ingredient.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> IngredientDraft {
        IngredientDraft {
            name: name.to_string(),
            unit: "g".to_string(),
            quantity: 100.0,
            price: Some(1.5),
        }
    }

    #[test]
    fn new_assigns_id_and_owner() {
        let ingredient = Ingredient::new(draft("Sel"), "alice");
        assert_eq!(ingredient.name, "Sel");
        assert_eq!(ingredient.owner_id, "alice");
        assert!(ingredient.is_owned_by("alice"));
        assert!(!ingredient.is_owned_by("bob"));
    }

    #[test]
    fn new_assigns_distinct_ids() {
        let a = Ingredient::new(draft("Sel"), "alice");
        let b = Ingredient::new(draft("Sel"), "alice");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn apply_leaves_identity_untouched() {
        let mut ingredient = Ingredient::new(draft("Sel"), "alice");
        let id = ingredient.id;
        let created_at = ingredient.created_at;

        ingredient.apply(IngredientDraft {
            name: "Poivre".to_string(),
            unit: "g".to_string(),
            quantity: 50.0,
            price: None,
        });

        assert_eq!(ingredient.name, "Poivre");
        assert_eq!(ingredient.quantity, 50.0);
        assert_eq!(ingredient.price, None);
        assert_eq!(ingredient.id, id);
        assert_eq!(ingredient.owner_id, "alice");
        assert_eq!(ingredient.created_at, created_at);
    }
}
