//! Domain entities

mod ingredient;

pub use ingredient::{Ingredient, IngredientDraft};
