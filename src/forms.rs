//! Form binding and validation for the ingredient pages.
//!
//! Fields arrive as strings from the browser and are validated into an
//! [`IngredientDraft`]. Validation collects every field error so the
//! re-rendered form can annotate all of them at once.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::{Ingredient, IngredientDraft};

/// Maximum length of the ingredient name.
pub const NAME_MAX_LEN: usize = 50;
/// Maximum length of the unit label.
pub const UNIT_MAX_LEN: usize = 20;

/// Raw form fields as submitted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub price: String,
}

impl IngredientForm {
    /// Pre-fill the form from an existing ingredient, for the edit page.
    #[must_use]
    pub fn from_ingredient(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            unit: ingredient.unit.clone(),
            quantity: ingredient.quantity.to_string(),
            price: ingredient.price.map(|p| p.to_string()).unwrap_or_default(),
        }
    }

    /// Validate the submitted fields into a draft.
    ///
    /// # Errors
    ///
    /// Returns the per-field error messages when any field is invalid.
    pub fn validate(&self) -> Result<IngredientDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name", "Name is required.");
        } else if name.chars().count() > NAME_MAX_LEN {
            errors.insert("name", "Name must be at most 50 characters.");
        }

        let unit = self.unit.trim();
        if unit.is_empty() {
            errors.insert("unit", "Unit is required.");
        } else if unit.chars().count() > UNIT_MAX_LEN {
            errors.insert("unit", "Unit must be at most 20 characters.");
        }

        let quantity = match self.quantity.trim().parse::<f64>() {
            Ok(q) if q.is_finite() && q > 0.0 => Some(q),
            Ok(_) => {
                errors.insert("quantity", "Quantity must be greater than zero.");
                None
            }
            Err(_) => {
                errors.insert("quantity", "Quantity must be a number.");
                None
            }
        };

        let price = match self.price.trim() {
            "" => None,
            raw => match raw.parse::<f64>() {
                Ok(p) if p.is_finite() && p >= 0.0 => Some(p),
                Ok(_) => {
                    errors.insert("price", "Price cannot be negative.");
                    None
                }
                Err(_) => {
                    errors.insert("price", "Price must be a number.");
                    None
                }
            },
        };

        // a missing quantity always records an error first
        let Some(quantity) = quantity else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(IngredientDraft {
            name: name.to_string(),
            unit: unit.to_string(),
            quantity,
            price,
        })
    }
}

/// Per-field validation error messages, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, &'static str>,
}

impl FormErrors {
    fn insert(&mut self, field: &'static str, message: &'static str) {
        self.fields.entry(field).or_insert(message);
    }

    /// The error message for a field, if any. Called from templates.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&&'static str> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
