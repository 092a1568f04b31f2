use serde::{Deserialize, Serialize};

use crate::recipe::{Ingredient, deserialize_quantity};

/// A planned recipe reduced to what the shopping list needs.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RecipeIngredients {
    pub title: String,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ShoppingItem {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum IngredientList {
    Items(Vec<ShoppingItem>),
    /// Freeform answer from the aggregation function, shown as is.
    Text(String),
}

impl IngredientList {
    pub fn is_empty(&self) -> bool {
        match self {
            IngredientList::Items(items) => items.is_empty(),
            IngredientList::Text(text) => text.trim().is_empty(),
        }
    }
}

#[async_trait::async_trait]
pub trait IngredientAggregator: Send + Sync {
    async fn aggregate_ingredients(
        &self,
        recipes: &[RecipeIngredients],
    ) -> crate::Result<IngredientList>;
}
