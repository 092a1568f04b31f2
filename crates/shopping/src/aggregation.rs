use jardine_shared::shopping::{RecipeIngredients, ShoppingItem};
use std::collections::HashMap;

use crate::ambiguous::is_ambiguous;

/// Aggregated ingredient with metadata
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedIngredient {
    pub name: String,
    /// Summed amount in `unit`; `None` when nothing measurable was given.
    pub quantity: Option<f64>,
    /// Base unit: `ml`, `g`, `item`, or any unit that doesn't convert.
    pub unit: String,
    pub is_ambiguous: bool,
}

impl From<AggregatedIngredient> for ShoppingItem {
    fn from(value: AggregatedIngredient) -> Self {
        let unit = match value.unit.as_str() {
            "item" | "" => None,
            _ => Some(value.unit),
        };

        ShoppingItem {
            name: value.name,
            quantity: value.quantity,
            unit,
        }
    }
}

/// Best-effort local shopping list.
///
/// Names are trimmed and lowercased, units converted to a base unit, and
/// quantities for the same (name, unit) summed:
/// - "chicken 2lbs" + "chicken 1lb" = "chicken 1360.77 g"
/// - "milk 1 cup" + "milk 240ml" = "milk 480 ml"
/// - "onion 1 whole" + "onion 1 cup" = 2 separate lines (incompatible units)
///
/// Vague amounts (`a pinch`, `to taste`, no quantity) are kept as one line
/// per name and flagged.
pub fn aggregate_local(recipes: &[RecipeIngredients]) -> Vec<AggregatedIngredient> {
    let mut groups: HashMap<(String, String), (Option<f64>, bool)> = HashMap::new();

    for ingredient in recipes.iter().flat_map(|r| r.ingredients.iter()) {
        let name = normalize_name(&ingredient.name);
        if name.is_empty() {
            continue;
        }

        let ambiguous = is_ambiguous(ingredient);

        let (unit, quantity) = match (ambiguous, ingredient.quantity) {
            (false, Some(quantity)) => {
                let (unit, quantity) =
                    normalize_unit(ingredient.unit.as_deref().unwrap_or_default(), quantity);
                (unit, Some(quantity))
            }
            _ => (String::new(), None),
        };

        let entry = groups.entry((name, unit)).or_insert((None, false));
        entry.0 = match (entry.0, quantity) {
            (Some(total), Some(quantity)) => Some(total + quantity),
            (total, quantity) => total.or(quantity),
        };
        entry.1 = entry.1 || ambiguous;
    }

    let mut result = groups
        .into_iter()
        .map(|((name, unit), (quantity, is_ambiguous))| AggregatedIngredient {
            name,
            quantity,
            unit,
            is_ambiguous,
        })
        .collect::<Vec<_>>();

    result.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.unit.cmp(&b.unit)));

    result
}

/// Normalize ingredient name (lowercase, trim whitespace)
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize unit and convert quantity to base unit
///
/// Base units:
/// - Volume: ml
/// - Weight: grams (g)
/// - Count: item
///
/// Unknown units are kept as-is and never merge with another unit.
pub fn normalize_unit(unit: &str, quantity: f64) -> (String, f64) {
    let normalized_unit = unit.trim().trim_end_matches('.').to_lowercase();

    match normalized_unit.as_str() {
        "cup" | "cups" => ("ml".to_owned(), quantity * 240.0),
        "tbsp" | "tablespoon" | "tablespoons" => ("ml".to_owned(), quantity * 15.0),
        "tsp" | "teaspoon" | "teaspoons" => ("ml".to_owned(), quantity * 5.0),
        "ml" | "milliliter" | "milliliters" => ("ml".to_owned(), quantity),
        "l" | "liter" | "liters" => ("ml".to_owned(), quantity * 1000.0),

        "g" | "gram" | "grams" => ("g".to_owned(), quantity),
        "mg" => ("g".to_owned(), quantity / 1000.0),
        "kg" | "kilogram" | "kilograms" => ("g".to_owned(), quantity * 1000.0),
        "oz" | "ounce" | "ounces" => ("g".to_owned(), quantity * 28.35),
        "lb" | "lbs" | "pound" | "pounds" => ("g".to_owned(), quantity * 453.59),

        "whole" | "item" | "items" | "piece" | "pieces" | "clove" | "cloves" | "" => {
            ("item".to_owned(), quantity)
        }

        other => (other.to_owned(), quantity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jardine_shared::recipe::{Ingredient, parse_ingredient};

    fn recipe(lines: &[&str]) -> RecipeIngredients {
        RecipeIngredients {
            title: "Test".to_owned(),
            ingredients: lines.iter().map(|l| parse_ingredient(l)).collect(),
        }
    }

    #[test]
    fn test_aggregate_same_ingredient_same_unit() {
        let result = aggregate_local(&[recipe(&["2 lbs chicken"]), recipe(&["1 lb Chicken"])]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "chicken");
        assert!((result[0].quantity.unwrap() - 1360.77).abs() < 0.1);
        assert_eq!(result[0].unit, "g");
    }

    #[test]
    fn test_aggregate_unit_conversion() {
        let result = aggregate_local(&[recipe(&["1 cup milk", "240 ml milk"])]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].quantity, Some(480.0));
        assert_eq!(result[0].unit, "ml");
    }

    #[test]
    fn test_aggregate_incompatible_units_kept_separate() {
        let result = aggregate_local(&[recipe(&["1 onion", "1 cup onion"])]);

        assert_eq!(result.len(), 2);

        let whole = result.iter().find(|i| i.unit == "item").unwrap();
        let cup = result.iter().find(|i| i.unit == "ml").unwrap();

        assert_eq!(whole.quantity, Some(1.0));
        assert_eq!(cup.quantity, Some(240.0));
    }

    #[test]
    fn test_aggregate_ambiguous_flagged() {
        let result = aggregate_local(&[recipe(&["salt", "1 pinch salt", "2 eggs"])]);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "eggs");
        assert!(!result[0].is_ambiguous);
        assert_eq!(result[1].name, "salt");
        assert!(result[1].is_ambiguous);
        assert_eq!(result[1].quantity, None);
    }

    #[test]
    fn test_aggregate_sorted_by_name() {
        let result = aggregate_local(&[recipe(&["1 zucchini", "2 apples", "100 g butter"])]);

        let names = result.iter().map(|i| i.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["apples", "butter", "zucchini"]);
    }

    #[test]
    fn test_aggregate_skips_blank_names() {
        let blank = RecipeIngredients {
            title: "Blank".to_owned(),
            ingredients: vec![Ingredient {
                quantity: Some(1.0),
                unit: None,
                name: "  ".to_owned(),
            }],
        };

        assert!(aggregate_local(&[blank]).is_empty());
    }

    #[test]
    fn test_normalize_unit() {
        assert_eq!(normalize_unit("tbsp", 1.0), ("ml".to_owned(), 15.0));
        assert_eq!(normalize_unit("kg", 1.0), ("g".to_owned(), 1000.0));
        assert_eq!(normalize_unit("clove", 3.0), ("item".to_owned(), 3.0));
        assert_eq!(normalize_unit("can", 2.0), ("can".to_owned(), 2.0));
    }

    #[test]
    fn test_into_shopping_item() {
        let item = ShoppingItem::from(AggregatedIngredient {
            name: "eggs".to_owned(),
            quantity: Some(6.0),
            unit: "item".to_owned(),
            is_ambiguous: false,
        });

        assert_eq!(item.unit, None);
        assert_eq!(item.quantity, Some(6.0));
    }
}
