use jardine_shared::mealplan::{DayView, PlannerState};
use jardine_shared::shopping::{
    IngredientAggregator, IngredientList, RecipeIngredients, ShoppingItem,
};

use crate::{aggregate_local, format_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Nothing planned, no aggregation was attempted.
    Empty,
    Remote,
    Local,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingList {
    pub list: IngredientList,
    pub source: Source,
}

/// Recipes planned on the given week, in day order. Empty, special and
/// dangling days are skipped.
pub fn week_recipes(
    state: &PlannerState,
    week: usize,
) -> jardine_shared::Result<Vec<RecipeIngredients>> {
    let Some(week) = state.weeks.get(week) else {
        jardine_shared::not_found!("week {}", week + 1);
    };

    let recipes = week
        .days()
        .iter()
        .filter_map(|day| match state.resolve(day) {
            DayView::Recipe(recipe) => Some(RecipeIngredients {
                title: recipe.title.to_owned(),
                ingredients: recipe.ingredients.to_vec(),
            }),
            _ => None,
        })
        .collect();

    Ok(recipes)
}

fn local_list(recipes: &[RecipeIngredients]) -> ShoppingList {
    let items = aggregate_local(recipes)
        .into_iter()
        .map(ShoppingItem::from)
        .collect();

    ShoppingList {
        list: IngredientList::Items(items),
        source: Source::Local,
    }
}

/// Builds the shopping list for `recipes`: the aggregation function first,
/// then the local heuristic when it fails and `fallback` is on.
pub async fn shopping_list(
    aggregator: Option<&dyn IngredientAggregator>,
    recipes: &[RecipeIngredients],
    fallback: bool,
) -> jardine_shared::Result<ShoppingList> {
    if recipes.iter().all(|r| r.ingredients.is_empty()) {
        return Ok(ShoppingList {
            list: IngredientList::Items(vec![]),
            source: Source::Empty,
        });
    }

    let Some(aggregator) = aggregator else {
        return Ok(local_list(recipes));
    };

    match aggregator.aggregate_ingredients(recipes).await {
        Ok(list) => Ok(ShoppingList {
            list,
            source: Source::Remote,
        }),
        Err(err) if fallback => {
            tracing::warn!(error = %err, "ingredient aggregation failed, using local list");
            Ok(local_list(recipes))
        }
        Err(err) => Err(err),
    }
}

/// One line of the list, e.g. `spaghetti: 400 g` or `salt`.
pub fn format_item(item: &ShoppingItem) -> String {
    match item.quantity {
        Some(quantity) => format!(
            "{}: {}",
            item.name,
            format_amount(quantity, item.unit.as_deref())
        ),
        None => item.name.to_owned(),
    }
}
