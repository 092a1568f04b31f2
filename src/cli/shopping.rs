use std::io::Write;

use jardine_shared::shopping::{IngredientAggregator, IngredientList};
use jardine_shopping::{Source, format_item, shopping_list, week_recipes};

use super::Session;

pub async fn shopping(
    session: &Session,
    week: usize,
    local: bool,
    fallback: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let recipes = week_recipes(session.coordinator.planner(), week)?;

    let aggregator = session
        .client
        .as_ref()
        .filter(|_| !local)
        .map(|client| client as &dyn IngredientAggregator);

    let list = shopping_list(aggregator, &recipes, fallback).await?;

    if list.source == Source::Empty {
        writeln!(out, "No recipes for this week yet.")?;
        return Ok(());
    }

    if list.source == Source::Local && aggregator.is_some() {
        writeln!(out, "(aggregation unavailable, local estimate)")?;
    }

    match list.list {
        IngredientList::Items(items) => {
            for item in items.iter() {
                writeln!(out, "- {}", format_item(item))?;
            }
        }
        IngredientList::Text(text) => writeln!(out, "{}", text.trim())?,
    }

    Ok(())
}
