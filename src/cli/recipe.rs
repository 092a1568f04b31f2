use std::io::Write;

use jardine_mealplan::Planner;
use jardine_recipe::CreateInput;
use jardine_shared::recipe::Recipe;

use super::Session;

/// Looks a recipe up by id, then by title (case-insensitive).
pub fn find_recipe<'a>(planner: &'a Planner, query: &str) -> anyhow::Result<&'a Recipe> {
    let query = query.trim();

    if let Some(recipe) = planner.recipe(query) {
        return Ok(recipe);
    }

    let lower = query.to_lowercase();
    let matches = planner
        .recipes
        .values()
        .filter(|r| r.title.to_lowercase() == lower)
        .collect::<Vec<_>>();

    match matches.as_slice() {
        [recipe] => Ok(*recipe),
        [] => anyhow::bail!("no recipe matches `{query}`"),
        _ => anyhow::bail!(
            "`{query}` matches {} recipes, use the id instead",
            matches.len()
        ),
    }
}

pub fn list(session: &Session, out: &mut impl Write) -> anyhow::Result<()> {
    let planner = session.coordinator.planner();

    if planner.recipes.is_empty() {
        writeln!(out, "No recipes yet.")?;
        return Ok(());
    }

    let mut recipes = planner.recipes.values().collect::<Vec<_>>();
    recipes.sort_by_key(|r| r.title.to_lowercase());

    for recipe in recipes {
        let mut line = format!("{:<30} {}", recipe.id, recipe.title);
        if recipe.disliked {
            line.push_str(" [disliked]");
        }
        if let Some(url) = &recipe.url {
            line.push_str(&format!("  {url}"));
        }

        writeln!(out, "{line}")?;
    }

    Ok(())
}

pub async fn add(
    session: &mut Session,
    input: CreateInput,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let recipe = jardine_recipe::create(input)?;
    let id = recipe.id.to_owned();

    session
        .coordinator
        .apply(|planner| planner.upsert_recipe(recipe))
        .await?;

    writeln!(out, "Added {id}")?;

    Ok(())
}

pub async fn import(
    session: &mut Session,
    urls: &[String],
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let Some(client) = session.client.clone() else {
        anyhow::bail!("recipe import needs the remote backend, set remote.enabled");
    };

    let report = jardine_recipe::import_batch(&mut session.coordinator, &client, urls).await?;

    writeln!(out, "Imported {} recipe(s)", report.recipes.len())?;
    for recipe in report.recipes.iter() {
        writeln!(out, "  + {} ({})", recipe.title, recipe.id)?;
    }
    for url in report.skipped.iter() {
        writeln!(out, "  = {url} already in the library")?;
    }
    for failure in report.failed.iter() {
        writeln!(out, "  ! {}: {}", failure.url, failure.error)?;
    }

    Ok(())
}

pub async fn remove(
    session: &mut Session,
    query: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let id = find_recipe(session.coordinator.planner(), query)?.id.to_owned();

    let recipe = session
        .coordinator
        .apply(|planner| planner.remove_recipe(&id))
        .await?;

    writeln!(out, "Removed {}", recipe.title)?;

    Ok(())
}

pub async fn dislike(
    session: &mut Session,
    query: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let id = find_recipe(session.coordinator.planner(), query)?.id.to_owned();

    let disliked = session
        .coordinator
        .apply(|planner| planner.toggle_disliked(&id))
        .await?;

    let title = find_recipe(session.coordinator.planner(), &id)?.title.to_owned();
    if disliked {
        writeln!(out, "{title} marked as disliked")?;
    } else {
        writeln!(out, "{title} no longer disliked")?;
    }

    Ok(())
}
