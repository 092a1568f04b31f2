use jardine_mealplan::{Coordinator, Planner};
use jardine_shared::mealplan::PlannerState;
use jardine_shared::recipe::{Recipe, RecipeImporter};
use std::collections::HashSet;

use crate::{from_fields, recipe_id_for_url};

#[derive(Debug)]
pub struct ImportFailure {
    pub url: String,
    pub error: jardine_shared::Error,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub recipes: Vec<Recipe>,
    /// Urls already known to the planner or repeated in the batch.
    pub skipped: Vec<String>,
    pub failed: Vec<ImportFailure>,
}

impl ImportReport {
    /// Saves the imported recipes into the planner. Nothing is saved if
    /// one of them is rejected.
    pub fn commit(&self, planner: &mut Planner) -> jardine_shared::Result<usize> {
        for recipe in self.recipes.iter() {
            Planner::check_recipe(recipe)?;
        }

        for recipe in self.recipes.iter() {
            planner.upsert_recipe(recipe.clone())?;
        }

        Ok(self.recipes.len())
    }
}

fn is_known(state: &PlannerState, seen: &HashSet<String>, url: &str) -> bool {
    seen.contains(url)
        || state.find_recipe_by_url(url).is_some()
        || state.recipes.contains_key(&recipe_id_for_url(url))
}

/// Imports every url through `importer` without touching the state. A
/// failing url is recorded and the batch carries on.
pub async fn fetch_batch<I, S>(
    state: &PlannerState,
    importer: &dyn RecipeImporter,
    urls: I,
) -> ImportReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = ImportReport::default();
    let mut seen = HashSet::new();

    for url in urls {
        let url = url.as_ref().trim();
        if url.is_empty() {
            continue;
        }

        if is_known(state, &seen, url) {
            tracing::info!(url, "recipe already imported, skipping");
            report.skipped.push(url.to_owned());
            continue;
        }

        seen.insert(url.to_owned());

        let fields = match importer.import_recipe(url).await {
            Ok(fields) => fields,
            Err(error) => {
                tracing::warn!(url, error = %error, "recipe import failed");
                report.failed.push(ImportFailure {
                    url: url.to_owned(),
                    error,
                });
                continue;
            }
        };

        let recipe = from_fields(fields, url);

        let canonical = recipe.url.as_deref().filter(|canonical| *canonical != url);

        if let Some(canonical) = canonical {
            if is_known(state, &seen, canonical) {
                tracing::info!(url, canonical, "recipe already imported, skipping");
                report.skipped.push(url.to_owned());
                continue;
            }

            seen.insert(canonical.to_owned());
        }

        if let Err(error) = Planner::check_recipe(&recipe) {
            tracing::warn!(url, error = %error, "imported recipe rejected");
            report.failed.push(ImportFailure {
                url: url.to_owned(),
                error,
            });
            continue;
        }

        tracing::debug!(url, id = recipe.id, title = recipe.title, "recipe imported");
        report.recipes.push(recipe);
    }

    report
}

/// Imports the batch and saves the new recipes through the coordinator.
pub async fn import_batch<I, S>(
    coordinator: &mut Coordinator,
    importer: &dyn RecipeImporter,
    urls: I,
) -> jardine_shared::Result<ImportReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let report = fetch_batch(coordinator.planner(), importer, urls).await;

    if !report.recipes.is_empty() {
        coordinator.apply(|planner| report.commit(planner)).await?;
    }

    Ok(report)
}
