use jardine_shared::recipe::Recipe;
use validator::Validate;

impl super::Planner {
    /// Rejects a recipe `upsert_recipe` would refuse, without touching the state.
    pub fn check_recipe(recipe: &Recipe) -> jardine_shared::Result<()> {
        if recipe.id.trim().is_empty() {
            jardine_shared::invalid!("recipe id must not be blank");
        }

        if recipe.title.trim().is_empty() {
            jardine_shared::invalid!("recipe title must not be blank");
        }

        recipe.validate()?;

        Ok(())
    }

    /// Inserts the recipe, or replaces the one with the same id.
    pub fn upsert_recipe(&mut self, recipe: Recipe) -> jardine_shared::Result<()> {
        let recipe = recipe.normalized();

        Self::check_recipe(&recipe)?;

        tracing::debug!(id = recipe.id, title = recipe.title, "recipe saved");

        self.state.recipes.insert(recipe.id.to_owned(), recipe);

        Ok(())
    }

    /// Deletes the recipe and clears every day that pointed at it.
    pub fn remove_recipe(&mut self, id: &str) -> jardine_shared::Result<Recipe> {
        let Some(recipe) = self.state.recipes.remove(id) else {
            jardine_shared::not_found!("recipe {id}");
        };

        let cleared = self
            .state
            .weeks
            .iter_mut()
            .flat_map(|w| w.days_mut().iter_mut())
            .filter_map(|d| d.unlink(id).then_some(()))
            .count();

        tracing::debug!(id, cleared, "recipe removed");

        Ok(recipe)
    }

    /// Flips the disliked flag, returns the new value.
    pub fn toggle_disliked(&mut self, id: &str) -> jardine_shared::Result<bool> {
        let Some(recipe) = self.state.recipes.get_mut(id) else {
            jardine_shared::not_found!("recipe {id}");
        };

        recipe.disliked = !recipe.disliked;

        Ok(recipe.disliked)
    }
}
