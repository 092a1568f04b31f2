impl super::Planner {
    pub fn assign_recipe(
        &mut self,
        week: usize,
        day: usize,
        recipe_id: &str,
    ) -> jardine_shared::Result<()> {
        if !self.recipes.contains_key(recipe_id) {
            jardine_shared::not_found!("recipe {recipe_id}");
        }

        self.day_mut(week, day)?.assign(recipe_id);

        tracing::debug!(week, day, recipe_id, "recipe assigned");

        Ok(())
    }
}
