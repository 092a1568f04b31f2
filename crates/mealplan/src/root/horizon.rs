impl super::Planner {
    /// Appends weeks until at least `min_weeks` exist, returns how many were added.
    pub fn ensure_horizon(&mut self, min_weeks: usize) -> usize {
        let mut added = 0;

        while self.state.weeks.len() < min_weeks {
            let week = crate::next_week(&self.state.weeks);
            tracing::debug!(id = week.id, label = week.label, "week appended");

            self.state.weeks.push(week);
            added += 1;
        }

        added
    }
}
