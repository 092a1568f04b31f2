impl super::Planner {
    /// Moves the week at `from` so it ends up at `to`, shifting the others.
    pub fn reorder_weeks(&mut self, from: usize, to: usize) -> jardine_shared::Result<()> {
        self.week(from)?;
        self.week(to)?;

        if from == to {
            return Ok(());
        }

        let week = self.state.weeks.remove(from);
        self.state.weeks.insert(to, week);

        tracing::debug!(from, to, "week moved");

        Ok(())
    }
}
