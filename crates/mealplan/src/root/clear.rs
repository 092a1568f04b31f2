impl super::Planner {
    pub fn clear_day(&mut self, week: usize, day: usize) -> jardine_shared::Result<()> {
        self.day_mut(week, day)?.clear();

        Ok(())
    }
}
