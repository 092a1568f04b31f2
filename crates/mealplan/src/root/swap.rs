impl super::Planner {
    /// Exchanges what is planned on two days of the same week. The slots
    /// themselves keep their id and weekday name.
    pub fn swap_days(&mut self, week: usize, a: usize, b: usize) -> jardine_shared::Result<()> {
        self.day(week, a)?;
        self.day(week, b)?;

        if a == b {
            return Ok(());
        }

        let (low, high) = (a.min(b), a.max(b));
        let days = self.week_mut(week)?.days_mut();
        let (left, right) = days.split_at_mut(high);
        left[low].swap_content(&mut right[0]);

        Ok(())
    }
}
