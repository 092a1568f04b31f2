use jardine_shared::mealplan::SpecialMode;

impl super::Planner {
    pub fn set_special_mode(
        &mut self,
        week: usize,
        day: usize,
        mode: SpecialMode,
    ) -> jardine_shared::Result<()> {
        self.day_mut(week, day)?.set_special_mode(mode);

        tracing::debug!(week, day, mode = mode.as_ref(), "special mode set");

        Ok(())
    }

    /// Flips a day between granny day and nothing, returns the new mode.
    pub fn toggle_granny_day(
        &mut self,
        week: usize,
        day: usize,
    ) -> jardine_shared::Result<SpecialMode> {
        let target = self.day_mut(week, day)?;

        let mode = match target.special_mode() {
            SpecialMode::GrannyDay => SpecialMode::None,
            _ => SpecialMode::GrannyDay,
        };

        target.set_special_mode(mode);

        Ok(mode)
    }
}
