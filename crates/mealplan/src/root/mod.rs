mod assign;
mod clear;
mod horizon;
mod recipe;
mod reorder;
mod special_mode;
mod swap;

use jardine_shared::mealplan::{DAYS_PER_WEEK, Day, PlannerState, Week};
use jardine_shared::recipe::Recipe;
use std::fmt;
use std::ops::Deref;

/// In-memory owner of the planner state. Every mutation is validated up
/// front so a failed call leaves the state untouched.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    state: PlannerState,
}

impl Deref for Planner {
    type Target = PlannerState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSummary {
    pub planned: usize,
    pub total: usize,
}

impl fmt::Display for WeekSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} days planned", self.planned, self.total)
    }
}

impl Planner {
    pub fn new(state: PlannerState) -> Self {
        Self { state }
    }

    pub fn snapshot(&self) -> PlannerState {
        self.state.clone()
    }

    pub fn into_inner(self) -> PlannerState {
        self.state
    }

    pub fn replace(&mut self, state: PlannerState) {
        tracing::debug!(weeks = state.weeks.len(), recipes = state.recipes.len(), "planner state replaced");

        self.state = state;
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.state.recipes.get(id)
    }

    pub fn week(&self, week: usize) -> jardine_shared::Result<&Week> {
        match self.state.weeks.get(week) {
            Some(w) => Ok(w),
            None => jardine_shared::not_found!("week {}", week + 1),
        }
    }

    pub fn day(&self, week: usize, day: usize) -> jardine_shared::Result<&Day> {
        match self.week(week)?.days().get(day) {
            Some(d) => Ok(d),
            None => jardine_shared::not_found!("day {} of week {}", day + 1, week + 1),
        }
    }

    pub fn week_summary(&self, week: usize) -> jardine_shared::Result<WeekSummary> {
        let week = self.week(week)?;

        Ok(WeekSummary {
            planned: week.planned_count(),
            total: DAYS_PER_WEEK,
        })
    }

    fn week_mut(&mut self, week: usize) -> jardine_shared::Result<&mut Week> {
        match self.state.weeks.get_mut(week) {
            Some(w) => Ok(w),
            None => jardine_shared::not_found!("week {}", week + 1),
        }
    }

    fn day_mut(&mut self, week: usize, day: usize) -> jardine_shared::Result<&mut Day> {
        match self.week_mut(week)?.days_mut().get_mut(day) {
            Some(d) => Ok(d),
            None => jardine_shared::not_found!("day {} of week {}", day + 1, week + 1),
        }
    }
}
