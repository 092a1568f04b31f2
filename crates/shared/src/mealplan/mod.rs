mod day;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::recipe::Recipe;

pub use day::*;

pub const DAYS_PER_WEEK: usize = 7;
pub const DEFAULT_WEEKS: usize = 4;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub id: String,
    pub label: String,
    /// Unix timestamp of the Monday 00:00 UTC this week starts on.
    #[serde(default)]
    pub start: Option<u64>,
    days: Vec<Day>,
}

impl Week {
    /// Builds a week of seven empty days, Monday first. Day ids are
    /// `{day_prefix}-{index}`.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        start: Option<u64>,
        day_prefix: &str,
    ) -> Self {
        let days = (0..DAYS_PER_WEEK)
            .map(|index| Day::new(format!("{day_prefix}-{index}"), weekday_name(index)))
            .collect();

        Self {
            id: id.into(),
            label: label.into(),
            start,
            days,
        }
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn days_mut(&mut self) -> &mut [Day] {
        &mut self.days
    }

    pub fn planned_count(&self) -> usize {
        self.days.iter().filter(|d| !d.is_empty()).count()
    }
}

pub fn weekday_name(index: usize) -> String {
    time::Weekday::Monday
        .nth_next((index % DAYS_PER_WEEK) as u8)
        .to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlannerState {
    pub weeks: Vec<Week>,
    pub recipes: BTreeMap<String, Recipe>,
}

impl Default for PlannerState {
    fn default() -> Self {
        Self::undated(DEFAULT_WEEKS)
    }
}

/// What a day currently shows once its recipe reference is resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayView<'a> {
    Empty,
    Recipe(&'a Recipe),
    Missing(&'a str),
    Special(SpecialMode),
}

impl PlannerState {
    /// Fresh planner with `weeks` undated weeks labelled `Week 1`, `Week 2`, ...
    pub fn undated(weeks: usize) -> Self {
        let weeks = (0..weeks.max(1))
            .map(|w| {
                Week::new(
                    format!("week-{}", w + 1),
                    format!("Week {}", w + 1),
                    None,
                    &w.to_string(),
                )
            })
            .collect();

        Self {
            weeks,
            recipes: BTreeMap::new(),
        }
    }

    /// Parses and validates a serialized snapshot.
    pub fn from_json(value: &str) -> crate::Result<Self> {
        let state: Self = serde_json::from_str(value)?;
        state.validate()?;

        Ok(state)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.weeks.is_empty() {
            crate::invalid!("snapshot has no weeks");
        }

        for week in self.weeks.iter() {
            if week.days.len() != DAYS_PER_WEEK {
                crate::invalid!(
                    "week {} has {} days, expected {DAYS_PER_WEEK}",
                    week.id,
                    week.days.len()
                );
            }
        }

        Ok(())
    }

    pub fn resolve<'a>(&'a self, day: &'a Day) -> DayView<'a> {
        if day.special_mode() != SpecialMode::None {
            return DayView::Special(day.special_mode());
        }

        match day.recipe_id() {
            None => DayView::Empty,
            Some(id) => match self.recipes.get(id) {
                Some(recipe) => DayView::Recipe(recipe),
                None => DayView::Missing(id),
            },
        }
    }

    pub fn find_recipe_by_url(&self, url: &str) -> Option<&Recipe> {
        let url = url.trim();
        self.recipes
            .values()
            .find(|r| r.url.as_deref().map(str::trim) == Some(url))
    }
}
