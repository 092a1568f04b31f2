use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum SpecialMode {
    #[default]
    None,
    GrannyDay,
    EatingOut,
}

/// One slot of a week. A day never holds a recipe and a special mode at
/// the same time; the fields are only reachable through the methods below.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", from = "DayRecord")]
pub struct Day {
    id: String,
    name: String,
    recipe_id: Option<String>,
    special_mode: SpecialMode,
}

impl Day {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            recipe_id: None,
            special_mode: SpecialMode::None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn recipe_id(&self) -> Option<&str> {
        self.recipe_id.as_deref()
    }

    pub fn special_mode(&self) -> SpecialMode {
        self.special_mode
    }

    pub fn is_empty(&self) -> bool {
        self.recipe_id.is_none() && self.special_mode == SpecialMode::None
    }

    pub fn assign(&mut self, recipe_id: impl Into<String>) {
        self.recipe_id = Some(recipe_id.into());
        self.special_mode = SpecialMode::None;
    }

    pub fn clear(&mut self) {
        self.recipe_id = None;
        self.special_mode = SpecialMode::None;
    }

    pub fn set_special_mode(&mut self, mode: SpecialMode) {
        if mode != SpecialMode::None {
            self.recipe_id = None;
        }

        self.special_mode = mode;
    }

    /// Exchanges what is planned on both days, slot id and name stay put.
    pub fn swap_content(&mut self, other: &mut Day) {
        std::mem::swap(&mut self.recipe_id, &mut other.recipe_id);
        std::mem::swap(&mut self.special_mode, &mut other.special_mode);
    }

    /// Drops the reference to `recipe_id`, returns whether it was set.
    pub fn unlink(&mut self, recipe_id: &str) -> bool {
        if self.recipe_id.as_deref() != Some(recipe_id) {
            return false;
        }

        self.recipe_id = None;

        true
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayRecord {
    id: String,
    name: String,
    #[serde(default)]
    recipe_id: Option<String>,
    #[serde(default)]
    special_mode: Option<SpecialMode>,
    #[serde(default)]
    granny_day: bool,
}

impl From<DayRecord> for Day {
    fn from(value: DayRecord) -> Self {
        let special_mode = match (value.special_mode, value.granny_day) {
            (Some(mode), _) => mode,
            (None, true) => SpecialMode::GrannyDay,
            (None, false) => SpecialMode::None,
        };

        let recipe_id = value.recipe_id.filter(|id| !id.trim().is_empty());

        let recipe_id = match (recipe_id, special_mode) {
            (Some(id), mode) if mode != SpecialMode::None => {
                tracing::warn!(
                    day = value.id,
                    recipe_id = id,
                    mode = mode.as_ref(),
                    "day has both a recipe and a special mode, keeping the mode"
                );

                None
            }
            (id, _) => id,
        };

        Self {
            id: value.id,
            name: value.name,
            recipe_id,
            special_mode,
        }
    }
}
