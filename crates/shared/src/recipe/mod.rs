mod parse;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::Validate;

pub use parse::*;

#[derive(Serialize, Deserialize, Validate, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[validate(length(min = 1, message = "Recipe id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[serde(default, deserialize_with = "non_blank")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "lines")]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub disliked: bool,
}

impl Recipe {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            image_url: None,
            ingredients: vec![],
            instructions: vec![],
            disliked: false,
        }
    }

    /// Puts the recipe in the shape a stored snapshot reads back as.
    pub fn normalized(self) -> Self {
        Self {
            url: non_blank_text(self.url),
            image_url: non_blank_text(self.image_url),
            ingredients: self
                .ingredients
                .into_iter()
                .map(Ingredient::normalized)
                .collect(),
            instructions: self
                .instructions
                .into_iter()
                .map(|line| line.trim().to_owned())
                .filter(|line| !line.is_empty())
                .collect(),
            ..self
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(from = "IngredientLine")]
pub struct Ingredient {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub name: String,
}

impl Ingredient {
    /// Trims the name and maps the unit to its short form.
    pub fn normalized(self) -> Self {
        let unit = non_blank_text(self.unit)
            .map(|u| canonical_unit(&u).map(str::to_owned).unwrap_or(u));

        Ingredient {
            quantity: self.quantity.filter(|q| q.is_finite()),
            unit,
            name: self.name.trim().to_owned(),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(quantity) = self.quantity {
            if quantity.fract() == 0.0 {
                write!(f, "{} ", quantity as i64)?;
            } else {
                write!(f, "{quantity} ")?;
            }
        }

        if let Some(unit) = &self.unit {
            write!(f, "{unit} ")?;
        }

        f.write_str(&self.name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IngredientLine {
    Text(String),
    Structured {
        #[serde(default, deserialize_with = "deserialize_quantity")]
        quantity: Option<f64>,
        #[serde(default)]
        unit: Option<String>,
        name: String,
    },
}

impl From<IngredientLine> for Ingredient {
    fn from(value: IngredientLine) -> Self {
        match value {
            IngredientLine::Text(line) => parse_ingredient(&line),
            IngredientLine::Structured {
                quantity,
                unit,
                name,
            } => Ingredient {
                quantity,
                unit,
                name,
            }
            .normalized(),
        }
    }
}

/// What the import function returns for one page.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFields {
    #[serde(default, deserialize_with = "non_blank")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "lines")]
    pub ingredients_raw: Vec<String>,
    #[serde(default, deserialize_with = "lines")]
    pub instructions: Vec<String>,
}

#[async_trait::async_trait]
pub trait RecipeImporter: Send + Sync {
    async fn import_recipe(&self, url: &str) -> crate::Result<RecipeFields>;
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_blank_text(Option::<String>::deserialize(deserializer)?))
}

fn non_blank_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lines {
    Block(String),
    List(Vec<String>),
}

fn lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let lines = match Option::<Lines>::deserialize(deserializer)? {
        None => vec![],
        Some(Lines::Block(text)) => split_steps(&text),
        Some(Lines::List(list)) => list
            .into_iter()
            .map(|line| line.trim().to_owned())
            .filter(|line| !line.is_empty())
            .collect(),
    };

    Ok(lines)
}
