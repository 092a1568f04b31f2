use jardine_shared::recipe::{Recipe, RecipeFields, parse_ingredient, split_steps};
use validator::Validate;

use crate::{new_recipe_id, recipe_id_for_url};

pub const DEFAULT_TITLE: &str = "New recipe";

#[derive(Validate, Clone, Default)]
pub struct CreateInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

/// Builds a recipe typed in by hand. Recipes with a url get the same id
/// an import of that url would.
pub fn create(input: CreateInput) -> jardine_shared::Result<Recipe> {
    input.validate()?;

    let title = input.title.trim();
    if title.is_empty() {
        jardine_shared::invalid!("recipe title must not be blank");
    }

    let url = input
        .url
        .map(|u| u.trim().to_owned())
        .filter(|u| !u.is_empty());

    let id = match url.as_deref() {
        Some(url) => recipe_id_for_url(url),
        None => new_recipe_id(),
    };

    Ok(Recipe {
        id,
        title: title.to_owned(),
        url,
        image_url: input.image_url,
        ingredients: input
            .ingredients
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(parse_ingredient)
            .collect(),
        instructions: split_steps(&input.instructions),
        disliked: false,
    }
    .normalized())
}

/// Turns what the import function returned for `requested_url` into a recipe.
pub fn from_fields(fields: RecipeFields, requested_url: &str) -> Recipe {
    let url = fields.url.unwrap_or_else(|| requested_url.trim().to_owned());

    let ingredients = if fields.ingredients.is_empty() {
        fields
            .ingredients_raw
            .iter()
            .map(|line| parse_ingredient(line))
            .collect()
    } else {
        fields.ingredients
    };

    Recipe {
        id: recipe_id_for_url(&url),
        title: fields.title.unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
        url: Some(url),
        image_url: fields.image_url,
        ingredients,
        instructions: fields.instructions,
        disliked: false,
    }
    .normalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_manual_recipe() {
        let recipe = create(CreateInput {
            title: " Pancakes ".to_owned(),
            ingredients: vec!["2 eggs".to_owned(), "".to_owned(), "250 ml milk".to_owned()],
            instructions: "Whisk\n\nFry".to_owned(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(recipe.title, "Pancakes");
        assert!(recipe.id.starts_with("r_"));
        assert_eq!(recipe.url, None);
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[1].unit.as_deref(), Some("ml"));
        assert_eq!(recipe.instructions, vec!["Whisk", "Fry"]);
    }

    #[test]
    fn test_create_with_url_uses_url_id() {
        let recipe = create(CreateInput {
            title: "Pasta".to_owned(),
            url: Some("https://example.com/pasta".to_owned()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(recipe.id, recipe_id_for_url("https://example.com/pasta"));
    }

    #[test]
    fn test_create_rejects_bad_input() {
        assert!(create(CreateInput::default()).unwrap_err().is_invalid_input());

        let err = create(CreateInput {
            title: "   ".to_owned(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.is_invalid_input());

        let err = create(CreateInput {
            title: "Soup".to_owned(),
            url: Some("not a url".to_owned()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_from_fields_defaults() {
        let fields = RecipeFields {
            ingredients_raw: vec!["1 onion".to_owned()],
            ..Default::default()
        };

        let recipe = from_fields(fields, " https://example.com/x ");

        assert_eq!(recipe.title, DEFAULT_TITLE);
        assert_eq!(recipe.url.as_deref(), Some("https://example.com/x"));
        assert_eq!(recipe.id, recipe_id_for_url("https://example.com/x"));
        assert_eq!(recipe.ingredients[0].name, "onion");
        assert!(!recipe.disliked);
    }
}
