use jardine_shared::recipe::Ingredient;

/// Units that name a vague amount rather than a measure.
const VAGUE_UNITS: &[&str] = &[
    "pinch", "dash", "handful", "sprinkle", "splash", "some", "taste",
];

/// An ingredient line whose amount can't be added up: no quantity, a
/// vague unit, or a "to taste" name.
pub fn is_ambiguous(ingredient: &Ingredient) -> bool {
    if ingredient.quantity.is_none() {
        return true;
    }

    let vague_unit = ingredient
        .unit
        .as_deref()
        .map(|unit| unit.trim().to_lowercase())
        .is_some_and(|unit| VAGUE_UNITS.contains(&unit.as_str()));

    if vague_unit {
        return true;
    }

    ingredient.name.to_lowercase().ends_with("to taste")
}
