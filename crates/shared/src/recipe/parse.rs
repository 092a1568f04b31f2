use serde::{Deserialize, Deserializer};

use super::Ingredient;

const UNITS: &[(&str, &[&str])] = &[
    ("g", &["g", "gr", "gram", "grams", "gramme", "grammes"]),
    ("kg", &["kg", "kgs", "kilo", "kilos", "kilogram", "kilograms"]),
    ("mg", &["mg", "milligram", "milligrams"]),
    ("ml", &["ml", "milliliter", "milliliters", "millilitre", "millilitres"]),
    ("l", &["l", "liter", "liters", "litre", "litres"]),
    ("tsp", &["tsp", "tsps", "teaspoon", "teaspoons"]),
    ("tbsp", &["tbsp", "tbsps", "tbs", "tablespoon", "tablespoons"]),
    ("cup", &["cup", "cups"]),
    ("oz", &["oz", "ounce", "ounces"]),
    ("lb", &["lb", "lbs", "pound", "pounds"]),
    ("clove", &["clove", "cloves"]),
    ("pinch", &["pinch", "pinches"]),
    ("handful", &["handful", "handfuls"]),
    ("can", &["can", "cans"]),
    ("tin", &["tin", "tins"]),
    ("slice", &["slice", "slices"]),
    ("bunch", &["bunch", "bunches"]),
    ("sprig", &["sprig", "sprigs"]),
    ("pack", &["pack", "packs", "packet", "packets"]),
    ("stick", &["stick", "sticks"]),
    ("piece", &["piece", "pieces"]),
];

/// Maps a unit spelling (`Tablespoons`, `tbsp.`, `grams`) to its short form.
pub fn canonical_unit(value: &str) -> Option<&'static str> {
    let value = value.trim().trim_end_matches('.').to_lowercase();

    UNITS
        .iter()
        .find(|(_, aliases)| aliases.contains(&value.as_str()))
        .map(|(unit, _)| *unit)
}

fn vulgar(c: char) -> Option<f64> {
    let value = match c {
        '½' => 0.5,
        '¼' => 0.25,
        '¾' => 0.75,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '⅛' => 0.125,
        _ => return None,
    };

    Some(value)
}

/// Reads an amount token: `2`, `1.5`, `1,5`, `1/2`, `½`, `1½`, `1-2`.
/// Ranges resolve to their lower bound.
pub fn parse_amount(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    if let Some((low, _)) = token.split_once(['-', '–']) {
        return parse_amount(low);
    }

    if let Some((num, den)) = token.split_once('/') {
        let num = num.trim().parse::<f64>().ok()?;
        let den = den.trim().parse::<f64>().ok()?;

        return (den != 0.0)
            .then(|| num / den)
            .filter(|v| v.is_finite() && *v >= 0.0);
    }

    let mut chars = token.chars();
    if let Some(fraction) = chars.next_back().and_then(vulgar) {
        let whole = chars.as_str();
        if whole.is_empty() {
            return Some(fraction);
        }

        return whole.parse::<u32>().ok().map(|w| w as f64 + fraction);
    }

    token
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ',' | '/' | '-' | '–') || vulgar(c).is_some()
}

/// Splits a free-text ingredient line into quantity, unit and name.
///
/// Lines without a leading amount keep the whole text as the name.
pub fn parse_ingredient(line: &str) -> Ingredient {
    let line = line.trim();
    let fallback = || Ingredient {
        quantity: None,
        unit: None,
        name: line.to_owned(),
    };

    let tokens = line.split_whitespace().collect::<Vec<_>>();
    let Some(first) = tokens.first() else {
        return fallback();
    };

    let mut rest = &tokens[1..];
    let mut unit = None;

    let quantity = match parse_amount(first) {
        Some(quantity) => quantity,
        None => {
            let split = first
                .char_indices()
                .find(|(_, c)| !is_amount_char(*c))
                .map(|(i, _)| i)
                .unwrap_or(first.len());
            let (amount, suffix) = first.split_at(split);

            let Some(quantity) = parse_amount(amount) else {
                return fallback();
            };

            let Some(glued) = canonical_unit(suffix) else {
                return fallback();
            };

            unit = Some(glued.to_owned());
            quantity
        }
    };

    let mut quantity = quantity;

    let fraction = rest
        .first()
        .filter(|_| unit.is_none() && quantity.fract() == 0.0)
        .filter(|next| next.contains('/') || next.chars().all(|c| vulgar(c).is_some()))
        .and_then(|next| parse_amount(next))
        .filter(|fraction| *fraction < 1.0);

    if let Some(fraction) = fraction {
        quantity += fraction;
        rest = &rest[1..];
    }

    if unit.is_none() {
        if let Some(found) = rest.first().and_then(|next| canonical_unit(next)) {
            unit = Some(found.to_owned());
            rest = &rest[1..];
        }
    }

    if rest.first().is_some_and(|t| t.eq_ignore_ascii_case("of")) {
        rest = &rest[1..];
    }

    let name = rest.join(" ");
    if name.is_empty() {
        return fallback();
    }

    Ingredient {
        quantity: Some(quantity),
        unit,
        name,
    }
}

/// Splits a free-text instruction block into steps, one per non-empty line.
pub fn split_steps(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Number(f64),
    Text(String),
}

/// Accepts a quantity written as a number, a numeric string or null.
pub fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let quantity = match Option::<RawQuantity>::deserialize(deserializer)? {
        Some(RawQuantity::Number(value)) => Some(value),
        Some(RawQuantity::Text(text)) => {
            let mut total = 0.0;
            let mut found = false;
            for token in text.split_whitespace() {
                if let Some(value) = parse_amount(token) {
                    total += value;
                    found = true;
                }
            }
            found.then_some(total)
        }
        None => None,
    };

    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("2"), Some(2.0));
        assert_eq!(parse_amount("1.5"), Some(1.5));
        assert_eq!(parse_amount("1,5"), Some(1.5));
        assert_eq!(parse_amount("3/4"), Some(0.75));
        assert_eq!(parse_amount("½"), Some(0.5));
        assert_eq!(parse_amount("1½"), Some(1.5));
        assert_eq!(parse_amount("2-3"), Some(2.0));
        assert_eq!(parse_amount("1/0"), None);
        assert_eq!(parse_amount("1e308/1e-308"), None);
        assert_eq!(parse_amount("salt"), None);
    }

    #[test]
    fn test_parse_ingredient_with_unit() {
        let ingredient = parse_ingredient("200 g spaghetti");
        assert_eq!(ingredient.quantity, Some(200.0));
        assert_eq!(ingredient.unit.as_deref(), Some("g"));
        assert_eq!(ingredient.name, "spaghetti");

        let ingredient = parse_ingredient("2 Tablespoons of olive oil");
        assert_eq!(ingredient.quantity, Some(2.0));
        assert_eq!(ingredient.unit.as_deref(), Some("tbsp"));
        assert_eq!(ingredient.name, "olive oil");
    }

    #[test]
    fn test_parse_ingredient_glued_unit() {
        let ingredient = parse_ingredient("500ml whole milk");
        assert_eq!(ingredient.quantity, Some(500.0));
        assert_eq!(ingredient.unit.as_deref(), Some("ml"));
        assert_eq!(ingredient.name, "whole milk");
    }

    #[test]
    fn test_parse_ingredient_mixed_fraction() {
        let ingredient = parse_ingredient("1 1/2 cups flour");
        assert_eq!(ingredient.quantity, Some(1.5));
        assert_eq!(ingredient.unit.as_deref(), Some("cup"));
        assert_eq!(ingredient.name, "flour");

        let ingredient = parse_ingredient("¾ cup sugar");
        assert_eq!(ingredient.quantity, Some(0.75));
    }

    #[test]
    fn test_parse_ingredient_without_unit() {
        let ingredient = parse_ingredient("3 eggs");
        assert_eq!(ingredient.quantity, Some(3.0));
        assert_eq!(ingredient.unit, None);
        assert_eq!(ingredient.name, "eggs");
    }

    #[test]
    fn test_parse_ingredient_plain_text() {
        let ingredient = parse_ingredient("  salt and pepper to taste ");
        assert_eq!(ingredient.quantity, None);
        assert_eq!(ingredient.unit, None);
        assert_eq!(ingredient.name, "salt and pepper to taste");

        assert_eq!(parse_ingredient("200g").name, "200g");
        assert_eq!(parse_ingredient("").name, "");
    }
}
