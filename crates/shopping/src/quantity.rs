use fraction::Fraction;

fn to_f64(fraction: Fraction) -> f64 {
    match (fraction.numer(), fraction.denom()) {
        (Some(numer), Some(denom)) if *denom != 0 => *numer as f64 / *denom as f64,
        _ => 0.0,
    }
}

/// Round a quantity to a practical cooking value
///
/// Rounding rules:
/// - < 1: nearest 1/4, 1/3 or 1/2
/// - 1-10: nearest 1/2
/// - > 10: nearest whole number
pub fn round_to_practical_value(value: f64) -> Fraction {
    let value = value.max(0.0);

    if value < 1.0 {
        let quarters = (value * 4.0).round();
        let thirds = (value * 3.0).round();
        let halves = (value * 2.0).round();

        let diff_quarters = (value - quarters / 4.0).abs();
        let diff_thirds = (value - thirds / 3.0).abs();
        let diff_halves = (value - halves / 2.0).abs();

        if diff_quarters <= diff_thirds && diff_quarters <= diff_halves {
            Fraction::new(quarters as u64, 4u64)
        } else if diff_thirds <= diff_halves {
            Fraction::new(thirds as u64, 3u64)
        } else {
            Fraction::new(halves as u64, 2u64)
        }
    } else if value < 10.0 {
        Fraction::new((value * 2.0).round() as u64, 2u64)
    } else {
        Fraction::new(value.round() as u64, 1u64)
    }
}

/// Formats a fraction as `2`, `1/2` or `1 1/2`.
pub fn format_fraction(fraction: Fraction) -> String {
    let (Some(numer), Some(denom)) = (fraction.numer(), fraction.denom()) else {
        return "0".to_owned();
    };

    let (numer, denom) = (*numer, *denom);

    if denom == 1 {
        return numer.to_string();
    }

    if numer >= denom {
        let whole = numer / denom;
        let remainder = numer % denom;

        if remainder == 0 {
            whole.to_string()
        } else {
            format!("{whole} {remainder}/{denom}")
        }
    } else {
        format!("{numer}/{denom}")
    }
}

/// Practical rounding then mixed-fraction rendering.
pub fn format_quantity(value: f64) -> String {
    let rounded = round_to_practical_value(value);

    if to_f64(rounded) == 0.0 && value > 0.0 {
        return format_fraction(Fraction::new(1u64, 4u64));
    }

    format_fraction(rounded)
}

fn trim_decimal(value: f64) -> String {
    let text = format!("{value:.2}");

    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Renders an amount in its unit, switching to kg / L past a thousand and
/// dropping the unit for plain counts.
pub fn format_amount(quantity: f64, unit: Option<&str>) -> String {
    match unit {
        Some("g") if quantity >= 1000.0 => format!("{} kg", trim_decimal(quantity / 1000.0)),
        Some("ml") if quantity >= 1000.0 => format!("{} L", trim_decimal(quantity / 1000.0)),
        Some(unit @ ("g" | "ml")) => format!("{} {unit}", quantity.round() as u64),
        Some("item") | Some("") | None => format_quantity(quantity),
        Some(unit) => format!("{} {unit}", format_quantity(quantity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fraction_simplify() {
        assert_eq!(format_fraction(Fraction::new(4u64, 8u64)), "1/2");
    }

    #[test]
    fn test_format_fraction_mixed() {
        assert_eq!(format_fraction(Fraction::new(3u64, 2u64)), "1 1/2");
    }

    #[test]
    fn test_format_fraction_whole() {
        assert_eq!(format_fraction(Fraction::new(4u64, 2u64)), "2");
    }

    #[test]
    fn test_round_to_quarter_small_quantities() {
        assert_eq!(format_quantity(0.23), "1/4");
    }

    #[test]
    fn test_round_to_third_small_quantities() {
        assert_eq!(format_quantity(0.34), "1/3");
    }

    #[test]
    fn test_round_to_half_medium_quantities() {
        assert_eq!(format_quantity(1.7), "1 1/2");
        assert_eq!(format_quantity(2.347), "2 1/2");
    }

    #[test]
    fn test_round_to_whole_large_quantities() {
        assert_eq!(format_quantity(10.3), "10");
    }

    #[test]
    fn test_tiny_quantity_is_not_zero() {
        assert_eq!(format_quantity(0.05), "1/4");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(400.0, Some("g")), "400 g");
        assert_eq!(format_amount(1360.77, Some("g")), "1.36 kg");
        assert_eq!(format_amount(2000.0, Some("ml")), "2 L");
        assert_eq!(format_amount(3.0, Some("item")), "3");
        assert_eq!(format_amount(1.5, Some("can")), "1 1/2 can");
    }
}
