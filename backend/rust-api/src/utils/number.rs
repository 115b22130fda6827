use serde_json::Number;

/// Renders a JSON number the way a JavaScript string conversion does:
/// integral floats lose their `.0`, and magnitudes outside `[1e-6, 1e21)`
/// switch to exponent notation with an explicit sign (`1e+21`, `1e-7`).
pub fn number_to_string(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }

    match number.as_f64() {
        Some(float) => float_to_string(float),
        None => number.to_string(),
    }
}

fn float_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }

    // Display already drops the `.0` of integral floats
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(raw: &str) -> String {
        let number: Number = serde_json::from_str(raw).unwrap();
        number_to_string(&number)
    }

    #[test]
    fn integral_values_have_no_fraction() {
        assert_eq!(render("1"), "1");
        assert_eq!(render("1.0"), "1");
        assert_eq!(render("-0.0"), "0");
        assert_eq!(render("-42.000"), "-42");
        assert_eq!(render("123456789012345680000"), "123456789012345680000");
    }

    #[test]
    fn large_and_tiny_values_use_exponents() {
        assert_eq!(render("1e21"), "1e+21");
        assert_eq!(render("-2.5e30"), "-2.5e+30");
        assert_eq!(render("1e-7"), "1e-7");
        assert_eq!(render("0.000001"), "0.000001");
    }

    #[test]
    fn fractions_are_shortest_round_trip() {
        assert_eq!(render("2.5"), "2.5");
        assert_eq!(render("0.1"), "0.1");
    }
}
