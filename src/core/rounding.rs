//! Two-significant-figure rounding of concentrations.
//!
//! The value is written in scientific notation, its mantissa rounded to one
//! decimal and the result parsed back, so `4.6e2` comes out as exactly `460`
//! rather than `4.6 * 100`.

/// Rounds `value` to two significant digits, keeping its sign.
pub fn round_significant(value: f64) -> f64 {
    // zero has no exponent in scientific notation
    if value == 0.0 {
        return value;
    }
    if !value.is_finite() {
        return value;
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value;
    };
    let (Ok(mantissa), Ok(exponent)) = (mantissa.parse::<f64>(), exponent.parse::<i32>()) else {
        return value;
    };

    let rounded_mantissa = (mantissa * 10.0).round() / 10.0;

    format!("{}e{}", rounded_mantissa, exponent)
        .parse::<f64>()
        .unwrap_or(rounded_mantissa * 10f64.powi(exponent))
}
