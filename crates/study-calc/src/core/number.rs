//! Numeric helpers shared by the engine and the front ends
//!
//! Display text is the source of truth for the operand being typed, so the
//! engine constantly converts between `f64` and numerals. These helpers keep
//! that conversion in one place.

/// Default number of decimal places kept in displayed results
pub const DEFAULT_PRECISION: u32 = 7;

/// Above this magnitude an `f64` has no fractional bits left to round
const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Rounds `value` to `places` decimal places, half-up
///
/// Suppresses binary floating-point noise such as `0.1 + 0.2`. Ties round
/// toward positive infinity, so `-2.5e-7` becomes `-2e-7`.
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let Ok(exponent) = i32::try_from(places) else {
        return value;
    };
    let factor = 10f64.powi(exponent);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    let rounded = (scaled + 0.5).floor() / factor;
    // Normalise -0.0 so it never renders with a sign
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Renders a number as a numeral
///
/// Uses the shortest representation that round-trips. Very large and very
/// small magnitudes switch to exponent form (`1e+21`, `1e-7`) so the display
/// never grows to dozens of digits.
#[must_use]
pub fn format_number(value: f64) -> String {
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
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }

    let exp_form = format!("{value:e}");
    match exp_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exp_form,
    }
}

/// Reads the leading numeral of `text`
///
/// Trailing junk is ignored (`"12("` reads as `12`); text that does not start
/// with a numeral yields `None`. Accepts an optional sign, a fractional part
/// and an exponent.
#[must_use]
pub fn parse_leading(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let is_digit = |i: usize| i < len && bytes[i].is_ascii_digit();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_start = end;
    while is_digit(end) {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while is_digit(frac_end) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while is_digit(exp_end) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
