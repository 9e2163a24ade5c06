use std::sync::Arc;

/// Formats one axis tick value.
pub type AxisLabelFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

/// Formats the `(x, y)` sample shown in the cursor box.
pub type CursorLabelFormatterFn = Arc<dyn Fn(f64, f64) -> String + Send + Sync + 'static>;

/// Compact `%g`-style rendering with `significant_digits` digits.
///
/// Trailing zeros are dropped; exponents below `-4` or at/above the digit
/// count switch to scientific notation with a signed two-digit exponent
/// (`1e+02`, `2.5e-05`).
#[must_use]
pub fn format_compact(value: f64, significant_digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }

    let digits = significant_digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{sign}{:02}",
            trim_fraction_zeros(mantissa),
            exponent.unsigned_abs()
        );
    }

    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    trim_fraction_zeros(&format!("{value:.decimals$}")).to_owned()
}

fn trim_fraction_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[must_use]
pub fn compact_axis_formatter(significant_digits: usize) -> AxisLabelFormatterFn {
    Arc::new(move |value| format_compact(value, significant_digits))
}

#[must_use]
pub fn compact_cursor_formatter(significant_digits: usize) -> CursorLabelFormatterFn {
    Arc::new(move |x, y| {
        format!(
            "{}, {}",
            format_compact(x, significant_digits),
            format_compact(y, significant_digits)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{compact_cursor_formatter, format_compact};

    #[test]
    fn keeps_requested_significant_digits() {
        assert_eq!(format_compact(3.14159, 2), "3.1");
        assert_eq!(format_compact(3.14159, 3), "3.14");
        assert_eq!(format_compact(-42.2, 2), "-42");
    }

    #[test]
    fn drops_trailing_zeros() {
        assert_eq!(format_compact(0.5, 2), "0.5");
        assert_eq!(format_compact(2.0, 3), "2");
    }

    #[test]
    fn switches_to_scientific_outside_fixed_range() {
        assert_eq!(format_compact(100.0, 2), "1e+02");
        assert_eq!(format_compact(1234.0, 3), "1.23e+03");
        assert_eq!(format_compact(0.000025, 2), "2.5e-05");
    }

    #[test]
    fn rounding_carry_moves_exponent() {
        assert_eq!(format_compact(9.96, 2), "10");
        assert_eq!(format_compact(99.6, 2), "1e+02");
    }

    #[test]
    fn zero_and_non_finite_values() {
        assert_eq!(format_compact(0.0, 2), "0");
        assert_eq!(format_compact(f64::NAN, 2), "NaN");
        assert_eq!(format_compact(f64::NEG_INFINITY, 2), "-Inf");
    }

    #[test]
    fn cursor_formatter_joins_both_values() {
        let formatter = compact_cursor_formatter(3);
        assert_eq!(formatter(1.5708, -10.0), "1.57, -10");
    }
}
