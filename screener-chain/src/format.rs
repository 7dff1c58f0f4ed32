//! Display formatting for nullable numeric fields
//!
//! Every function is total: an absent or non-finite value renders as [`PLACEHOLDER`], never as
//! zero and never as a fault.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rendered in place of any absent value
pub const PLACEHOLDER: &str = "—";

const TRILLION: f64 = 1e12;
const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;
const THOUSAND: f64 = 1e3;

/// Largest scale `rust_decimal` can represent; requests above it are capped
pub const MAX_DECIMALS: u32 = 28;

/// Round `value` to `decimals` places (at most [`MAX_DECIMALS`]), or [`PLACEHOLDER`] if absent
pub fn format_fixed(value: Option<f64>, decimals: u32) -> String {
    match finite(value) {
        Some(value) => fixed(value, decimals),
        None => PLACEHOLDER.to_string(),
    }
}

/// `$` followed by the value at 2 decimals
pub fn format_currency(value: Option<f64>) -> String {
    match finite(value) {
        Some(value) => format!("${}", fixed(value, 2)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Abbreviate with the largest applicable T/B/M suffix, else group thousands
///
/// `1_500_000_000.0` -> `$1.50B`, `999.0` -> `$999`, `12_345.0` -> `$12,345`
pub fn format_large_currency(value: Option<f64>) -> String {
    let Some(value) = finite(value) else {
        return PLACEHOLDER.to_string();
    };

    if value >= TRILLION {
        format!("${}T", fixed(value / TRILLION, 2))
    } else if value >= BILLION {
        format!("${}B", fixed(value / BILLION, 2))
    } else if value >= MILLION {
        format!("${}M", fixed(value / MILLION, 2))
    } else {
        format!("${}", group_thousands(&fixed(value, 0)))
    }
}

/// Volume with M (1 decimal) / K (0 decimals) suffix
///
/// `2_500_000.0` -> `2.5M`, `12_400.0` -> `12K`, `850.0` -> `850`
pub fn format_volume(value: Option<f64>) -> String {
    let Some(value) = finite(value) else {
        return PLACEHOLDER.to_string();
    };

    if value >= MILLION {
        format!("{}M", fixed(value / MILLION, 1))
    } else if value >= THOUSAND {
        format!("{}K", fixed(value / THOUSAND, 0))
    } else {
        fixed(value, 0)
    }
}

/// Value already expressed in percent, suffixed with `%`
pub fn format_percent(value: Option<f64>, decimals: u32) -> String {
    match finite(value) {
        Some(value) => format!("{}%", fixed(value, decimals)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Percent with an explicit `+` for positive values
///
/// The sign follows the rounded value: `0.004` at 2 decimals is `0.00%`, not `+0.00%`.
pub fn format_signed_percent(value: Option<f64>, decimals: u32) -> String {
    let Some(value) = finite(value) else {
        return PLACEHOLDER.to_string();
    };

    let text = fixed(value, decimals);
    if value > 0.0 && !is_zero_text(&text) {
        format!("+{text}%")
    } else {
        format!("{text}%")
    }
}

/// Whether a rendered number has no non-zero digit
pub(crate) fn is_zero_text(text: &str) -> bool {
    text.chars().all(|c| matches!(c, '0' | '.' | '-'))
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}

/// Decimal rounding, midpoint away from zero, exactly `decimals` places
fn fixed(value: f64, decimals: u32) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    match Decimal::from_f64(value) {
        Some(decimal) => {
            let mut rounded =
                decimal.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(decimals);
            if rounded.is_zero() {
                rounded.set_sign_positive(true);
            }
            rounded.to_string()
        }
        // Outside Decimal range (~7.9e28)
        None => format!("{:.*}", decimals as usize, value),
    }
}

/// Insert `,` every three digits of the integer part
fn group_thousands(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", number),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed() {
        struct TestCase {
            input: Option<f64>,
            decimals: u32,
            expected: &'static str,
        }

        let tests = vec![
            TestCase {
                // TC0: absent renders placeholder
                input: None,
                decimals: 2,
                expected: PLACEHOLDER,
            },
            TestCase {
                // TC1: zero is not absent
                input: Some(0.0),
                decimals: 2,
                expected: "0.00",
            },
            TestCase {
                // TC2: pads to requested decimals
                input: Some(1.5),
                decimals: 2,
                expected: "1.50",
            },
            TestCase {
                // TC3: exact binary midpoint rounds away from zero
                input: Some(0.125),
                decimals: 2,
                expected: "0.13",
            },
            TestCase {
                // TC4: negative midpoint rounds away from zero
                input: Some(-2.5),
                decimals: 0,
                expected: "-3",
            },
            TestCase {
                // TC5: negative value rounding to zero drops the sign
                input: Some(-0.001),
                decimals: 2,
                expected: "0.00",
            },
            TestCase {
                // TC6: NaN treated as absent
                input: Some(f64::NAN),
                decimals: 2,
                expected: PLACEHOLDER,
            },
            TestCase {
                // TC7: infinity treated as absent
                input: Some(f64::INFINITY),
                decimals: 1,
                expected: PLACEHOLDER,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = format_fixed(test.input, test.decimals);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_format_fixed_caps_decimals() {
        let capped = format_fixed(Some(1.5), 40);
        assert_eq!(capped, format_fixed(Some(1.5), MAX_DECIMALS));
        assert_eq!(capped.split_once('.').map(|(_, fraction)| fraction.len()), Some(28));
    }

    #[test]
    fn test_is_zero_text() {
        assert!(is_zero_text("0"));
        assert!(is_zero_text("0.00"));
        assert!(!is_zero_text("0.01"));
        assert!(!is_zero_text("-10"));
    }

    #[test]
    fn test_format_currency_parses_back_to_rounded_value() {
        for value in [0.0, 1.0, 2.456, 150.0, -75.2, 1234.5678, 0.01] {
            let formatted = format_currency(Some(value));
            assert!(formatted.starts_with('$'), "{formatted} lacks $ prefix");

            let parsed: f64 = formatted[1..].parse().unwrap();
            let rounded = (value * 100.0).round() / 100.0;
            assert!((parsed - rounded).abs() < 1e-9, "{value} -> {formatted}");
        }

        assert_eq!(format_currency(None), PLACEHOLDER);
    }

    #[test]
    fn test_format_large_currency() {
        struct TestCase {
            input: Option<f64>,
            expected: &'static str,
        }

        let tests = vec![
            TestCase {
                // TC0: billions
                input: Some(1_500_000_000.0),
                expected: "$1.50B",
            },
            TestCase {
                // TC1: below a thousand
                input: Some(999.0),
                expected: "$999",
            },
            TestCase {
                // TC2: trillions take precedence
                input: Some(2_750_000_000_000.0),
                expected: "$2.75T",
            },
            TestCase {
                // TC3: millions
                input: Some(12_345_678.0),
                expected: "$12.35M",
            },
            TestCase {
                // TC4: grouped thousands below a million
                input: Some(123_456.0),
                expected: "$123,456",
            },
            TestCase {
                // TC5: exactly at the million threshold
                input: Some(1_000_000.0),
                expected: "$1.00M",
            },
            TestCase {
                // TC6: fraction rounds to integer before grouping
                input: Some(999_999.4),
                expected: "$999,999",
            },
            TestCase {
                // TC7: absent
                input: None,
                expected: PLACEHOLDER,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = format_large_currency(test.input);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_format_volume() {
        struct TestCase {
            input: Option<f64>,
            expected: &'static str,
        }

        let tests = vec![
            TestCase {
                // TC0: millions with one decimal
                input: Some(2_500_000.0),
                expected: "2.5M",
            },
            TestCase {
                // TC1: below a thousand
                input: Some(850.0),
                expected: "850",
            },
            TestCase {
                // TC2: thousands with zero decimals
                input: Some(12_400.0),
                expected: "12K",
            },
            TestCase {
                // TC3: exactly a thousand
                input: Some(1_000.0),
                expected: "1K",
            },
            TestCase {
                // TC4: zero volume is shown, not hidden
                input: Some(0.0),
                expected: "0",
            },
            TestCase {
                // TC5: absent
                input: None,
                expected: PLACEHOLDER,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = format_volume(test.input);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(45.234), 1), "45.2%");
        assert_eq!(format_percent(None, 1), PLACEHOLDER);
        assert_eq!(format_signed_percent(Some(3.254), 2), "+3.25%");
        assert_eq!(format_signed_percent(Some(-1.5), 2), "-1.50%");
        assert_eq!(format_signed_percent(Some(0.0), 2), "0.00%");
        assert_eq!(format_signed_percent(Some(0.004), 2), "0.00%");
        assert_eq!(format_signed_percent(Some(-0.004), 2), "0.00%");
        assert_eq!(format_signed_percent(None, 2), PLACEHOLDER);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("-1234567"), "-1,234,567");
        assert_eq!(group_thousands("1234.50"), "1,234.50");
    }
}
