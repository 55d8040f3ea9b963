//! Guarded arithmetic shared by every derived metric.
//!
//! A ratio whose denominator is zero or negative is defined as `0.0`. Negative
//! equity and a missing denominator therefore read the same; the engine never
//! produces NaN or infinity from a division.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Days used to convert turnover ratios into day counts.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// `numerator / denominator`, or `0.0` when the denominator is not strictly positive.
///
/// ```
/// use contrail_metrics::ratio::ratio;
///
/// assert_eq!(ratio(100.0, 4.0), 25.0);
/// assert_eq!(ratio(100.0, 0.0), 0.0);
/// assert_eq!(ratio(100.0, -5.0), 0.0);
/// ```
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Fractional change from `previous` to `current`, or `0.0` when `previous` is not positive.
///
/// ```
/// use contrail_metrics::ratio::growth_rate;
///
/// assert!((growth_rate(1_200_000.0, 1_000_000.0) - 0.20).abs() < 1e-12);
/// assert_eq!(growth_rate(5.0, 0.0), 0.0);
/// ```
pub fn growth_rate(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous
    } else {
        0.0
    }
}

/// Growth against a prior value that may not exist.
///
/// `None` when there is no prior value or the prior value is not positive.
pub fn optional_growth(current: f64, previous: Option<f64>) -> Option<f64> {
    previous
        .filter(|prev| *prev > 0.0)
        .map(|prev| growth_rate(current, prev))
}

/// Convert a reported amount to `f64`, treating an absent value as zero.
pub fn decimal_to_f64(value: Option<Decimal>) -> f64 {
    value.and_then(|d| d.to_f64()).unwrap_or(0.0)
}

/// Days a balance is outstanding relative to an annual flow.
pub fn days_outstanding(balance: f64, annual_flow: f64) -> f64 {
    ratio(balance, annual_flow) * DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(100.0, 0.0)]
    #[case(100.0, -5.0)]
    #[case(-100.0, -5.0)]
    #[case(0.0, 0.0)]
    #[case(100.0, f64::NAN)]
    fn test_ratio_non_positive_denominator_is_zero(#[case] numerator: f64, #[case] denominator: f64) {
        let value = ratio(numerator, denominator);
        assert_eq!(value, 0.0);
        assert!(value.is_finite());
    }

    #[rstest]
    #[case(1_200_000.0, 1_000_000.0, 0.20)]
    #[case(800_000.0, 1_000_000.0, -0.20)]
    #[case(42.0, 0.0, 0.0)]
    #[case(42.0, -10.0, 0.0)]
    fn test_growth_rate(#[case] current: f64, #[case] previous: f64, #[case] expected: f64) {
        assert_relative_eq!(growth_rate(current, previous), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_optional_growth() {
        assert_eq!(optional_growth(10.0, None), None);
        assert_eq!(optional_growth(10.0, Some(0.0)), None);
        assert_relative_eq!(optional_growth(15.0, Some(10.0)).unwrap(), 0.5);
    }

    #[test]
    fn test_decimal_to_f64() {
        assert_eq!(decimal_to_f64(None), 0.0);
        assert_relative_eq!(decimal_to_f64(Some(dec!(1234.5))), 1234.5);
    }

    #[test]
    fn test_days_outstanding() {
        assert_relative_eq!(days_outstanding(100.0, 365.0), 100.0);
        assert_eq!(days_outstanding(100.0, 0.0), 0.0);
    }
}
