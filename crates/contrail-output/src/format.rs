//! Display formatting for metric values.

use contrail_compare::MetricValue;
use contrail_metrics::MetricUnit;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Placeholder shown for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a fraction as a percentage: `0.1234` -> `12.34%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a plain multiple: `1.5` -> `1.50`.
pub fn format_ratio(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a dollar amount with a B/M/K suffix chosen on its magnitude.
///
/// ```
/// use contrail_output::format_currency;
///
/// assert_eq!(format_currency(58_048_000_000.0), "$58.05B");
/// assert_eq!(format_currency(-2_500_000.0), "-$2.50M");
/// assert_eq!(format_currency(950.0), "$950.00");
/// ```
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("{}${:.2}B", sign, abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{}${:.2}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.2}K", sign, abs / 1_000.0)
    } else {
        format!("{}${:.2}", sign, abs)
    }
}

/// Format an exact dollar amount.
pub fn format_decimal_currency(value: Decimal) -> String {
    format_currency(value.to_f64().unwrap_or(0.0))
}

/// Format a per-seat-mile figure in cents.
pub fn format_cents(value: f64) -> String {
    format!("{:.2}¢", value)
}

/// Format a count of days.
pub fn format_days(value: f64) -> String {
    format!("{:.1} days", value)
}

/// Format a value according to its unit.
pub fn format_with_unit(value: f64, unit: MetricUnit) -> String {
    match unit {
        MetricUnit::Fraction => format_percentage(value),
        MetricUnit::Multiple => format_ratio(value),
        MetricUnit::Days => format_days(value),
        MetricUnit::Cents => format_cents(value),
        MetricUnit::Percent => format!("{:.2}%", value),
        MetricUnit::Currency => format_currency(value),
    }
}

/// Format a compared value. Money always prints as currency.
pub fn format_metric_value(value: &MetricValue, unit: MetricUnit) -> String {
    match value {
        MetricValue::Money(amount) => format_decimal_currency(*amount),
        MetricValue::Ratio(v) => format_with_unit(*v, unit),
    }
}

/// Format an optional value, printing [`NOT_AVAILABLE`] when absent.
pub fn format_optional<T>(value: Option<T>, format: impl FnOnce(T) -> String) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), format)
}

/// Display unit of a comparison catalogue key.
pub fn comparison_unit(key: &str) -> MetricUnit {
    match key {
        "Revenue" | "Free Cash Flow" => MetricUnit::Currency,
        "Operating Margin" | "Net Margin" | "ROA" | "ROE" => MetricUnit::Fraction,
        "Load Factor" => MetricUnit::Percent,
        "RASM" | "CASM" | "CASM-ex" | "Yield" => MetricUnit::Cents,
        _ => MetricUnit::Multiple,
    }
}
