//! Metric Registry
//!
//! Central catalogue of every metric the engine derives, with its display name,
//! category and definition. Reports and the glossary look metrics up here by key.

use crate::airline::AirlineOperatingMetrics;
use crate::financial::FinancialMetrics;
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;

/// Metric categories, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricCategory {
    /// Margins and returns
    Profitability,
    /// Short-term obligations coverage
    Liquidity,
    /// Working-capital cycle in days
    WorkingCapital,
    /// Leverage and coverage
    Solvency,
    /// Turnover and cost ratios
    Efficiency,
    /// Year-over-year growth
    Growth,
    /// Cash generation and spending
    CashFlow,
    /// Per-share values
    PerShare,
    /// Airline unit economics
    Airline,
}

impl MetricCategory {
    /// Human-readable category label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Profitability => "Profitability",
            Self::Liquidity => "Liquidity",
            Self::WorkingCapital => "Working Capital Cycle",
            Self::Solvency => "Solvency",
            Self::Efficiency => "Efficiency",
            Self::Growth => "Growth",
            Self::CashFlow => "Cash Flow",
            Self::PerShare => "Per Share",
            Self::Airline => "Airline Operations",
        }
    }
}

/// How a metric's value is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    /// A fraction shown as a percentage (0.25 -> 25.00%)
    Fraction,
    /// A plain multiple (1.50)
    Multiple,
    /// A count of days
    Days,
    /// Cents per seat mile
    Cents,
    /// Already a percentage (80.0 -> 80.00%)
    Percent,
    /// A dollar amount
    Currency,
}

/// Metric metadata
#[derive(Debug, Clone)]
pub struct MetricInfo {
    /// Metric key (unique identifier, matches the field name)
    pub key: &'static str,
    /// Display name
    pub name: &'static str,
    /// Metric category
    pub category: MetricCategory,
    /// Value representation
    pub unit: MetricUnit,
    /// How the metric is computed
    pub description: &'static str,
}

const fn info(
    key: &'static str,
    name: &'static str,
    category: MetricCategory,
    unit: MetricUnit,
    description: &'static str,
) -> MetricInfo {
    MetricInfo {
        key,
        name,
        category,
        unit,
        description,
    }
}

/// Get all available metric info, in reporting order
pub fn available_metrics() -> Vec<MetricInfo> {
    use MetricCategory::*;
    use MetricUnit::*;

    vec![
        info("gross_margin", "Gross Margin", Profitability, Fraction, "Gross profit divided by revenue"),
        info("operating_margin", "Operating Margin", Profitability, Fraction, "Operating income divided by revenue"),
        info("net_margin", "Net Margin", Profitability, Fraction, "Net income divided by revenue"),
        info("ebitda_margin", "EBITDA Margin", Profitability, Fraction, "EBITDA divided by revenue"),
        info("return_on_assets", "Return on Assets", Profitability, Fraction, "Net income divided by total assets"),
        info("return_on_equity", "Return on Equity", Profitability, Fraction, "Net income divided by shareholders' equity"),
        info("return_on_invested_capital", "Return on Invested Capital", Profitability, Fraction, "Operating income divided by total debt plus equity (not tax-adjusted)"),
        info("return_on_capital_employed", "Return on Capital Employed", Profitability, Fraction, "EBIT divided by total assets less current liabilities"),
        info("current_ratio", "Current Ratio", Liquidity, Multiple, "Current assets divided by current liabilities"),
        info("quick_ratio", "Quick Ratio", Liquidity, Multiple, "Cash, marketable securities and receivables divided by current liabilities"),
        info("cash_ratio", "Cash Ratio", Liquidity, Multiple, "Cash divided by current liabilities"),
        info("operating_cash_flow_ratio", "Operating Cash Flow Ratio", Liquidity, Multiple, "Operating cash flow divided by current liabilities"),
        info("days_sales_outstanding", "Days Sales Outstanding", WorkingCapital, Days, "Receivables divided by revenue, times 365"),
        info("days_inventory_outstanding", "Days Inventory Outstanding", WorkingCapital, Days, "Inventory divided by cost of goods sold, times 365"),
        info("cash_conversion_cycle", "Cash Conversion Cycle", WorkingCapital, Days, "DSO plus DIO less DPO; DPO is not captured and reads 0"),
        info("debt_to_equity", "Debt to Equity Ratio", Solvency, Multiple, "Total debt divided by shareholders' equity"),
        info("debt_to_assets", "Debt to Assets", Solvency, Multiple, "Total debt divided by total assets"),
        info("interest_coverage", "Interest Coverage", Solvency, Multiple, "EBIT divided by interest expense, when interest expense is positive"),
        info("net_debt", "Net Debt", Solvency, Currency, "Total debt less cash and equivalents"),
        info("asset_turnover", "Asset Turnover", Efficiency, Multiple, "Revenue divided by total assets"),
        info("fixed_asset_turnover", "Fixed Asset Turnover", Efficiency, Multiple, "Revenue divided by non-current assets"),
        info("operating_expense_ratio", "Operating Expense Ratio", Efficiency, Fraction, "Operating expenses divided by revenue"),
        info("revenue_growth", "Revenue Growth", Growth, Fraction, "Change in revenue versus the prior fiscal year"),
        info("operating_income_growth", "Operating Income Growth", Growth, Fraction, "Change in operating income versus the prior fiscal year"),
        info("net_income_growth", "Net Income Growth", Growth, Fraction, "Change in net income versus the prior fiscal year"),
        info("eps_growth", "EPS Growth", Growth, Fraction, "Change in earnings per share versus the prior fiscal year"),
        info("free_cash_flow", "Free Cash Flow", CashFlow, Currency, "Operating cash flow less capital expenditures"),
        info("free_cash_flow_margin", "Free Cash Flow Margin", CashFlow, Fraction, "Free cash flow divided by revenue"),
        info("operating_cash_flow_margin", "Operating Cash Flow Margin", CashFlow, Fraction, "Operating cash flow divided by revenue"),
        info("cash_flow_to_net_income", "Cash Flow to Net Income", CashFlow, Multiple, "Operating cash flow divided by net income"),
        info("capex_to_operating_cash_flow", "Capex to Operating Cash Flow", CashFlow, Fraction, "Capital expenditures divided by operating cash flow, when cash flow is positive"),
        info("earnings_per_share", "Earnings per Share", PerShare, Multiple, "Net income divided by shares outstanding"),
        info("book_value_per_share", "Book Value per Share", PerShare, Multiple, "Shareholders' equity divided by shares outstanding"),
        info("load_factor", "Load Factor", Airline, Percent, "Revenue passenger miles divided by available seat miles"),
        info("rasm", "Revenue per ASM", Airline, Cents, "Total revenue per available seat mile"),
        info("prasm", "Passenger Revenue per ASM", Airline, Cents, "Passenger revenue per available seat mile"),
        info("casm", "Cost per ASM", Airline, Cents, "Operating expenses per available seat mile"),
        info("casm_ex", "CASM excluding fuel", Airline, Cents, "Operating expenses less fuel per available seat mile"),
        info("passenger_yield", "Passenger Yield", Airline, Cents, "Passenger revenue per revenue passenger mile"),
        info("break_even_load_factor", "Break-even Load Factor", Airline, Percent, "Load factor at which passenger revenue covers operating cost"),
        info("fuel_cost_pct", "Fuel Cost Share", Airline, Percent, "Fuel expense as a share of operating expenses"),
    ]
}

/// Get metrics by category
pub fn metrics_by_category(category: MetricCategory) -> Vec<MetricInfo> {
    available_metrics()
        .into_iter()
        .filter(|m| m.category == category)
        .collect()
}

/// Get metric info by key
pub fn get_metric_info(key: &str) -> Option<MetricInfo> {
    available_metrics().into_iter().find(|m| m.key == key)
}

/// Count metrics by category
pub fn count_by_category() -> HashMap<MetricCategory, usize> {
    let mut counts = HashMap::new();
    for metric in available_metrics() {
        *counts.entry(metric.category).or_insert(0) += 1;
    }
    counts
}

/// Read a catalogued metric's value from a year's records.
///
/// Returns `None` for unknown keys, for fields that were skipped (coverage,
/// growth) and for airline metrics when no airline record is given.
pub fn metric_value(
    key: &str,
    financial: &FinancialMetrics,
    airline: Option<&AirlineOperatingMetrics>,
) -> Option<f64> {
    let f = financial;
    let value = match key {
        "gross_margin" => f.gross_margin,
        "operating_margin" => f.operating_margin,
        "net_margin" => f.net_margin,
        "ebitda_margin" => f.ebitda_margin,
        "return_on_assets" => f.return_on_assets,
        "return_on_equity" => f.return_on_equity,
        "return_on_invested_capital" => f.return_on_invested_capital,
        "return_on_capital_employed" => f.return_on_capital_employed,
        "current_ratio" => f.current_ratio,
        "quick_ratio" => f.quick_ratio,
        "cash_ratio" => f.cash_ratio,
        "operating_cash_flow_ratio" => f.operating_cash_flow_ratio,
        "days_sales_outstanding" => f.days_sales_outstanding,
        "days_inventory_outstanding" => f.days_inventory_outstanding,
        "cash_conversion_cycle" => f.cash_conversion_cycle,
        "debt_to_equity" => f.debt_to_equity,
        "debt_to_assets" => f.debt_to_assets,
        "interest_coverage" => return f.interest_coverage,
        "net_debt" => return f.net_debt.to_f64(),
        "asset_turnover" => f.asset_turnover,
        "fixed_asset_turnover" => f.fixed_asset_turnover,
        "operating_expense_ratio" => f.operating_expense_ratio,
        "revenue_growth" => return f.revenue_growth,
        "operating_income_growth" => return f.operating_income_growth,
        "net_income_growth" => return f.net_income_growth,
        "eps_growth" => return f.eps_growth,
        "free_cash_flow" => return f.free_cash_flow.to_f64(),
        "free_cash_flow_margin" => f.free_cash_flow_margin,
        "operating_cash_flow_margin" => f.operating_cash_flow_margin,
        "cash_flow_to_net_income" => f.cash_flow_to_net_income,
        "capex_to_operating_cash_flow" => return f.capex_to_operating_cash_flow,
        "earnings_per_share" => f.earnings_per_share,
        "book_value_per_share" => f.book_value_per_share,
        _ => return airline.and_then(|a| airline_value(key, a)),
    };
    Some(value)
}

fn airline_value(key: &str, a: &AirlineOperatingMetrics) -> Option<f64> {
    match key {
        "load_factor" => a.load_factor,
        "rasm" => a.rasm,
        "prasm" => a.prasm,
        "casm" => a.casm,
        "casm_ex" => a.casm_ex,
        "passenger_yield" => a.passenger_yield,
        "break_even_load_factor" => a.break_even_load_factor,
        "fuel_cost_pct" => a.fuel_cost_pct,
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let metrics = available_metrics();
        let keys: HashSet<&str> = metrics.iter().map(|m| m.key).collect();
        assert_eq!(keys.len(), metrics.len());
    }

    #[test]
    fn test_metrics_by_category() {
        let airline = metrics_by_category(MetricCategory::Airline);
        assert_eq!(airline.len(), 8);
        assert!(airline.iter().all(|m| m.category == MetricCategory::Airline));

        let counts = count_by_category();
        assert_eq!(counts.get(&MetricCategory::WorkingCapital), Some(&3));
        assert_eq!(counts.values().sum::<usize>(), available_metrics().len());
    }

    #[test]
    fn test_get_metric_info() {
        let casm = get_metric_info("casm").unwrap();
        assert_eq!(casm.name, "Cost per ASM");
        assert_eq!(casm.unit, MetricUnit::Cents);
        assert!(get_metric_info("beta").is_none());
    }

    #[test]
    fn test_every_catalogued_metric_has_a_value() {
        let financial = FinancialMetrics {
            interest_coverage: Some(3.0),
            revenue_growth: Some(0.1),
            operating_income_growth: Some(0.1),
            net_income_growth: Some(0.1),
            eps_growth: Some(0.1),
            capex_to_operating_cash_flow: Some(0.5),
            ..FinancialMetrics::default()
        };
        let airline = AirlineOperatingMetrics {
            load_factor: Some(80.0),
            rasm: Some(1.0),
            prasm: Some(0.8),
            casm: Some(0.9),
            casm_ex: Some(0.6),
            passenger_yield: Some(1.0),
            break_even_load_factor: Some(47.0),
            fuel_cost_pct: Some(33.0),
            ..AirlineOperatingMetrics::default()
        };

        for metric in available_metrics() {
            assert!(
                metric_value(metric.key, &financial, Some(&airline)).is_some(),
                "Metric {} has no accessor",
                metric.key
            );
        }
        assert_eq!(metric_value("casm", &financial, None), None);
        assert_eq!(metric_value("unknown", &financial, Some(&airline)), None);
    }

    #[test]
    fn test_categories_in_reporting_order() {
        let metrics = available_metrics();
        let mut categories: Vec<MetricCategory> = metrics.iter().map(|m| m.category).collect();
        categories.dedup();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
    }
}
