//! The fixed, ordered list of compared metrics.
//!
//! Order here is presentation order in every report and export.

use crate::snapshot::CompanySnapshot;
use crate::value::MetricValue;
use contrail_metrics::AirlineOperatingMetrics;

/// One catalogued metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    /// Short key used for lookups
    pub key: &'static str,
    /// Display name used in narrative text
    pub name: &'static str,
    /// Whether larger values win
    pub higher_is_better: bool,
    /// Section the metric belongs to
    pub section: Section,
    extract: fn(&CompanySnapshot) -> Option<MetricValue>,
}

/// Catalogue section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Statement-derived metrics, always compared
    Financial,
    /// Unit economics, compared only for two airlines
    Operational,
}

impl MetricSpec {
    const fn new(
        key: &'static str,
        name: &'static str,
        higher_is_better: bool,
        section: Section,
        extract: fn(&CompanySnapshot) -> Option<MetricValue>,
    ) -> Self {
        Self {
            key,
            name,
            higher_is_better,
            section,
            extract,
        }
    }

    /// Read this metric's value from a snapshot.
    pub fn value(&self, snapshot: &CompanySnapshot) -> Option<MetricValue> {
        (self.extract)(snapshot)
    }
}

fn airline(
    snapshot: &CompanySnapshot,
    field: fn(&AirlineOperatingMetrics) -> Option<f64>,
) -> Option<MetricValue> {
    snapshot
        .operating_metrics()
        .and_then(field)
        .map(MetricValue::Ratio)
}

/// Statement-derived metrics, in presentation order.
pub const FINANCIAL_METRICS: [MetricSpec; 8] = [
    MetricSpec::new("Revenue", "Total Revenue", true, Section::Financial, |s| {
        s.statement.revenue.map(MetricValue::Money)
    }),
    MetricSpec::new("Operating Margin", "Operating Margin", true, Section::Financial, |s| {
        Some(MetricValue::Ratio(s.metrics.operating_margin))
    }),
    MetricSpec::new("Net Margin", "Net Margin", true, Section::Financial, |s| {
        Some(MetricValue::Ratio(s.metrics.net_margin))
    }),
    MetricSpec::new("ROA", "Return on Assets", true, Section::Financial, |s| {
        Some(MetricValue::Ratio(s.metrics.return_on_assets))
    }),
    MetricSpec::new("ROE", "Return on Equity", true, Section::Financial, |s| {
        Some(MetricValue::Ratio(s.metrics.return_on_equity))
    }),
    MetricSpec::new("Current Ratio", "Current Ratio", true, Section::Financial, |s| {
        Some(MetricValue::Ratio(s.metrics.current_ratio))
    }),
    MetricSpec::new("Free Cash Flow", "Free Cash Flow", true, Section::Financial, |s| {
        s.statement.free_cash_flow.map(MetricValue::Money)
    }),
    MetricSpec::new(
        "Debt-to-Equity",
        "Debt to Equity Ratio",
        false,
        Section::Financial,
        |s| Some(MetricValue::Ratio(s.metrics.debt_to_equity)),
    ),
];

/// Airline unit economics, in presentation order.
pub const OPERATIONAL_METRICS: [MetricSpec; 5] = [
    MetricSpec::new("Load Factor", "Load Factor", true, Section::Operational, |s| {
        airline(s, |a| a.load_factor)
    }),
    MetricSpec::new("RASM", "Revenue per ASM", true, Section::Operational, |s| {
        airline(s, |a| a.rasm)
    }),
    MetricSpec::new("CASM", "Cost per ASM", false, Section::Operational, |s| {
        airline(s, |a| a.casm)
    }),
    MetricSpec::new("CASM-ex", "CASM excluding fuel", false, Section::Operational, |s| {
        airline(s, |a| a.casm_ex)
    }),
    MetricSpec::new("Yield", "Passenger Yield", true, Section::Operational, |s| {
        airline(s, |a| a.passenger_yield)
    }),
];

/// Every catalogued metric, financial first.
pub fn catalogue() -> impl Iterator<Item = &'static MetricSpec> {
    FINANCIAL_METRICS.iter().chain(OPERATIONAL_METRICS.iter())
}

/// Look up a catalogued metric by key.
pub fn find(key: &str) -> Option<&'static MetricSpec> {
    catalogue().find(|spec| spec.key == key)
}
