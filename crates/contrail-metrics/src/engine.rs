//! Yearly metric derivation over a company's statement history.

use crate::airline::AirlineOperatingMetrics;
use crate::financial::FinancialMetrics;
use contrail_data::{AirlineCapacity, FinancialStatement};
use std::collections::HashMap;
use tracing::{debug, info};

/// Converts statement sequences into metric sequences.
///
/// The engine holds no state between calls, so one instance can serve any
/// number of companies, including from several threads at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsEngine;

impl MetricsEngine {
    /// Create a new engine.
    pub const fn new() -> Self {
        Self
    }

    /// Derive one [`FinancialMetrics`] per statement, ascending by fiscal year.
    ///
    /// Statements are sorted with a stable sort first; each year's growth
    /// fields read the statement immediately before it.
    pub fn derive_metrics(&self, statements: &[FinancialStatement]) -> Vec<FinancialMetrics> {
        let sorted = sorted_by_year(statements);
        info!(count = sorted.len(), "Deriving financial metrics");

        let mut previous: Option<&FinancialStatement> = None;
        let mut metrics = Vec::with_capacity(sorted.len());
        for statement in sorted {
            metrics.push(FinancialMetrics::derive(statement, previous));
            previous = Some(statement);
        }
        metrics
    }

    /// Derive one [`AirlineOperatingMetrics`] per statement, ascending by fiscal year.
    ///
    /// Capacity rows are matched to statements by fiscal year. A statement with
    /// no matching row yields an empty record.
    pub fn derive_airline_metrics(
        &self,
        statements: &[FinancialStatement],
        capacity: &[AirlineCapacity],
    ) -> Vec<AirlineOperatingMetrics> {
        let by_year: HashMap<i32, &AirlineCapacity> =
            capacity.iter().map(|c| (c.fiscal_year, c)).collect();

        let mut records: Vec<AirlineOperatingMetrics> = Vec::with_capacity(statements.len());
        for statement in sorted_by_year(statements) {
            let record = AirlineOperatingMetrics::derive(
                statement,
                by_year.get(&statement.fiscal_year).copied(),
                records.last(),
            );
            record.log_validation();
            debug!(
                symbol = %record.symbol,
                fiscal_year = record.fiscal_year,
                load_factor = ?record.load_factor,
                casm = ?record.casm,
                "Derived airline metrics"
            );
            records.push(record);
        }
        records
    }
}

fn sorted_by_year(statements: &[FinancialStatement]) -> Vec<&FinancialStatement> {
    let mut sorted: Vec<&FinancialStatement> = statements.iter().collect();
    sorted.sort_by_key(|s| s.fiscal_year);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use contrail_data::CapacityUnit;
    use rust_decimal_macros::dec;

    fn statement(year: i32, revenue: rust_decimal::Decimal) -> FinancialStatement {
        let mut stmt = FinancialStatement::new("LUV", year);
        stmt.revenue = Some(revenue);
        stmt.operating_expenses = Some(revenue * dec!(0.9));
        stmt
    }

    #[test]
    fn test_derive_metrics_sorts_ascending() {
        let statements = vec![
            statement(2023, dec!(1200)),
            statement(2021, dec!(800)),
            statement(2022, dec!(1000)),
        ];
        let metrics = MetricsEngine::new().derive_metrics(&statements);

        let years: Vec<i32> = metrics.iter().map(|m| m.fiscal_year).collect();
        assert_eq!(years, vec![2021, 2022, 2023]);
        assert_eq!(metrics[0].revenue_growth, None);
        assert_eq!(metrics[1].revenue_growth, Some(0.25));
        assert_eq!(metrics[2].revenue_growth, Some(0.2));
    }

    #[test]
    fn test_derive_metrics_empty() {
        assert!(MetricsEngine::new().derive_metrics(&[]).is_empty());
    }

    #[test]
    fn test_derive_airline_metrics_aligns_by_year() {
        let statements = vec![statement(2023, dec!(1200)), statement(2022, dec!(1000))];
        let capacity = vec![AirlineCapacity::new(
            "LUV",
            2023,
            Some(10),
            Some(8),
            CapacityUnit::Miles,
        )];

        let records = MetricsEngine::new().derive_airline_metrics(&statements, &capacity);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fiscal_year, 2022);
        assert!(!records[0].has_capacity());
        assert_eq!(records[1].fiscal_year, 2023);
        assert_eq!(records[1].load_factor, Some(80.0));
        assert_eq!(records[1].casm_growth, None);
    }
}
