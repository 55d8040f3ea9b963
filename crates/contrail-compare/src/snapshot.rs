//! The per-company input to a comparison.

use contrail_data::FinancialStatement;
use contrail_metrics::{AirlineOperatingMetrics, FinancialMetrics};
use serde::{Deserialize, Serialize};

/// One company's latest fiscal year: the statement and what was derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySnapshot {
    /// Display name
    pub name: String,
    /// Ticker symbol
    pub ticker: String,
    /// Latest annual statement
    pub statement: FinancialStatement,
    /// Ratios derived from `statement`
    pub metrics: FinancialMetrics,
    /// Unit economics, when the company is an airline with capacity data
    pub airline: Option<AirlineOperatingMetrics>,
}

impl CompanySnapshot {
    /// Build a snapshot, deriving nothing.
    pub fn new(
        name: impl Into<String>,
        statement: FinancialStatement,
        metrics: FinancialMetrics,
        airline: Option<AirlineOperatingMetrics>,
    ) -> Self {
        Self {
            name: name.into(),
            ticker: statement.symbol.clone(),
            statement,
            metrics,
            airline,
        }
    }

    /// Fiscal year of the underlying statement.
    pub const fn fiscal_year(&self) -> i32 {
        self.statement.fiscal_year
    }

    /// Airline record, only when it carries capacity-derived values.
    pub fn operating_metrics(&self) -> Option<&AirlineOperatingMetrics> {
        self.airline.as_ref().filter(|a| a.has_capacity())
    }
}
