//! From stored statements to a comparison-ready company.

use contrail_compare::{CompanySnapshot, ComparisonEngine, ComparisonResult};
use contrail_data::edgar::{StatementExtractor, XbrlDocument};
use contrail_data::{
    AirlineCapacity, CompanyProfile, DataError, FinancialStatement, StatementStore,
};
use contrail_metrics::{AirlineOperatingMetrics, FinancialMetrics, MetricsEngine};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while assembling a company analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Storage or extraction failure
    #[error(transparent)]
    Data(#[from] DataError),

    /// Nothing to analyze
    #[error("No annual statements available for {symbol}")]
    NoStatements {
        /// Ticker symbol
        symbol: String,
    },
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// A company's statements and the metrics derived from them, ascending by fiscal year.
#[derive(Debug, Clone)]
pub struct CompanyAnalysis {
    /// Company identity
    pub profile: CompanyProfile,
    /// One statement per fiscal year
    pub statements: Vec<FinancialStatement>,
    /// Financial metrics, aligned with `statements`
    pub metrics: Vec<FinancialMetrics>,
    /// Airline unit economics, aligned with `statements`; empty without capacity data
    pub airline: Vec<AirlineOperatingMetrics>,
}

impl CompanyAnalysis {
    /// Derive yearly metrics for a company.
    ///
    /// Statements are ordered by fiscal year; when a year appears twice the
    /// later entry wins.
    pub fn build(
        profile: CompanyProfile,
        statements: Vec<FinancialStatement>,
        capacity: &[AirlineCapacity],
    ) -> Result<Self> {
        let mut statements = statements;
        statements.sort_by_key(|s| s.fiscal_year);
        statements.reverse();
        statements.dedup_by_key(|s| s.fiscal_year);
        statements.reverse();

        if statements.is_empty() {
            return Err(AnalysisError::NoStatements {
                symbol: profile.symbol,
            });
        }

        let engine = MetricsEngine::new();
        let metrics = engine.derive_metrics(&statements);
        let airline = if capacity.is_empty() {
            Vec::new()
        } else {
            engine.derive_airline_metrics(&statements, capacity)
        };

        info!(
            symbol = %profile.symbol,
            years = statements.len(),
            airline = !airline.is_empty(),
            "Built company analysis"
        );

        Ok(Self {
            profile,
            statements,
            metrics,
            airline,
        })
    }

    /// Load a company's statements and capacity from the store and analyze them.
    pub fn load(store: &StatementStore, symbol: &str) -> Result<Self> {
        let symbol = symbol.trim().to_uppercase();
        let profile = store
            .get_company(&symbol)?
            .unwrap_or_else(|| CompanyProfile::new(&symbol, None, symbol.clone()));
        let statements = store.get_statements(&symbol)?;
        let capacity = store.get_capacity(&symbol)?;
        debug!(
            symbol = %symbol,
            statements = statements.len(),
            capacity = capacity.len(),
            "Loaded company from store"
        );
        Self::build(profile, statements, &capacity)
    }

    /// Ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.profile.symbol
    }

    /// Most recent fiscal year.
    pub fn latest_year(&self) -> Option<i32> {
        self.statements.last().map(|s| s.fiscal_year)
    }

    /// The latest fiscal year, ready for comparison.
    pub fn latest_snapshot(&self) -> Result<CompanySnapshot> {
        let (Some(statement), Some(metrics)) = (self.statements.last(), self.metrics.last())
        else {
            return Err(AnalysisError::NoStatements {
                symbol: self.profile.symbol.clone(),
            });
        };

        let airline = self
            .airline
            .iter()
            .find(|a| a.fiscal_year == statement.fiscal_year)
            .filter(|a| a.has_capacity())
            .cloned();

        Ok(CompanySnapshot::new(
            self.profile.name.clone(),
            statement.clone(),
            metrics.clone(),
            airline,
        ))
    }

    /// Financial metrics for the last `years` fiscal years.
    pub fn history(&self, years: usize) -> &[FinancialMetrics] {
        let start = self.metrics.len().saturating_sub(years);
        &self.metrics[start..]
    }

    /// Airline metrics for the last `years` fiscal years.
    pub fn airline_history(&self, years: usize) -> &[AirlineOperatingMetrics] {
        let start = self.airline.len().saturating_sub(years);
        &self.airline[start..]
    }
}

/// Extract annual statements from companyfacts and store them with any capacity rows.
///
/// Returns the number of statements stored.
pub fn ingest_company_facts(
    store: &StatementStore,
    profile: &CompanyProfile,
    doc: &XbrlDocument,
    capacity: &[AirlineCapacity],
) -> Result<usize> {
    let statements = StatementExtractor::new().extract(&profile.symbol, doc);
    if statements.is_empty() {
        return Err(AnalysisError::NoStatements {
            symbol: profile.symbol.clone(),
        });
    }

    store.put_company(profile)?;
    store.put_statements(&statements)?;
    if !capacity.is_empty() {
        store.put_capacity(capacity)?;
    }

    info!(
        symbol = %profile.symbol,
        statements = statements.len(),
        capacity = capacity.len(),
        "Ingested company facts"
    );
    Ok(statements.len())
}

/// Compare the latest fiscal years of two analyzed companies.
pub fn compare_companies(
    company1: &CompanyAnalysis,
    company2: &CompanyAnalysis,
) -> Result<ComparisonResult> {
    let a = company1.latest_snapshot()?;
    let b = company2.latest_snapshot()?;
    Ok(ComparisonEngine::new().compare(&a, &b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contrail_data::CapacityUnit;
    use rust_decimal_macros::dec;

    fn statement(year: i32, revenue: rust_decimal::Decimal) -> FinancialStatement {
        let mut stmt = FinancialStatement::new("LUV", year);
        stmt.revenue = Some(revenue);
        stmt.operating_expenses = Some(revenue * dec!(0.95));
        stmt
    }

    fn profile() -> CompanyProfile {
        CompanyProfile::new("luv", None, "Southwest Airlines Co.")
    }

    #[test]
    fn test_build_orders_and_dedups() {
        let statements = vec![
            statement(2023, dec!(26000)),
            statement(2021, dec!(15000)),
            statement(2022, dec!(23000)),
            statement(2023, dec!(26100)),
        ];
        let analysis = CompanyAnalysis::build(profile(), statements, &[]).unwrap();

        let years: Vec<i32> = analysis.statements.iter().map(|s| s.fiscal_year).collect();
        assert_eq!(years, vec![2021, 2022, 2023]);
        assert_eq!(analysis.statements[2].revenue, Some(dec!(26100)));
        assert_eq!(analysis.metrics.len(), 3);
        assert!(analysis.airline.is_empty());
        assert_eq!(analysis.latest_year(), Some(2023));
    }

    #[test]
    fn test_build_without_statements() {
        let err = CompanyAnalysis::build(profile(), Vec::new(), &[]).unwrap_err();
        assert!(matches!(err, AnalysisError::NoStatements { symbol } if symbol == "LUV"));
    }

    #[test]
    fn test_history_window() {
        let statements = (2019..=2023)
            .map(|y| statement(y, dec!(1000)))
            .collect();
        let analysis = CompanyAnalysis::build(profile(), statements, &[]).unwrap();

        let years: Vec<i32> = analysis.history(3).iter().map(|m| m.fiscal_year).collect();
        assert_eq!(years, vec![2021, 2022, 2023]);
        assert_eq!(analysis.history(10).len(), 5);
        assert!(analysis.history(0).is_empty());
    }

    #[test]
    fn test_latest_snapshot_carries_airline_record() {
        let statements = vec![statement(2022, dec!(1000)), statement(2023, dec!(1200))];
        let capacity = vec![AirlineCapacity::new(
            "LUV",
            2023,
            Some(100_000),
            Some(80_000),
            CapacityUnit::Thousands,
        )];
        let analysis = CompanyAnalysis::build(profile(), statements, &capacity).unwrap();

        assert_eq!(analysis.airline.len(), 2);
        let snapshot = analysis.latest_snapshot().unwrap();
        assert_eq!(snapshot.ticker, "LUV");
        assert_eq!(snapshot.name, "Southwest Airlines Co.");
        assert_eq!(snapshot.fiscal_year(), 2023);
        assert_eq!(snapshot.airline.and_then(|a| a.load_factor), Some(80.0));
    }

    #[test]
    fn test_latest_snapshot_without_capacity_for_latest_year() {
        let statements = vec![statement(2022, dec!(1000)), statement(2023, dec!(1200))];
        let capacity = vec![AirlineCapacity::new(
            "LUV",
            2022,
            Some(100_000),
            Some(80_000),
            CapacityUnit::Thousands,
        )];
        let analysis = CompanyAnalysis::build(profile(), statements, &capacity).unwrap();
        assert!(analysis.latest_snapshot().unwrap().airline.is_none());
    }

    #[test]
    fn test_load_from_store() {
        let store = StatementStore::in_memory().unwrap();
        store.put_company(&profile()).unwrap();
        store
            .put_statements(&[statement(2022, dec!(1000)), statement(2023, dec!(1100))])
            .unwrap();

        let analysis = CompanyAnalysis::load(&store, "luv").unwrap();
        assert_eq!(analysis.symbol(), "LUV");
        assert_eq!(analysis.metrics.len(), 2);
        assert_eq!(analysis.metrics[1].revenue_growth, Some(0.1));

        let missing = CompanyAnalysis::load(&store, "DAL").unwrap_err();
        assert!(matches!(missing, AnalysisError::NoStatements { .. }));
    }
}
