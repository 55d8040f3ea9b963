//! Integration tests for yearly metric derivation

use approx::assert_relative_eq;
use contrail_data::{AirlineCapacity, CapacityUnit, FinancialStatement};
use contrail_metrics::{MetricsEngine, growth_rate, ratio};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn airline_statement(symbol: &str, year: i32) -> FinancialStatement {
    let mut stmt = FinancialStatement::new(symbol, year);
    stmt.revenue = Some(dec!(1_000_000_000));
    stmt.operating_expenses = Some(dec!(900_000_000));
    stmt.fuel_expense = Some(dec!(300_000_000));
    stmt.passenger_revenue = Some(dec!(800_000_000));
    stmt.operating_income = Some(dec!(100_000_000));
    stmt.net_income = Some(dec!(60_000_000));
    stmt.total_assets = Some(dec!(2_000_000_000));
    stmt.shareholder_equity = Some(dec!(500_000_000));
    stmt.total_debt = Some(dec!(750_000_000));
    stmt
}

#[rstest]
#[case(100.0, 0.0)]
#[case(100.0, -5.0)]
#[case(0.0, -0.0)]
fn test_ratio_guard(#[case] numerator: f64, #[case] denominator: f64) {
    assert_eq!(ratio(numerator, denominator), 0.0);
}

#[rstest]
#[case(1_200_000.0, 1_000_000.0, 0.20)]
#[case(800_000.0, 1_000_000.0, -0.20)]
#[case(123.0, 0.0, 0.0)]
fn test_growth_rate_examples(#[case] current: f64, #[case] previous: f64, #[case] expected: f64) {
    assert_relative_eq!(growth_rate(current, previous), expected, epsilon = 1e-12);
}

#[test]
fn test_margins_returns_example() {
    let mut stmt = FinancialStatement::new("EX", 2023);
    stmt.revenue = Some(dec!(10_000_000));
    stmt.gross_profit = Some(dec!(4_000_000));
    stmt.operating_income = Some(dec!(2_000_000));
    stmt.net_income = Some(dec!(1_000_000));
    stmt.total_assets = Some(dec!(10_000_000));
    stmt.shareholder_equity = Some(dec!(5_000_000));

    let metrics = MetricsEngine::new().derive_metrics(&[stmt]);
    let m = &metrics[0];
    assert_relative_eq!(m.gross_margin, 0.40);
    assert_relative_eq!(m.operating_margin, 0.20);
    assert_relative_eq!(m.net_margin, 0.10);
    assert_relative_eq!(m.return_on_assets, 0.10);
    assert_relative_eq!(m.return_on_equity, 0.20);
}

#[test]
fn test_airline_example() {
    let statements = vec![airline_statement("EX", 2023)];
    let capacity = vec![AirlineCapacity::new(
        "EX",
        2023,
        Some(100_000_000),
        Some(80_000_000),
        CapacityUnit::Thousands,
    )];

    let records = MetricsEngine::new().derive_airline_metrics(&statements, &capacity);
    let a = &records[0];
    assert_relative_eq!(a.load_factor.unwrap(), 80.0);
    assert_relative_eq!(a.rasm.unwrap(), 1.0);
    assert_relative_eq!(a.casm.unwrap(), 0.9);
    assert_relative_eq!(a.casm_ex.unwrap(), 0.6);
    assert_relative_eq!(a.passenger_yield.unwrap(), 1.0);
    assert!(a.is_valid());
}

#[test]
fn test_airline_without_capacity_is_null() {
    let statements = vec![airline_statement("EX", 2023)];
    let records = MetricsEngine::new().derive_airline_metrics(&statements, &[]);
    let a = &records[0];
    assert_eq!(a.rasm, None);
    assert_eq!(a.casm, None);
    assert_eq!(a.load_factor, None);
    assert_eq!(a.passenger_yield, None);
}

#[test]
fn test_derivation_is_idempotent() {
    let mut statements: Vec<FinancialStatement> = (2019..=2023)
        .map(|year| {
            let mut stmt = airline_statement("EX", year);
            stmt.revenue = Some(Decimal::from(900 + (year - 2019) * 75));
            stmt.operating_cash_flow = Some(Decimal::from(120 + year - 2019));
            stmt.capital_expenditures = Some(dec!(-50));
            stmt.fill_derived();
            stmt
        })
        .collect();
    statements.reverse();

    let engine = MetricsEngine::new();
    let first = engine.derive_metrics(&statements);
    let second = engine.derive_metrics(&statements);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    let years: Vec<i32> = first.iter().map(|m| m.fiscal_year).collect();
    assert_eq!(years, vec![2019, 2020, 2021, 2022, 2023]);
    assert!(first[0].revenue_growth.is_none());
    assert!(first[1..].iter().all(|m| m.revenue_growth.is_some()));
}

#[test]
fn test_companies_derive_independently() {
    let engine = MetricsEngine::new();
    let handles: Vec<_> = ["UAL", "DAL", "AAL"]
        .into_iter()
        .map(|symbol| {
            std::thread::spawn(move || {
                let statements = vec![airline_statement(symbol, 2022), airline_statement(symbol, 2023)];
                engine.derive_metrics(&statements)
            })
        })
        .collect();

    for handle in handles {
        let metrics = handle.join().unwrap();
        assert_eq!(metrics.len(), 2);
        assert_relative_eq!(metrics[1].debt_to_equity, 1.5);
        assert_eq!(metrics[1].revenue_growth, Some(0.0));
    }
}
