//! Integration tests for comparison exports and reports.

use contrail_compare::{CompanySnapshot, ComparisonEngine, ComparisonResult};
use contrail_data::FinancialStatement;
use contrail_metrics::{AirlineOperatingMetrics, FinancialMetrics};
use contrail_output::{
    ComparisonReport, ExportFormat, Exporter, MetricsFilter, MetricsHistoryReport,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn snapshot(symbol: &str, name: &str, revenue: Decimal, net_income: Decimal) -> CompanySnapshot {
    let mut stmt = FinancialStatement::new(symbol, 2023);
    stmt.revenue = Some(revenue);
    stmt.operating_income = Some(revenue / dec!(10));
    stmt.net_income = Some(net_income);
    stmt.total_assets = Some(dec!(2000));
    stmt.shareholder_equity = Some(dec!(500));
    stmt.total_debt = Some(dec!(750));
    stmt.current_assets = Some(dec!(300));
    stmt.current_liabilities = Some(dec!(300));

    let metrics = FinancialMetrics::derive(&stmt, None);
    let airline = AirlineOperatingMetrics {
        load_factor: Some(84.0),
        rasm: Some(18.0),
        casm: Some(17.0),
        casm_ex: Some(13.0),
        passenger_yield: Some(20.0),
        ..AirlineOperatingMetrics::empty(symbol, 2023)
    };
    CompanySnapshot::new(name, stmt, metrics, Some(airline))
}

fn result() -> ComparisonResult {
    ComparisonEngine::new().compare(
        &snapshot("DAL", "Delta Air Lines, Inc.", dec!(1000), dec!(60)),
        &snapshot("UAL", "United Airlines Holdings", dec!(800), dec!(-10)),
    )
}

#[test]
fn test_comparison_csv_layout() {
    let csv = result().export_to_string(ExportFormat::Csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "Metric,Company1 (DAL),Company2 (UAL),Winner,Difference %");
    assert_eq!(lines[1], "Total Revenue,1000,800,company1,25.00");
    assert!(lines[2].starts_with("Operating Margin,0.1,0.1,neutral,0.00"));
    // No free cash flow on either side.
    assert!(lines.contains(&"Free Cash Flow,N/A,N/A,neutral,0.00"));
    assert!(lines.contains(&"Load Factor,84,84,neutral,0.00"));

    let summary = lines.iter().position(|l| *l == "EXECUTIVE SUMMARY").unwrap();
    assert_eq!(lines[summary - 1], "");
    assert!(lines[summary + 1].starts_with("\"Delta Air Lines, Inc. demonstrates"));

    let flags = lines.iter().position(|l| *l == "RED FLAGS").unwrap();
    assert_eq!(lines[flags + 1], "United Airlines Holdings has negative net income");

    let order: Vec<usize> = [
        "EXECUTIVE SUMMARY",
        "KEY HIGHLIGHTS",
        "RED FLAGS",
        "COMPANY 1 STRENGTHS",
        "COMPANY 1 WEAKNESSES",
        "COMPANY 2 STRENGTHS",
        "COMPANY 2 WEAKNESSES",
        "RECOMMENDATION",
    ]
    .iter()
    .map(|title| lines.iter().position(|l| l == title).unwrap())
    .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert!(order.iter().all(|&i| lines[i - 1].is_empty()));
    assert!(
        lines
            .last()
            .unwrap()
            .starts_with("\"Delta Air Lines, Inc. appears to be the stronger")
    );
}

#[test]
fn test_comparison_json_mirrors_result() {
    let result = result();
    let json = result.export_to_string(ExportFormat::PrettyJson).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["company1"]["ticker"], "DAL");
    assert_eq!(
        value["comparisons"].as_array().unwrap().len(),
        result.comparisons.len()
    );
    assert_eq!(value["executive_summary"], result.executive_summary.as_str());
    // Equal CASM: the second company is named leader.
    assert_eq!(value["airline_leaders"]["casm"], "UAL");
}

#[test]
fn test_export_to_file() {
    let result = result();
    let path = std::env::temp_dir().join("contrail_output_test_comparison.csv");

    result.export_to_file(&path, ExportFormat::Csv).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("Metric,Company1 (DAL)"));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_ascii_report_filters() {
    let result = result();
    let report = ComparisonReport::new(&result);

    let all = report.to_ascii_table(MetricsFilter::All);
    assert!(all.contains("FINANCIAL METRICS"));
    assert!(all.contains("AIRLINE OPERATING METRICS"));
    assert!(all.contains("Total Revenue"));
    assert!(all.contains("$1.00K"));
    assert!(all.contains("Cost per ASM"));
    assert!(all.contains("17.00¢"));
    assert!(all.contains("Operational Efficiency Leaders:"));

    let financial = report.to_ascii_table(MetricsFilter::Financial);
    assert!(financial.contains("Total Revenue"));
    assert!(!financial.contains("AIRLINE OPERATING METRICS"));

    let operational = report.to_ascii_table(MetricsFilter::Operational);
    assert!(!operational.contains("FINANCIAL METRICS"));
    assert!(operational.contains("Passenger Yield"));
    assert!(operational.contains("Recommendation:"));
}

#[test]
fn test_markdown_report() {
    let result = result();
    let markdown = ComparisonReport::new(&result).to_markdown();

    assert!(markdown.starts_with("# DAL vs UAL"));
    assert!(markdown.contains("| Metric | DAL | UAL | Winner | Difference |"));
    assert!(markdown.contains("| Total Revenue | $1.00K | $800.00 | DAL | 25.00% |"));
    assert!(markdown.contains("## Red Flags"));
    assert!(markdown.contains("## Recommendation"));
}

#[test]
fn test_history_report() {
    let mut statements = Vec::new();
    for (year, revenue) in [(2022, dec!(900)), (2023, dec!(1000))] {
        let mut stmt = FinancialStatement::new("LUV", year);
        stmt.revenue = Some(revenue);
        stmt.net_income = Some(dec!(45));
        statements.push(stmt);
    }
    let financial: Vec<FinancialMetrics> = statements
        .iter()
        .map(|s| FinancialMetrics::derive(s, None))
        .collect();

    let table = MetricsHistoryReport::new("LUV", &financial, &[]).to_ascii_table();
    assert!(table.contains("Metric History: LUV"));
    assert!(table.contains("2022"));
    assert!(table.contains("2023"));
    assert!(table.contains("5.00%"));
    assert!(table.contains("4.50%"));
    assert!(!table.contains("Airline Operations"));
}
