//! End-to-end: companyfacts JSON to a stored, compared company.

use contrail::data::edgar::XbrlDocument;
use contrail::data::{CompanyProfile, StatementStore, read_capacity_csv};
use contrail::{AirlineRegistry, CompanyAnalysis, compare_companies, ingest_company_facts};

const FACTS: &str = include_str!("../../contrail-data/tests/fixtures/companyfacts_sample.json");

const CAPACITY: &str = "\
fiscal_year,available_seat_miles,revenue_passenger_miles,unit,passengers,employees
2022,247858,207791,millions,,
2023,291333,244347,millions,,100000
";

fn ingest(store: &StatementStore) -> usize {
    let doc = XbrlDocument::parse_json(FACTS).unwrap();
    let carrier = AirlineRegistry::new().lookup("dal").cloned().unwrap();
    let profile = CompanyProfile::new(carrier.ticker, carrier.padded_cik(), carrier.name);
    let capacity = read_capacity_csv(CAPACITY.as_bytes(), carrier.ticker).unwrap();
    ingest_company_facts(store, &profile, &doc, &capacity).unwrap()
}

#[test]
fn test_ingest_and_analyze() {
    let store = StatementStore::in_memory().unwrap();
    let stored = ingest(&store);
    assert!(stored >= 2);

    let analysis = CompanyAnalysis::load(&store, "DAL").unwrap();
    assert_eq!(analysis.profile.name, "Delta Air Lines, Inc.");
    assert_eq!(analysis.latest_year(), Some(2023));
    assert_eq!(analysis.metrics.len(), analysis.statements.len());

    let snapshot = analysis.latest_snapshot().unwrap();
    let airline = snapshot.airline.as_ref().unwrap();
    let load_factor = airline.load_factor.unwrap();
    assert!((load_factor - 244_347.0 / 291_333.0 * 100.0).abs() < 1e-9);
}

#[test]
fn test_compare_with_itself_is_neutral() {
    let store = StatementStore::in_memory().unwrap();
    ingest(&store);
    let analysis = CompanyAnalysis::load(&store, "DAL").unwrap();

    let result = compare_companies(&analysis, &analysis).unwrap();
    assert_eq!(result.comparisons.len(), 13);
    assert!(
        result
            .comparisons
            .iter()
            .all(|c| c.winner == contrail::compare::Winner::Neutral)
    );
    assert!(result.recommendation.starts_with("Both companies show comparable"));
}
