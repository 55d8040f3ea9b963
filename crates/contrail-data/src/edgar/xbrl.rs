//! XBRL company facts parsing.
//!
//! The SEC publishes every XBRL fact a registrant has filed at
//! `https://data.sec.gov/api/xbrl/companyfacts/CIK{cik_padded}.json`.
//! [`XbrlDocument::parse_json`] flattens that payload into a list of
//! [`XbrlFact`]s which the statement extractor then queries by concept and
//! fiscal year.
//!
//! # Example
//!
//! ```no_run
//! use contrail_data::edgar::xbrl::{XbrlDocument, concepts};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = std::fs::read_to_string("CIK0000100517.json")?;
//! let doc = XbrlDocument::parse_json(&json)?;
//!
//! if let Some(fact) = doc.annual_fact(concepts::income_statement::REVENUES, 2023) {
//!     println!("FY2023 revenue: {} {}", fact.value, fact.unit);
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{DataError, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Shortest duration, in days, accepted as a fiscal-year period.
const MIN_ANNUAL_DAYS: i64 = 350;

/// Longest duration, in days, accepted as a fiscal-year period.
const MAX_ANNUAL_DAYS: i64 = 380;

/// Represents a single XBRL fact (data point).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XbrlFact {
    /// The XBRL concept name (e.g., "us-gaap:NetIncomeLoss")
    pub concept: String,

    /// The reported value
    pub value: Decimal,

    /// Unit of measure (e.g., "USD", "shares", "USD/shares")
    pub unit: String,

    /// End date of the reporting period
    pub period_end: NaiveDate,

    /// Start date of the reporting period (None for instant facts like balance sheet items)
    pub period_start: Option<NaiveDate>,

    /// Form type (e.g., "10-K", "10-Q")
    pub form: Option<String>,

    /// Fiscal year of the filing that reported the fact
    pub fiscal_year: Option<i32>,

    /// Fiscal period (e.g., "FY", "Q1")
    pub fiscal_period: Option<String>,

    /// Date the reporting filing was accepted
    pub filed: Option<NaiveDate>,
}

impl XbrlFact {
    /// Returns the duration in days if this is a duration fact
    pub fn duration_days(&self) -> Option<i64> {
        self.period_start
            .map(|start| self.period_end.signed_duration_since(start).num_days())
    }

    /// Returns true if the fact comes from an annual report and covers a full year.
    ///
    /// Instant facts from a 10-K qualify; duration facts must span roughly one year,
    /// which filters out the quarterly breakdowns some 10-Ks carry.
    pub fn is_annual(&self) -> bool {
        let annual_form = self
            .form
            .as_deref()
            .is_some_and(|form| form.starts_with("10-K"));

        annual_form
            && self
                .duration_days()
                .is_none_or(|days| (MIN_ANNUAL_DAYS..=MAX_ANNUAL_DAYS).contains(&days))
    }

    /// Calendar year in which the reporting period ends.
    pub fn period_year(&self) -> i32 {
        self.period_end.year()
    }
}

/// Represents a collection of XBRL facts for a company.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct XbrlDocument {
    /// All facts in the document
    pub facts: Vec<XbrlFact>,

    /// Company name
    pub entity_name: Option<String>,

    /// CIK (Central Index Key), zero-padded to 10 digits
    pub cik: Option<String>,
}

impl XbrlDocument {
    /// Creates a new empty XBRL document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses XBRL data from the SEC companyfacts JSON format
    pub fn parse_json(json: &str) -> Result<Self> {
        let api_response: SecApiResponse = serde_json::from_str(json)
            .map_err(|e| DataError::XbrlParse(format!("Failed to parse SEC JSON: {}", e)))?;

        let mut facts = Vec::new();

        for (taxonomy, taxonomy_facts) in &api_response.facts {
            for (concept_name, concept_data) in taxonomy_facts {
                let full_concept = format!("{}:{}", taxonomy, concept_name);

                for (unit, unit_facts) in &concept_data.units {
                    for fact_data in unit_facts {
                        let period_end = parse_date(&fact_data.end)?;
                        let period_start = fact_data.start.as_deref().map(parse_date).transpose()?;
                        let filed = fact_data.filed.as_deref().map(parse_date).transpose()?;

                        facts.push(XbrlFact {
                            concept: full_concept.clone(),
                            value: fact_data.val,
                            unit: unit.clone(),
                            period_end,
                            period_start,
                            form: fact_data.form.clone(),
                            fiscal_year: fact_data.fy,
                            fiscal_period: fact_data.fp.clone(),
                            filed,
                        });
                    }
                }
            }
        }

        let cik = match api_response.cik {
            serde_json::Value::Number(n) => n.as_u64().map(|v| format!("{:010}", v)),
            serde_json::Value::String(s) => Some(format!("{:0>10}", s.trim())),
            _ => None,
        };

        Ok(Self {
            facts,
            entity_name: api_response.entity_name,
            cik,
        })
    }

    /// Gets the annual fact for a concept whose period ends in `year`.
    ///
    /// When several filings report the same period (a 10-K carries prior-year
    /// comparatives), the most recently filed value is returned.
    pub fn annual_fact(&self, concept: &str, year: i32) -> Option<&XbrlFact> {
        self.facts
            .iter()
            .filter(|f| f.concept == concept && f.is_annual() && f.period_year() == year)
            .max_by_key(|f| (f.filed, f.period_end))
    }

    /// Years in which annual facts end, ascending.
    pub fn annual_years(&self) -> Vec<i32> {
        self.facts
            .iter()
            .filter(|f| f.is_annual())
            .map(XbrlFact::period_year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| DataError::XbrlParse(format!("Invalid date '{}': {}", value, e)))
}

// SEC API JSON structure
// Based on: https://www.sec.gov/edgar/sec-api-documentation

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecApiResponse {
    cik: serde_json::Value,
    #[serde(default)]
    entity_name: Option<String>,
    facts: HashMap<String, HashMap<String, ConceptData>>,
}

#[derive(Debug, Deserialize)]
struct ConceptData {
    #[serde(default)]
    units: HashMap<String, Vec<FactData>>,
}

#[derive(Debug, Deserialize)]
struct FactData {
    end: String,
    #[serde(with = "rust_decimal::serde::float")]
    val: Decimal,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    fy: Option<i32>,
    #[serde(default)]
    fp: Option<String>,
    #[serde(default)]
    form: Option<String>,
    #[serde(default)]
    filed: Option<String>,
}

/// US-GAAP concepts used by the statement extractor
pub mod concepts {
    /// Income statement concepts
    pub mod income_statement {
        /// Total revenue
        pub const REVENUES: &str = "us-gaap:Revenues";
        /// Revenue from contracts with customers, including assessed tax
        pub const REVENUE_INCLUDING_TAX: &str =
            "us-gaap:RevenueFromContractWithCustomerIncludingAssessedTax";
        /// Revenue from contracts with customers, excluding assessed tax
        pub const REVENUE_EXCLUDING_TAX: &str =
            "us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax";
        /// Operating revenue
        pub const OPERATING_REVENUE: &str = "us-gaap:OperatingRevenue";
        /// Net sales (pre-ASC 606 filers)
        pub const SALES_REVENUE_NET: &str = "us-gaap:SalesRevenueNet";
        /// Passenger revenue
        pub const PASSENGER_REVENUE: &str = "us-gaap:PassengerRevenue";
        /// Cost of revenue
        pub const COST_OF_REVENUE: &str = "us-gaap:CostOfRevenue";
        /// Gross profit
        pub const GROSS_PROFIT: &str = "us-gaap:GrossProfit";
        /// Total operating expenses
        pub const OPERATING_EXPENSES: &str = "us-gaap:OperatingExpenses";
        /// Costs and expenses
        pub const COSTS_AND_EXPENSES: &str = "us-gaap:CostsAndExpenses";
        /// Operating income (loss)
        pub const OPERATING_INCOME: &str = "us-gaap:OperatingIncomeLoss";
        /// Net income (loss)
        pub const NET_INCOME: &str = "us-gaap:NetIncomeLoss";
        /// Profit (loss) including noncontrolling interest
        pub const PROFIT_LOSS: &str = "us-gaap:ProfitLoss";
        /// Interest expense
        pub const INTEREST_EXPENSE: &str = "us-gaap:InterestExpense";
        /// Interest expense, non-operating
        pub const INTEREST_EXPENSE_NONOPERATING: &str = "us-gaap:InterestExpenseNonoperating";
        /// Depreciation and amortization
        pub const DEPRECIATION_AMORTIZATION: &str = "us-gaap:DepreciationDepletionAndAmortization";
        /// Aircraft fuel expense
        pub const FUEL_COSTS: &str = "us-gaap:FuelCosts";
        /// Aircraft fuel and related taxes
        pub const AIRCRAFT_FUEL: &str = "us-gaap:AircraftFuelAndRelatedTaxes";
        /// Salaries, wages and benefits
        pub const LABOR_AND_RELATED: &str = "us-gaap:LaborAndRelatedExpense";
        /// Salaries and wages
        pub const SALARIES_AND_WAGES: &str = "us-gaap:SalariesAndWages";
    }

    /// Balance sheet concepts
    pub mod balance_sheet {
        /// Total assets
        pub const ASSETS: &str = "us-gaap:Assets";
        /// Current assets
        pub const CURRENT_ASSETS: &str = "us-gaap:AssetsCurrent";
        /// Cash and cash equivalents
        pub const CASH: &str = "us-gaap:CashAndCashEquivalentsAtCarryingValue";
        /// Short-term investments
        pub const SHORT_TERM_INVESTMENTS: &str = "us-gaap:ShortTermInvestments";
        /// Available-for-sale securities, current
        pub const MARKETABLE_SECURITIES: &str = "us-gaap:MarketableSecuritiesCurrent";
        /// Accounts receivable, net
        pub const RECEIVABLES: &str = "us-gaap:AccountsReceivableNetCurrent";
        /// Inventory, net
        pub const INVENTORY: &str = "us-gaap:InventoryNet";
        /// Aircraft spare parts and supplies
        pub const AIRCRAFT_PARTS: &str = "us-gaap:AircraftMaintenanceMaterialsAndRepairs";
        /// Total liabilities
        pub const LIABILITIES: &str = "us-gaap:Liabilities";
        /// Current liabilities
        pub const CURRENT_LIABILITIES: &str = "us-gaap:LiabilitiesCurrent";
        /// Long-term debt
        pub const LONG_TERM_DEBT: &str = "us-gaap:LongTermDebt";
        /// Long-term debt, non-current
        pub const LONG_TERM_DEBT_NONCURRENT: &str = "us-gaap:LongTermDebtNoncurrent";
        /// Long-term debt and finance leases
        pub const LONG_TERM_DEBT_AND_LEASES: &str =
            "us-gaap:LongTermDebtAndCapitalLeaseObligations";
        /// Stockholders' equity
        pub const STOCKHOLDERS_EQUITY: &str = "us-gaap:StockholdersEquity";
        /// Stockholders' equity including noncontrolling interest
        pub const STOCKHOLDERS_EQUITY_TOTAL: &str =
            "us-gaap:StockholdersEquityIncludingPortionAttributableToNoncontrollingInterest";
    }

    /// Cash flow statement concepts
    pub mod cash_flow {
        /// Operating cash flows
        pub const OPERATING_CASH_FLOW: &str = "us-gaap:NetCashProvidedByUsedInOperatingActivities";
        /// Purchases of property and equipment
        pub const CAPEX: &str = "us-gaap:PaymentsToAcquirePropertyPlantAndEquipment";
        /// Flight equipment purchases
        pub const CAPEX_FLIGHT_EQUIPMENT: &str = "us-gaap:PaymentsToAcquireProductiveAssets";
        /// Dividends paid
        pub const DIVIDENDS_PAID: &str = "us-gaap:PaymentsOfDividends";
    }

    /// Per-share concepts
    pub mod per_share {
        /// Earnings per share - basic
        pub const EPS_BASIC: &str = "us-gaap:EarningsPerShareBasic";
        /// Earnings per share - diluted
        pub const EPS_DILUTED: &str = "us-gaap:EarningsPerShareDiluted";
        /// Common shares outstanding
        pub const SHARES_OUTSTANDING: &str = "us-gaap:CommonStockSharesOutstanding";
        /// Weighted average basic shares outstanding
        pub const WEIGHTED_SHARES_BASIC: &str =
            "us-gaap:WeightedAverageNumberOfSharesOutstandingBasic";
        /// Shares outstanding from the cover page
        pub const DEI_SHARES_OUTSTANDING: &str = "dei:EntityCommonStockSharesOutstanding";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn fact(concept: &str, value: Decimal, end: (i32, u32, u32), filed: (i32, u32, u32)) -> XbrlFact {
        XbrlFact {
            concept: concept.to_string(),
            value,
            unit: "USD".to_string(),
            period_end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            period_start: None,
            form: Some("10-K".to_string()),
            fiscal_year: Some(filed.0),
            fiscal_period: Some("FY".to_string()),
            filed: NaiveDate::from_ymd_opt(filed.0, filed.1, filed.2),
        }
    }

    #[test]
    fn test_xbrl_fact_duration() {
        let mut f = fact("us-gaap:NetIncomeLoss", dec!(100), (2023, 12, 31), (2024, 2, 20));
        f.period_start = NaiveDate::from_ymd_opt(2023, 1, 1);

        assert_eq!(f.duration_days(), Some(364));
        assert!(f.is_annual());
        assert_eq!(f.period_year(), 2023);
    }

    #[test]
    fn test_quarter_inside_10k_is_not_annual() {
        let mut f = fact("us-gaap:Revenues", dec!(100), (2023, 12, 31), (2024, 2, 20));
        f.period_start = NaiveDate::from_ymd_opt(2023, 10, 1);
        assert!(!f.is_annual());

        let mut q = fact("us-gaap:Revenues", dec!(100), (2023, 9, 30), (2023, 10, 20));
        q.form = Some("10-Q".to_string());
        assert!(!q.is_annual());
    }

    #[test]
    fn test_annual_fact_prefers_latest_filing() {
        let mut doc = XbrlDocument::new();
        doc.facts.push(fact("us-gaap:Assets", dec!(1000), (2022, 12, 31), (2023, 2, 15)));
        doc.facts.push(fact("us-gaap:Assets", dec!(1010), (2022, 12, 31), (2024, 2, 20)));
        doc.facts.push(fact("us-gaap:Assets", dec!(1200), (2023, 12, 31), (2024, 2, 20)));

        let fy2022 = doc.annual_fact("us-gaap:Assets", 2022).unwrap();
        assert_eq!(fy2022.value, dec!(1010));

        assert_eq!(doc.annual_years(), vec![2022, 2023]);
        assert!(doc.annual_fact("us-gaap:Assets", 2021).is_none());
        assert_eq!(doc.annual_fact("us-gaap:Assets", 2023).unwrap().value, dec!(1200));
    }

    #[test]
    fn test_parse_json_companyfacts() {
        let json = r#"{
            "cik": 100517,
            "entityName": "United Airlines Holdings, Inc.",
            "facts": {
                "us-gaap": {
                    "Revenues": {
                        "label": "Revenues",
                        "description": "Amount of revenue",
                        "units": {
                            "USD": [
                                {"start": "2023-01-01", "end": "2023-12-31", "val": 53717000000,
                                 "accn": "0000100517-24-000012", "fy": 2023, "fp": "FY",
                                 "form": "10-K", "filed": "2024-02-22"}
                            ]
                        }
                    }
                }
            }
        }"#;

        let doc = XbrlDocument::parse_json(json).unwrap();
        assert_eq!(doc.cik.as_deref(), Some("0000100517"));
        assert_eq!(doc.entity_name.as_deref(), Some("United Airlines Holdings, Inc."));
        assert_eq!(doc.facts.len(), 1);

        let revenue = doc.annual_fact(concepts::income_statement::REVENUES, 2023).unwrap();
        assert_eq!(revenue.value, dec!(53717000000));
        assert_eq!(revenue.filed, NaiveDate::from_ymd_opt(2024, 2, 22));
    }

    #[rstest]
    #[case(r#"27904"#, Some("0000027904"))]
    #[case(r#""27904""#, Some("0000027904"))]
    #[case(r#""0000027904""#, Some("0000027904"))]
    #[case("null", None)]
    fn test_parse_json_pads_cik(#[case] cik: &str, #[case] expected: Option<&str>) {
        let json = format!(
            r#"{{"cik": {}, "entityName": "Delta Air Lines, Inc.", "facts": {{}}}}"#,
            cik
        );
        let doc = XbrlDocument::parse_json(&json).unwrap();
        assert_eq!(doc.cik.as_deref(), expected);
    }

    #[test]
    fn test_parse_json_invalid() {
        let result = XbrlDocument::parse_json("invalid json");
        assert!(matches!(result, Err(DataError::XbrlParse(_))));
    }
}
