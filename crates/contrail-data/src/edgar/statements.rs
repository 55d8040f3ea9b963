//! Annual statement extraction from XBRL company facts.
//!
//! Registrants tag the same line item with different US-GAAP concepts, and a
//! single company may switch concepts between years (for example after ASC 606).
//! [`StatementExtractor`] tries each known concept for a field in priority
//! order and takes the first annual value reported for the fiscal year.

use super::xbrl::{XbrlDocument, XbrlFact, concepts};
use crate::model::FinancialStatement;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

type DecimalField = fn(&mut FinancialStatement) -> &mut Option<Decimal>;

/// Concepts tried, in order, to fill one statement field.
#[derive(Debug, Clone)]
struct TagMapping {
    field: &'static str,
    concepts: &'static [&'static str],
    slot: DecimalField,
}

const fn map(
    field: &'static str,
    concepts: &'static [&'static str],
    slot: DecimalField,
) -> TagMapping {
    TagMapping {
        field,
        concepts,
        slot,
    }
}

fn default_mappings() -> Vec<TagMapping> {
    use concepts::{balance_sheet as bs, cash_flow as cf, income_statement as is, per_share as ps};

    vec![
        map(
            "revenue",
            &[
                is::REVENUES,
                is::REVENUE_EXCLUDING_TAX,
                is::REVENUE_INCLUDING_TAX,
                is::OPERATING_REVENUE,
                is::SALES_REVENUE_NET,
            ],
            |s| &mut s.revenue,
        ),
        map("cost_of_goods_sold", &[is::COST_OF_REVENUE], |s| {
            &mut s.cost_of_goods_sold
        }),
        map("gross_profit", &[is::GROSS_PROFIT], |s| &mut s.gross_profit),
        map(
            "operating_expenses",
            &[is::OPERATING_EXPENSES, is::COSTS_AND_EXPENSES],
            |s| &mut s.operating_expenses,
        ),
        map("operating_income", &[is::OPERATING_INCOME], |s| {
            &mut s.operating_income
        }),
        map("net_income", &[is::NET_INCOME, is::PROFIT_LOSS], |s| {
            &mut s.net_income
        }),
        map(
            "interest_expense",
            &[is::INTEREST_EXPENSE, is::INTEREST_EXPENSE_NONOPERATING],
            |s| &mut s.interest_expense,
        ),
        map("fuel_expense", &[is::FUEL_COSTS, is::AIRCRAFT_FUEL], |s| {
            &mut s.fuel_expense
        }),
        map(
            "labor_expense",
            &[is::LABOR_AND_RELATED, is::SALARIES_AND_WAGES],
            |s| &mut s.labor_expense,
        ),
        map("passenger_revenue", &[is::PASSENGER_REVENUE], |s| {
            &mut s.passenger_revenue
        }),
        map("total_assets", &[bs::ASSETS], |s| &mut s.total_assets),
        map("current_assets", &[bs::CURRENT_ASSETS], |s| {
            &mut s.current_assets
        }),
        map("cash_and_equivalents", &[bs::CASH], |s| {
            &mut s.cash_and_equivalents
        }),
        map(
            "marketable_securities",
            &[bs::SHORT_TERM_INVESTMENTS, bs::MARKETABLE_SECURITIES],
            |s| &mut s.marketable_securities,
        ),
        map("accounts_receivable", &[bs::RECEIVABLES], |s| {
            &mut s.accounts_receivable
        }),
        map("inventory", &[bs::INVENTORY, bs::AIRCRAFT_PARTS], |s| {
            &mut s.inventory
        }),
        map("total_liabilities", &[bs::LIABILITIES], |s| {
            &mut s.total_liabilities
        }),
        map("current_liabilities", &[bs::CURRENT_LIABILITIES], |s| {
            &mut s.current_liabilities
        }),
        map(
            "long_term_debt",
            &[
                bs::LONG_TERM_DEBT,
                bs::LONG_TERM_DEBT_AND_LEASES,
                bs::LONG_TERM_DEBT_NONCURRENT,
            ],
            |s| &mut s.long_term_debt,
        ),
        map(
            "shareholder_equity",
            &[bs::STOCKHOLDERS_EQUITY, bs::STOCKHOLDERS_EQUITY_TOTAL],
            |s| &mut s.shareholder_equity,
        ),
        map("operating_cash_flow", &[cf::OPERATING_CASH_FLOW], |s| {
            &mut s.operating_cash_flow
        }),
        map(
            "capital_expenditures",
            &[cf::CAPEX, cf::CAPEX_FLIGHT_EQUIPMENT],
            |s| &mut s.capital_expenditures,
        ),
        map("dividends_paid", &[cf::DIVIDENDS_PAID], |s| {
            &mut s.dividends_paid
        }),
        map(
            "earnings_per_share",
            &[ps::EPS_DILUTED, ps::EPS_BASIC],
            |s| &mut s.earnings_per_share,
        ),
        map(
            "depreciation_amortization",
            &[is::DEPRECIATION_AMORTIZATION],
            |s| &mut s.depreciation_amortization,
        ),
    ]
}

/// Share count concepts, tried in order.
const SHARE_CONCEPTS: &[&str] = &[
    concepts::per_share::SHARES_OUTSTANDING,
    concepts::per_share::WEIGHTED_SHARES_BASIC,
];

/// Builds one [`FinancialStatement`] per fiscal year from an [`XbrlDocument`].
#[derive(Debug, Clone)]
pub struct StatementExtractor {
    mappings: Vec<TagMapping>,
}

impl Default for StatementExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementExtractor {
    /// Create an extractor with the standard US-GAAP concept mappings.
    pub fn new() -> Self {
        Self {
            mappings: default_mappings(),
        }
    }

    /// Extract every fiscal year found in the document, ascending by year.
    ///
    /// Years for which neither revenue nor total assets were reported are skipped.
    pub fn extract(&self, symbol: &str, doc: &XbrlDocument) -> Vec<FinancialStatement> {
        doc.annual_years()
            .into_iter()
            .filter_map(|year| self.extract_year(symbol, doc, year))
            .collect()
    }

    /// Extract the statement for a single fiscal year.
    pub fn extract_year(
        &self,
        symbol: &str,
        doc: &XbrlDocument,
        fiscal_year: i32,
    ) -> Option<FinancialStatement> {
        let mut statement = FinancialStatement::new(symbol.to_uppercase(), fiscal_year);
        let mut anchor: Option<&XbrlFact> = None;

        for mapping in &self.mappings {
            let found = mapping
                .concepts
                .iter()
                .find_map(|concept| doc.annual_fact(concept, fiscal_year));

            if let Some(fact) = found {
                *(mapping.slot)(&mut statement) = Some(fact.value);
                if matches!(mapping.field, "revenue" | "total_assets") && anchor.is_none() {
                    anchor = Some(fact);
                }
            }
        }

        let anchor = anchor?;
        statement.period_end = Some(anchor.period_end);
        statement.filing_date = anchor.filed;

        statement.shares_outstanding = SHARE_CONCEPTS
            .iter()
            .find_map(|concept| doc.annual_fact(concept, fiscal_year))
            .and_then(|fact| fact.value.round().to_i64());

        statement.fill_derived();

        debug!(
            symbol = %statement.symbol,
            fiscal_year,
            revenue = ?statement.revenue,
            "Extracted annual statement"
        );

        Some(statement)
    }
}
