//! Raw company records supplied to the metrics engine.
//!
//! Monetary amounts are kept as [`Decimal`] so that reported dollar figures
//! never drift; counts (shares, seat miles, passengers) are integers. Every
//! reported figure is optional: an absent field is not an error, the engine
//! decides how absence degrades.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One fiscal year of reported figures for a company.
///
/// Statements are keyed by `(symbol, fiscal_year)`; a company has at most one
/// statement per fiscal year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialStatement {
    /// Ticker symbol
    pub symbol: String,
    /// Fiscal year the statement covers
    pub fiscal_year: i32,
    /// Period end date, when known
    pub period_end: Option<NaiveDate>,
    /// Date the underlying 10-K was filed, when known
    pub filing_date: Option<NaiveDate>,

    // Income statement
    /// Total operating revenue
    pub revenue: Option<Decimal>,
    /// Cost of goods sold (cost of revenue)
    pub cost_of_goods_sold: Option<Decimal>,
    /// Gross profit
    pub gross_profit: Option<Decimal>,
    /// Operating income (loss)
    pub operating_income: Option<Decimal>,
    /// Total operating expenses
    pub operating_expenses: Option<Decimal>,
    /// Net income (loss)
    pub net_income: Option<Decimal>,
    /// Earnings before interest and taxes
    pub ebit: Option<Decimal>,
    /// Earnings before interest, taxes, depreciation and amortization
    pub ebitda: Option<Decimal>,
    /// Interest expense
    pub interest_expense: Option<Decimal>,
    /// Depreciation and amortization
    pub depreciation_amortization: Option<Decimal>,

    // Balance sheet
    /// Total assets
    pub total_assets: Option<Decimal>,
    /// Current assets
    pub current_assets: Option<Decimal>,
    /// Cash and cash equivalents
    pub cash_and_equivalents: Option<Decimal>,
    /// Marketable securities (short-term investments)
    pub marketable_securities: Option<Decimal>,
    /// Accounts receivable
    pub accounts_receivable: Option<Decimal>,
    /// Inventory (spare parts, fuel and supplies for carriers)
    pub inventory: Option<Decimal>,
    /// Total liabilities
    pub total_liabilities: Option<Decimal>,
    /// Current liabilities
    pub current_liabilities: Option<Decimal>,
    /// Total debt
    pub total_debt: Option<Decimal>,
    /// Long-term debt
    pub long_term_debt: Option<Decimal>,
    /// Shareholders' equity
    pub shareholder_equity: Option<Decimal>,

    // Cash flow
    /// Net cash provided by operating activities
    pub operating_cash_flow: Option<Decimal>,
    /// Capital expenditures (sign as reported)
    pub capital_expenditures: Option<Decimal>,
    /// Free cash flow
    pub free_cash_flow: Option<Decimal>,
    /// Dividends paid
    pub dividends_paid: Option<Decimal>,

    // Airline cost and revenue lines
    /// Aircraft fuel expense
    pub fuel_expense: Option<Decimal>,
    /// Salaries, wages and benefits
    pub labor_expense: Option<Decimal>,
    /// Passenger revenue
    pub passenger_revenue: Option<Decimal>,

    // Per share
    /// Earnings per share as reported
    pub earnings_per_share: Option<Decimal>,
    /// Book value per share as reported
    pub book_value_per_share: Option<Decimal>,
    /// Common shares outstanding
    pub shares_outstanding: Option<i64>,
}

impl FinancialStatement {
    /// Create an empty statement for a symbol and fiscal year.
    pub fn new(symbol: impl Into<String>, fiscal_year: i32) -> Self {
        Self {
            symbol: symbol.into(),
            fiscal_year,
            ..Self::default()
        }
    }

    /// Fill derived fields that were not reported directly.
    ///
    /// Reported values always win; only `None` fields are filled:
    /// - gross profit = revenue - cost of goods sold
    /// - EBIT = operating income
    /// - EBITDA = EBIT + depreciation and amortization
    /// - operating expenses = revenue - operating income
    /// - free cash flow = operating cash flow - |capital expenditures|
    /// - total debt = long-term debt
    pub fn fill_derived(&mut self) {
        if self.gross_profit.is_none()
            && let (Some(revenue), Some(cogs)) = (self.revenue, self.cost_of_goods_sold)
        {
            self.gross_profit = Some(revenue - cogs);
        }

        if self.ebit.is_none() {
            self.ebit = self.operating_income;
        }

        if self.ebitda.is_none()
            && let (Some(ebit), Some(da)) = (self.ebit, self.depreciation_amortization)
        {
            self.ebitda = Some(ebit + da);
        }

        if self.operating_expenses.is_none()
            && let (Some(revenue), Some(operating_income)) = (self.revenue, self.operating_income)
        {
            self.operating_expenses = Some(revenue - operating_income);
        }

        if self.free_cash_flow.is_none()
            && let Some(ocf) = self.operating_cash_flow
        {
            let capex = self.capital_expenditures.unwrap_or_default().abs();
            self.free_cash_flow = Some(ocf - capex);
        }

        if self.total_debt.is_none() {
            self.total_debt = self.long_term_debt;
        }
    }
}

/// Scale in which capacity and traffic counts are reported.
///
/// Carriers publish ASMs and RPMs in thousands or millions in their operating
/// statistics tables; counts are stored as reported and scaled on use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityUnit {
    /// Raw statute miles
    Miles,
    /// Thousands of miles
    #[default]
    Thousands,
    /// Millions of miles
    Millions,
}

impl CapacityUnit {
    /// Number of statute miles in one reported unit.
    pub const fn multiplier(&self) -> u64 {
        match self {
            Self::Miles => 1,
            Self::Thousands => 1_000,
            Self::Millions => 1_000_000,
        }
    }

    /// Parse a unit label (`miles`, `thousands`, `millions`, or `1`/`k`/`m`).
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "miles" | "mile" | "1" => Some(Self::Miles),
            "thousands" | "thousand" | "k" | "000s" => Some(Self::Thousands),
            "millions" | "million" | "m" | "mm" => Some(Self::Millions),
            _ => None,
        }
    }
}

/// Operating capacity and traffic counts for one fiscal year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineCapacity {
    /// Ticker symbol
    pub symbol: String,
    /// Fiscal year the counts cover
    pub fiscal_year: i32,
    /// Available seat miles, in `unit`
    pub available_seat_miles: Option<u64>,
    /// Revenue passenger miles, in `unit`
    pub revenue_passenger_miles: Option<u64>,
    /// Scale of the two mileage counts
    pub unit: CapacityUnit,
    /// Passengers enplaned
    pub passengers: Option<u64>,
    /// Full-time equivalent employees
    pub employees: Option<u64>,
}

impl AirlineCapacity {
    /// Create a capacity record with mileage counts in the given unit.
    pub fn new(
        symbol: impl Into<String>,
        fiscal_year: i32,
        available_seat_miles: Option<u64>,
        revenue_passenger_miles: Option<u64>,
        unit: CapacityUnit,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            fiscal_year,
            available_seat_miles,
            revenue_passenger_miles,
            unit,
            passengers: None,
            employees: None,
        }
    }

    /// Available seat miles scaled to statute miles.
    pub fn asm_miles(&self) -> Option<f64> {
        self.available_seat_miles
            .map(|asm| asm as f64 * self.unit.multiplier() as f64)
    }

    /// Revenue passenger miles scaled to statute miles.
    pub fn rpm_miles(&self) -> Option<f64> {
        self.revenue_passenger_miles
            .map(|rpm| rpm as f64 * self.unit.multiplier() as f64)
    }
}

/// Identity of a company in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Ticker symbol (upper case)
    pub symbol: String,
    /// SEC Central Index Key, zero-padded to 10 digits
    pub cik: Option<String>,
    /// Registrant name
    pub name: String,
}

impl CompanyProfile {
    /// Create a profile, normalizing the ticker to upper case.
    pub fn new(symbol: &str, cik: Option<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            cik,
            name: name.into(),
        }
    }
}
