//! Financial ratios derived from a single annual statement.
//!
//! Every ratio follows the guard in [`crate::ratio::ratio`]: a denominator that
//! is missing, zero or negative yields `0.0`. A handful of fields skip
//! computation instead and stay `None`:
//!
//! - interest and EBITDA coverage, unless interest expense is positive
//! - capex to operating cash flow, unless operating cash flow is positive
//! - every growth field, unless a prior year exists with a positive base

use crate::ratio::{days_outstanding, decimal_to_f64, optional_growth, ratio};
use contrail_data::FinancialStatement;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ratios derived from one fiscal year's statement.
///
/// Fields are grouped the way they are reported: profitability, liquidity,
/// working-capital cycle, solvency, efficiency, growth, cash flow, balance
/// sheet quality and per-share values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    /// Ticker symbol
    pub symbol: String,
    /// Fiscal year of the source statement
    pub fiscal_year: i32,

    // Profitability
    /// Gross profit / revenue
    pub gross_margin: f64,
    /// Operating income / revenue
    pub operating_margin: f64,
    /// Net income / revenue
    pub net_margin: f64,
    /// EBITDA / revenue
    pub ebitda_margin: f64,
    /// Net income / total assets
    pub return_on_assets: f64,
    /// Net income / shareholders' equity
    pub return_on_equity: f64,
    /// Operating income / (total debt + equity), not tax-adjusted
    pub return_on_invested_capital: f64,
    /// EBIT / (total assets - current liabilities)
    pub return_on_capital_employed: f64,
    /// Operating cash flow / total assets
    pub cash_flow_return_on_assets: f64,
    /// Operating cash flow / shareholders' equity
    pub cash_flow_return_on_equity: f64,

    // Liquidity
    /// Current assets / current liabilities
    pub current_ratio: f64,
    /// (Cash + marketable securities + receivables) / current liabilities
    pub quick_ratio: f64,
    /// Cash / current liabilities
    pub cash_ratio: f64,
    /// Operating cash flow / current liabilities
    pub operating_cash_flow_ratio: f64,
    /// Current assets - current liabilities
    pub working_capital: Decimal,
    /// Working capital / total assets
    pub working_capital_ratio: f64,

    // Working-capital cycle
    /// Receivables / revenue * 365
    pub days_sales_outstanding: f64,
    /// Inventory / cost of goods sold * 365
    pub days_inventory_outstanding: f64,
    /// Always 0: accounts payable is not captured
    pub days_payables_outstanding: f64,
    /// DSO + DIO - DPO
    pub cash_conversion_cycle: f64,

    // Solvency
    /// Total debt / equity
    pub debt_to_equity: f64,
    /// Total debt / total assets
    pub debt_to_assets: f64,
    /// Total assets / equity
    pub equity_multiplier: f64,
    /// EBIT / interest expense, only when interest expense is positive
    pub interest_coverage: Option<f64>,
    /// EBITDA / interest expense, only when interest expense is positive
    pub ebitda_coverage: Option<f64>,
    /// Total debt - cash
    pub net_debt: Decimal,
    /// Always 0: principal repayments are not captured
    pub debt_service_coverage: f64,

    // Efficiency
    /// Revenue / total assets
    pub asset_turnover: f64,
    /// Revenue / (total assets - current assets)
    pub fixed_asset_turnover: f64,
    /// Revenue / (current assets - current liabilities)
    pub working_capital_turnover: f64,
    /// Cost of goods sold / inventory
    pub inventory_turnover: f64,
    /// Revenue / receivables
    pub receivables_turnover: f64,
    /// Always 0: accounts payable is not captured
    pub payables_turnover: f64,
    /// Operating expenses / revenue
    pub operating_expense_ratio: f64,
    /// Always 0: SG&A is not captured
    pub sga_to_revenue: f64,

    // Growth (fractions, year over year)
    /// Revenue growth
    pub revenue_growth: Option<f64>,
    /// Operating income growth
    pub operating_income_growth: Option<f64>,
    /// Net income growth
    pub net_income_growth: Option<f64>,
    /// EBITDA growth
    pub ebitda_growth: Option<f64>,
    /// Earnings per share growth
    pub eps_growth: Option<f64>,
    /// Free cash flow growth
    pub free_cash_flow_growth: Option<f64>,

    // Cash flow
    /// Free cash flow as reported or derived
    pub free_cash_flow: Decimal,
    /// Free cash flow / revenue
    pub free_cash_flow_margin: f64,
    /// Operating cash flow / revenue
    pub operating_cash_flow_margin: f64,
    /// Operating cash flow / net income
    pub cash_flow_to_net_income: f64,
    /// Free cash flow / net income
    pub free_cash_flow_to_net_income: f64,
    /// |Capex| / operating cash flow, only when operating cash flow is positive
    pub capex_to_operating_cash_flow: Option<f64>,
    /// |Capex| / revenue
    pub capex_to_revenue: f64,
    /// Always 0: depreciation is not separated from capex
    pub capex_to_depreciation: f64,
    /// Always 0: requires a market price
    pub free_cash_flow_yield: f64,

    // Balance sheet quality
    /// Always 0: intangibles are not captured
    pub intangibles_to_assets: f64,

    // Per share
    /// Net income / shares, or the reported EPS without a share count
    pub earnings_per_share: f64,
    /// Equity / shares, or the reported book value per share without a share count
    pub book_value_per_share: f64,
    /// Free cash flow / shares
    pub free_cash_flow_per_share: f64,
    /// Revenue / shares
    pub revenue_per_share: f64,
}

/// Raw figures pulled out of a statement once, as `f64`.
#[derive(Debug, Clone, Copy)]
struct Figures {
    revenue: f64,
    cogs: f64,
    gross_profit: f64,
    operating_income: f64,
    operating_expenses: f64,
    net_income: f64,
    ebit: f64,
    ebitda: f64,
    interest_expense: f64,
    total_assets: f64,
    current_assets: f64,
    cash: f64,
    marketable_securities: f64,
    receivables: f64,
    inventory: f64,
    current_liabilities: f64,
    total_debt: f64,
    equity: f64,
    operating_cash_flow: f64,
    capex: f64,
    free_cash_flow: f64,
    shares: f64,
}

impl Figures {
    fn from_statement(stmt: &FinancialStatement) -> Self {
        Self {
            revenue: decimal_to_f64(stmt.revenue),
            cogs: decimal_to_f64(stmt.cost_of_goods_sold),
            gross_profit: decimal_to_f64(stmt.gross_profit),
            operating_income: decimal_to_f64(stmt.operating_income),
            operating_expenses: decimal_to_f64(stmt.operating_expenses),
            net_income: decimal_to_f64(stmt.net_income),
            ebit: decimal_to_f64(stmt.ebit),
            ebitda: decimal_to_f64(stmt.ebitda),
            interest_expense: decimal_to_f64(stmt.interest_expense),
            total_assets: decimal_to_f64(stmt.total_assets),
            current_assets: decimal_to_f64(stmt.current_assets),
            cash: decimal_to_f64(stmt.cash_and_equivalents),
            marketable_securities: decimal_to_f64(stmt.marketable_securities),
            receivables: decimal_to_f64(stmt.accounts_receivable),
            inventory: decimal_to_f64(stmt.inventory),
            current_liabilities: decimal_to_f64(stmt.current_liabilities),
            total_debt: decimal_to_f64(stmt.total_debt),
            equity: decimal_to_f64(stmt.shareholder_equity),
            operating_cash_flow: decimal_to_f64(stmt.operating_cash_flow),
            capex: decimal_to_f64(stmt.capital_expenditures).abs(),
            free_cash_flow: decimal_to_f64(stmt.free_cash_flow),
            shares: stmt.shares_outstanding.unwrap_or(0) as f64,
        }
    }

    /// EPS from the share count, falling back to the reported figure.
    fn earnings_per_share(&self, stmt: &FinancialStatement) -> f64 {
        if self.shares > 0.0 {
            self.net_income / self.shares
        } else {
            decimal_to_f64(stmt.earnings_per_share)
        }
    }
}

impl FinancialMetrics {
    /// Derive metrics for `statement`, using `previous` (the prior fiscal year) for growth.
    pub fn derive(statement: &FinancialStatement, previous: Option<&FinancialStatement>) -> Self {
        let f = Figures::from_statement(statement);
        let prior = previous.map(Figures::from_statement);

        let current_assets = statement.current_assets.unwrap_or_default();
        let current_liabilities = statement.current_liabilities.unwrap_or_default();
        let working_capital = current_assets - current_liabilities;
        let net_debt = statement.total_debt.unwrap_or_default()
            - statement.cash_and_equivalents.unwrap_or_default();

        let dso = days_outstanding(f.receivables, f.revenue);
        let dio = days_outstanding(f.inventory, f.cogs);
        let dpo = 0.0;

        let interest_coverage =
            (f.interest_expense > 0.0).then(|| ratio(f.ebit, f.interest_expense));
        let ebitda_coverage =
            (f.interest_expense > 0.0).then(|| ratio(f.ebitda, f.interest_expense));
        let capex_to_operating_cash_flow =
            (f.operating_cash_flow > 0.0).then(|| f.capex / f.operating_cash_flow);

        let eps = f.earnings_per_share(statement);
        let (book_value_per_share, free_cash_flow_per_share, revenue_per_share) = if f.shares > 0.0
        {
            (
                f.equity / f.shares,
                f.free_cash_flow / f.shares,
                f.revenue / f.shares,
            )
        } else {
            (decimal_to_f64(statement.book_value_per_share), 0.0, 0.0)
        };

        let prior_eps = previous
            .zip(prior)
            .map(|(stmt, figures)| figures.earnings_per_share(stmt));

        Self {
            symbol: statement.symbol.clone(),
            fiscal_year: statement.fiscal_year,

            gross_margin: ratio(f.gross_profit, f.revenue),
            operating_margin: ratio(f.operating_income, f.revenue),
            net_margin: ratio(f.net_income, f.revenue),
            ebitda_margin: ratio(f.ebitda, f.revenue),
            return_on_assets: ratio(f.net_income, f.total_assets),
            return_on_equity: ratio(f.net_income, f.equity),
            return_on_invested_capital: ratio(f.operating_income, f.total_debt + f.equity),
            return_on_capital_employed: ratio(f.ebit, f.total_assets - f.current_liabilities),
            cash_flow_return_on_assets: ratio(f.operating_cash_flow, f.total_assets),
            cash_flow_return_on_equity: ratio(f.operating_cash_flow, f.equity),

            current_ratio: ratio(f.current_assets, f.current_liabilities),
            quick_ratio: ratio(
                f.cash + f.marketable_securities + f.receivables,
                f.current_liabilities,
            ),
            cash_ratio: ratio(f.cash, f.current_liabilities),
            operating_cash_flow_ratio: ratio(f.operating_cash_flow, f.current_liabilities),
            working_capital,
            working_capital_ratio: ratio(f.current_assets - f.current_liabilities, f.total_assets),

            days_sales_outstanding: dso,
            days_inventory_outstanding: dio,
            days_payables_outstanding: dpo,
            cash_conversion_cycle: dso + dio - dpo,

            debt_to_equity: ratio(f.total_debt, f.equity),
            debt_to_assets: ratio(f.total_debt, f.total_assets),
            equity_multiplier: ratio(f.total_assets, f.equity),
            interest_coverage,
            ebitda_coverage,
            net_debt,
            debt_service_coverage: 0.0,

            asset_turnover: ratio(f.revenue, f.total_assets),
            fixed_asset_turnover: ratio(f.revenue, f.total_assets - f.current_assets),
            working_capital_turnover: ratio(f.revenue, f.current_assets - f.current_liabilities),
            inventory_turnover: ratio(f.cogs, f.inventory),
            receivables_turnover: ratio(f.revenue, f.receivables),
            payables_turnover: 0.0,
            operating_expense_ratio: ratio(f.operating_expenses, f.revenue),
            sga_to_revenue: 0.0,

            revenue_growth: optional_growth(f.revenue, prior.map(|p| p.revenue)),
            operating_income_growth: optional_growth(
                f.operating_income,
                prior.map(|p| p.operating_income),
            ),
            net_income_growth: optional_growth(f.net_income, prior.map(|p| p.net_income)),
            ebitda_growth: optional_growth(f.ebitda, prior.map(|p| p.ebitda)),
            eps_growth: optional_growth(eps, prior_eps),
            free_cash_flow_growth: optional_growth(
                f.free_cash_flow,
                prior.map(|p| p.free_cash_flow),
            ),

            free_cash_flow: statement.free_cash_flow.unwrap_or_default(),
            free_cash_flow_margin: ratio(f.free_cash_flow, f.revenue),
            operating_cash_flow_margin: ratio(f.operating_cash_flow, f.revenue),
            cash_flow_to_net_income: ratio(f.operating_cash_flow, f.net_income),
            free_cash_flow_to_net_income: ratio(f.free_cash_flow, f.net_income),
            capex_to_operating_cash_flow,
            capex_to_revenue: ratio(f.capex, f.revenue),
            capex_to_depreciation: 0.0,
            free_cash_flow_yield: 0.0,

            intangibles_to_assets: 0.0,

            earnings_per_share: eps,
            book_value_per_share,
            free_cash_flow_per_share,
            revenue_per_share,
        }
    }
}
