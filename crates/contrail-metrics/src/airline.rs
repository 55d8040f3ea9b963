//! Airline unit economics.
//!
//! Unit metrics are quoted per available (or revenue) seat mile in cents. Unlike
//! the financial ratios, they are never defaulted to zero: without both seat-mile
//! counts the whole record is empty, and a field whose numerator was not
//! reported stays `None`.

use crate::ratio::optional_growth;
use contrail_data::{AirlineCapacity, FinancialStatement};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Upper bound, in cents, for a plausible RASM or CASM.
pub const MAX_UNIT_CENTS: f64 = 50.0;

/// Plausible range, in cents, for passenger yield.
pub const YIELD_RANGE_CENTS: (f64, f64) = (2.0, 50.0);

/// Unit economics for one fiscal year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirlineOperatingMetrics {
    /// Ticker symbol
    pub symbol: String,
    /// Fiscal year
    pub fiscal_year: i32,
    /// Available seat miles, in statute miles
    pub available_seat_miles: Option<f64>,
    /// Revenue passenger miles, in statute miles
    pub revenue_passenger_miles: Option<f64>,
    /// RPM / ASM * 100
    pub load_factor: Option<f64>,
    /// Revenue per ASM, cents
    pub rasm: Option<f64>,
    /// Passenger revenue per ASM, cents
    pub prasm: Option<f64>,
    /// Operating expenses per ASM, cents
    pub casm: Option<f64>,
    /// Operating expenses less fuel per ASM, cents
    pub casm_ex: Option<f64>,
    /// Passenger revenue per RPM, cents
    pub passenger_yield: Option<f64>,
    /// CASM / (CASM + yield) * 100
    pub break_even_load_factor: Option<f64>,
    /// Fuel as a percentage of operating expenses
    pub fuel_cost_pct: Option<f64>,
    /// Labor as a percentage of operating expenses
    pub labor_cost_pct: Option<f64>,
    /// Revenue per full-time equivalent employee
    pub revenue_per_employee: Option<f64>,
    /// CASM change versus the prior year, as a fraction
    pub casm_growth: Option<f64>,
}

fn per_seat_mile(amount: Option<f64>, miles: f64) -> Option<f64> {
    amount.map(|a| a * 100.0 / miles)
}

fn share_of(part: Option<f64>, whole: Option<f64>) -> Option<f64> {
    match (part, whole) {
        (Some(p), Some(w)) if w > 0.0 => Some(p / w * 100.0),
        _ => None,
    }
}

fn amount(value: Option<Decimal>) -> Option<f64> {
    value.and_then(|d| d.to_f64())
}

impl AirlineOperatingMetrics {
    /// A record carrying only its key, used when capacity data is unavailable.
    pub fn empty(symbol: impl Into<String>, fiscal_year: i32) -> Self {
        Self {
            symbol: symbol.into(),
            fiscal_year,
            ..Self::default()
        }
    }

    /// Derive unit economics for `statement` using its capacity record.
    ///
    /// `previous` is the prior year's record and only feeds `casm_growth`.
    pub fn derive(
        statement: &FinancialStatement,
        capacity: Option<&AirlineCapacity>,
        previous: Option<&Self>,
    ) -> Self {
        let asm = capacity
            .and_then(AirlineCapacity::asm_miles)
            .filter(|v| *v > 0.0);
        let rpm = capacity
            .and_then(AirlineCapacity::rpm_miles)
            .filter(|v| *v > 0.0);

        let (Some(asm), Some(rpm)) = (asm, rpm) else {
            warn!(
                symbol = %statement.symbol,
                fiscal_year = statement.fiscal_year,
                "Missing capacity data, airline metrics unavailable"
            );
            return Self::empty(statement.symbol.clone(), statement.fiscal_year);
        };

        let revenue = amount(statement.revenue);
        let passenger_revenue = amount(statement.passenger_revenue);
        let operating_expenses = amount(statement.operating_expenses);
        let fuel = amount(statement.fuel_expense);
        let labor = amount(statement.labor_expense);

        let casm = per_seat_mile(operating_expenses, asm);
        let casm_ex = match (operating_expenses, fuel) {
            (Some(opex), Some(fuel)) => per_seat_mile(Some(opex - fuel), asm),
            _ => None,
        };
        let passenger_yield = per_seat_mile(passenger_revenue, rpm);

        let break_even_load_factor = match (casm, passenger_yield) {
            (Some(c), Some(y)) if c + y > 0.0 => Some(c / (c + y) * 100.0),
            _ => None,
        };

        let revenue_per_employee = match (revenue, capacity.and_then(|c| c.employees)) {
            (Some(r), Some(e)) if e > 0 => e.to_f64().map(|e| r / e),
            _ => None,
        };

        let casm_growth = casm.and_then(|c| optional_growth(c, previous.and_then(|p| p.casm)));

        Self {
            symbol: statement.symbol.clone(),
            fiscal_year: statement.fiscal_year,
            available_seat_miles: Some(asm),
            revenue_passenger_miles: Some(rpm),
            load_factor: Some(rpm / asm * 100.0),
            rasm: per_seat_mile(revenue, asm),
            prasm: per_seat_mile(passenger_revenue, asm),
            casm,
            casm_ex,
            passenger_yield,
            break_even_load_factor,
            fuel_cost_pct: share_of(fuel, operating_expenses),
            labor_cost_pct: share_of(labor, operating_expenses),
            revenue_per_employee,
            casm_growth,
        }
    }

    /// True when the record carries capacity-derived values.
    pub const fn has_capacity(&self) -> bool {
        self.load_factor.is_some()
    }

    /// Load factor, when present, lies within `[0, 100]`.
    pub fn is_valid(&self) -> bool {
        self.load_factor
            .is_none_or(|lf| (0.0..=100.0).contains(&lf))
    }

    /// Every range problem found in the record.
    pub fn validation_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.is_valid()
            && let Some(lf) = self.load_factor
        {
            issues.push(format!("Load factor {:.2}% is outside 0-100%", lf));
        }

        for (label, value) in [("RASM", self.rasm), ("CASM", self.casm)] {
            if let Some(v) = value
                && (v <= 0.0 || v > MAX_UNIT_CENTS)
            {
                issues.push(format!(
                    "{} {:.2} cents is outside (0, {:.0}] cents",
                    label, v, MAX_UNIT_CENTS
                ));
            }
        }

        if let Some(y) = self.passenger_yield
            && !(YIELD_RANGE_CENTS.0..=YIELD_RANGE_CENTS.1).contains(&y)
        {
            issues.push(format!(
                "Passenger yield {:.2} cents is outside [{:.0}, {:.0}] cents",
                y, YIELD_RANGE_CENTS.0, YIELD_RANGE_CENTS.1
            ));
        }

        if let (Some(rasm), Some(casm)) = (self.rasm, self.casm)
            && rasm < casm
        {
            issues.push(format!(
                "RASM {:.2} is below CASM {:.2}: operating at a loss per seat mile",
                rasm, casm
            ));
        }

        issues
    }

    /// Emit a warning for each validation issue. Never fails.
    pub fn log_validation(&self) {
        for issue in self.validation_issues() {
            warn!(
                symbol = %self.symbol,
                fiscal_year = self.fiscal_year,
                "{}",
                issue
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use contrail_data::CapacityUnit;
    use rust_decimal_macros::dec;

    fn statement() -> FinancialStatement {
        let mut stmt = FinancialStatement::new("TEST", 2023);
        stmt.revenue = Some(dec!(1_000_000_000));
        stmt.operating_expenses = Some(dec!(900_000_000));
        stmt.fuel_expense = Some(dec!(300_000_000));
        stmt.passenger_revenue = Some(dec!(800_000_000));
        stmt.labor_expense = Some(dec!(270_000_000));
        stmt
    }

    fn capacity(asm: Option<u64>, rpm: Option<u64>) -> AirlineCapacity {
        AirlineCapacity::new("TEST", 2023, asm, rpm, CapacityUnit::Thousands)
    }

    #[test]
    fn test_unit_economics() {
        let cap = capacity(Some(100_000_000), Some(80_000_000));
        let m = AirlineOperatingMetrics::derive(&statement(), Some(&cap), None);

        assert_relative_eq!(m.load_factor.unwrap(), 80.0);
        assert_relative_eq!(m.rasm.unwrap(), 1.0);
        assert_relative_eq!(m.casm.unwrap(), 0.9);
        assert_relative_eq!(m.casm_ex.unwrap(), 0.6);
        assert_relative_eq!(m.passenger_yield.unwrap(), 1.0);
        assert_relative_eq!(m.prasm.unwrap(), 0.8);
        assert_relative_eq!(m.fuel_cost_pct.unwrap(), 100.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(m.labor_cost_pct.unwrap(), 30.0, epsilon = 1e-9);
        assert_relative_eq!(m.break_even_load_factor.unwrap(), 0.9 / 1.9 * 100.0, epsilon = 1e-9);
        assert_eq!(m.casm_growth, None);
        assert!(m.is_valid());
    }

    #[test]
    fn test_missing_capacity_yields_empty_record() {
        for cap in [
            None,
            Some(capacity(None, Some(80_000_000))),
            Some(capacity(Some(100_000_000), None)),
            Some(capacity(Some(0), Some(80_000_000))),
        ] {
            let m = AirlineOperatingMetrics::derive(&statement(), cap.as_ref(), None);
            assert_eq!(m, AirlineOperatingMetrics::empty("TEST", 2023));
            assert_eq!(m.rasm, None);
            assert_eq!(m.casm, None);
            assert_eq!(m.load_factor, None);
            assert_eq!(m.passenger_yield, None);
            assert!(!m.has_capacity());
            assert!(m.is_valid());
        }
    }

    #[test]
    fn test_missing_numerator_leaves_field_empty() {
        let mut stmt = statement();
        stmt.fuel_expense = None;
        stmt.passenger_revenue = None;
        let cap = capacity(Some(100_000_000), Some(80_000_000));
        let m = AirlineOperatingMetrics::derive(&stmt, Some(&cap), None);

        assert!(m.casm.is_some());
        assert_eq!(m.casm_ex, None);
        assert_eq!(m.passenger_yield, None);
        assert_eq!(m.break_even_load_factor, None);
    }

    #[test]
    fn test_casm_growth_and_employees() {
        let mut cap = capacity(Some(100_000_000), Some(80_000_000));
        cap.employees = Some(10_000);
        let prior = AirlineOperatingMetrics {
            casm: Some(0.75),
            ..AirlineOperatingMetrics::empty("TEST", 2022)
        };
        let m = AirlineOperatingMetrics::derive(&statement(), Some(&cap), Some(&prior));
        assert_relative_eq!(m.casm_growth.unwrap(), 0.2, epsilon = 1e-9);
        assert_relative_eq!(m.revenue_per_employee.unwrap(), 100_000.0);
    }

    #[test]
    fn test_validation_issues() {
        let m = AirlineOperatingMetrics {
            load_factor: Some(120.0),
            rasm: Some(12.0),
            casm: Some(60.0),
            passenger_yield: Some(1.5),
            ..AirlineOperatingMetrics::empty("BAD", 2023)
        };
        assert!(!m.is_valid());
        let issues = m.validation_issues();
        assert_eq!(issues.len(), 4);
        assert!(issues[0].starts_with("Load factor"));
        assert!(issues.iter().any(|i| i.starts_with("CASM")));
        assert!(issues.iter().any(|i| i.starts_with("Passenger yield")));
        assert!(issues.iter().any(|i| i.starts_with("RASM 12.00 is below")));
        m.log_validation();
    }
}
