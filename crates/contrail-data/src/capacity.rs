//! Capacity and traffic statistics loaded from CSV.
//!
//! XBRL filings do not tag seat miles, so carriers' operating statistics are
//! supplied as a small CSV file, one row per fiscal year:
//!
//! ```text
//! fiscal_year,available_seat_miles,revenue_passenger_miles,unit,passengers,employees
//! 2023,291333000,244347000,thousands,164000000,103300
//! 2022,247858000,207791000,thousands,,
//! ```
//!
//! Empty cells mean the value is absent. An empty `unit` means thousands.

use crate::error::{DataError, Result};
use crate::model::{AirlineCapacity, CapacityUnit};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CapacityRow {
    fiscal_year: i32,
    #[serde(default)]
    available_seat_miles: Option<u64>,
    #[serde(default)]
    revenue_passenger_miles: Option<u64>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    passengers: Option<u64>,
    #[serde(default)]
    employees: Option<u64>,
}

impl CapacityRow {
    fn into_capacity(self, symbol: &str) -> Result<AirlineCapacity> {
        let unit = match self.unit.as_deref().map(str::trim) {
            None | Some("") => CapacityUnit::default(),
            Some(label) => CapacityUnit::parse(label).ok_or_else(|| {
                DataError::Parse(format!(
                    "Unknown capacity unit '{}' for fiscal year {}",
                    label, self.fiscal_year
                ))
            })?,
        };

        let mut capacity = AirlineCapacity::new(
            symbol.to_uppercase(),
            self.fiscal_year,
            self.available_seat_miles,
            self.revenue_passenger_miles,
            unit,
        );
        capacity.passengers = self.passengers;
        capacity.employees = self.employees;
        Ok(capacity)
    }
}

/// Load capacity rows for `symbol` from a CSV file.
pub fn load_capacity_csv<P: AsRef<Path>>(path: P, symbol: &str) -> Result<Vec<AirlineCapacity>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_capacity_csv(file, symbol)
}

/// Read capacity rows for `symbol` from any CSV source.
///
/// Rows are returned ascending by fiscal year. A fiscal year listed twice keeps
/// the last row.
pub fn read_capacity_csv<R: Read>(reader: R, symbol: &str) -> Result<Vec<AirlineCapacity>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records: Vec<AirlineCapacity> = Vec::new();
    for row in csv_reader.deserialize::<CapacityRow>() {
        let capacity = row?.into_capacity(symbol)?;
        records.retain(|r| r.fiscal_year != capacity.fiscal_year);
        records.push(capacity);
    }

    records.sort_by_key(|r| r.fiscal_year);
    debug!(symbol, rows = records.len(), "Loaded capacity CSV");
    Ok(records)
}
