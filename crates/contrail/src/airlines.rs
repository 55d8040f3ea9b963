//! Known US passenger carriers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Business model of a carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarrierSegment {
    /// Network carrier with hubs and long-haul flying
    Legacy,
    /// Low-cost carrier
    LowCost,
    /// Ultra-low-cost carrier
    UltraLowCost,
    /// Regional or leisure-focused carrier
    Regional,
}

impl CarrierSegment {
    /// Every segment, in display order.
    pub const fn all() -> [Self; 4] {
        [Self::Legacy, Self::LowCost, Self::UltraLowCost, Self::Regional]
    }

    /// Returns the segment name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Legacy => "Legacy",
            Self::LowCost => "Low-Cost",
            Self::UltraLowCost => "Ultra-Low-Cost",
            Self::Regional => "Regional",
        }
    }
}

impl fmt::Display for CarrierSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A listed carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    /// Ticker symbol
    pub ticker: &'static str,
    /// Registrant name
    pub name: &'static str,
    /// SEC Central Index Key, when known
    pub cik: Option<u32>,
    /// Business model
    pub segment: CarrierSegment,
}

impl Carrier {
    const fn new(
        ticker: &'static str,
        name: &'static str,
        cik: Option<u32>,
        segment: CarrierSegment,
    ) -> Self {
        Self {
            ticker,
            name,
            cik,
            segment,
        }
    }

    /// CIK zero-padded to ten digits, as EDGAR URLs expect.
    pub fn padded_cik(&self) -> Option<String> {
        self.cik.map(|cik| format!("{:0>10}", cik))
    }
}

/// Registry of known carriers.
#[derive(Debug, Clone)]
pub struct AirlineRegistry {
    carriers: Vec<Carrier>,
    by_ticker: HashMap<String, usize>,
}

impl Default for AirlineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AirlineRegistry {
    /// Create the registry of US carriers.
    pub fn new() -> Self {
        let carriers = Self::default_carriers();
        let by_ticker = carriers
            .iter()
            .enumerate()
            .map(|(i, c)| (c.ticker.to_string(), i))
            .collect();

        Self {
            carriers,
            by_ticker,
        }
    }

    /// All carriers.
    pub fn carriers(&self) -> &[Carrier] {
        &self.carriers
    }

    /// All tickers.
    pub fn tickers(&self) -> Vec<&'static str> {
        self.carriers.iter().map(|c| c.ticker).collect()
    }

    /// Look up a carrier by ticker, ignoring case.
    pub fn lookup(&self, ticker: &str) -> Option<&Carrier> {
        self.by_ticker
            .get(&ticker.trim().to_uppercase())
            .map(|&i| &self.carriers[i])
    }

    /// True when `ticker` is a known carrier.
    pub fn contains(&self, ticker: &str) -> bool {
        self.lookup(ticker).is_some()
    }

    /// Carriers in one segment.
    pub fn in_segment(&self, segment: CarrierSegment) -> Vec<&Carrier> {
        self.carriers
            .iter()
            .filter(|c| c.segment == segment)
            .collect()
    }

    fn default_carriers() -> Vec<Carrier> {
        use CarrierSegment::*;

        vec![
            Carrier::new("DAL", "Delta Air Lines, Inc.", Some(27904), Legacy),
            Carrier::new("UAL", "United Airlines Holdings, Inc.", Some(100517), Legacy),
            Carrier::new("AAL", "American Airlines Group Inc.", Some(6201), Legacy),
            Carrier::new("LUV", "Southwest Airlines Co.", Some(92380), LowCost),
            Carrier::new("JBLU", "JetBlue Airways Corporation", Some(1158463), LowCost),
            Carrier::new("ALK", "Alaska Air Group, Inc.", Some(766421), LowCost),
            Carrier::new("SAVE", "Spirit Airlines, Inc.", None, UltraLowCost),
            Carrier::new("ULCC", "Frontier Group Holdings, Inc.", None, UltraLowCost),
            Carrier::new("ALGT", "Allegiant Travel Company", None, UltraLowCost),
            Carrier::new("SNCY", "Sun Country Airlines Holdings, Inc.", None, UltraLowCost),
            Carrier::new("HA", "Hawaiian Holdings, Inc.", None, Regional),
            Carrier::new("SKYW", "SkyWest, Inc.", None, Regional),
        ]
    }
}

/// Look up a known carrier by ticker, ignoring case.
pub fn lookup(ticker: &str) -> Option<Carrier> {
    AirlineRegistry::new().lookup(ticker).cloned()
}
