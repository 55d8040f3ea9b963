//! Values placed side by side in a comparison.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A compared value: a reported dollar amount or a derived ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MetricValue {
    /// Reported amount, kept exact
    Money(Decimal),
    /// Derived ratio or percentage
    Ratio(f64),
}

impl MetricValue {
    /// Common scalar used to rank two values.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Money(amount) => amount.to_f64().unwrap_or(0.0),
            Self::Ratio(value) => *value,
        }
    }

    /// True for reported dollar amounts.
    pub const fn is_money(&self) -> bool {
        matches!(self, Self::Money(_))
    }
}

impl From<Decimal> for MetricValue {
    fn from(amount: Decimal) -> Self {
        Self::Money(amount)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Ratio(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Money(amount) => write!(f, "{}", amount.normalize()),
            Self::Ratio(value) => write!(f, "{}", value),
        }
    }
}
