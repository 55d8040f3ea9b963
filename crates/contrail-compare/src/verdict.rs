//! Head-to-head verdict for a single metric.

use crate::value::MetricValue;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Difference, in percent, from which a win is significant.
pub const SIGNIFICANT_THRESHOLD: f64 = 30.0;

/// Difference, in percent, from which a win is a clear improvement.
pub const BETTER_THRESHOLD: f64 = 15.0;

/// Difference, in percent, from which a win is noticeable at all.
pub const SLIGHT_THRESHOLD: f64 = 5.0;

/// Which side a metric favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    /// The first company compared
    #[display("company1")]
    Company1,
    /// The second company compared
    #[display("company2")]
    Company2,
    /// Neither side, or the comparison could not be made
    #[display("neutral")]
    Neutral,
}

impl Winner {
    /// The same verdict seen from the other side.
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Company1 => Self::Company2,
            Self::Company2 => Self::Company1,
            Self::Neutral => Self::Neutral,
        }
    }
}

/// How decisive a win is.
///
/// Independent of [`Winner`]: a side can win with a `Neutral` rating when the
/// difference is under [`SLIGHT_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    /// At least 30% apart
    #[display("SIGNIFICANTLY_BETTER")]
    SignificantlyBetter,
    /// At least 15% apart
    #[display("BETTER")]
    Better,
    /// At least 5% apart
    #[display("SLIGHTLY_BETTER")]
    SlightlyBetter,
    /// Under 5% apart, tied, or not comparable
    #[display("NEUTRAL")]
    Neutral,
}

impl Rating {
    /// Band a percentage difference.
    pub fn from_difference(difference_percentage: f64) -> Self {
        if difference_percentage >= SIGNIFICANT_THRESHOLD {
            Self::SignificantlyBetter
        } else if difference_percentage >= BETTER_THRESHOLD {
            Self::Better
        } else if difference_percentage >= SLIGHT_THRESHOLD {
            Self::SlightlyBetter
        } else {
            Self::Neutral
        }
    }

    /// Ratings strong enough to be called out as a strength.
    pub const fn is_notable(&self) -> bool {
        matches!(self, Self::SignificantlyBetter | Self::Better)
    }
}

/// Verdict for one catalogued metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    /// Catalogue key (e.g. "Debt-to-Equity")
    pub key: String,
    /// Display name (e.g. "Debt to Equity Ratio")
    pub name: String,
    /// First company's value
    pub company1_value: Option<MetricValue>,
    /// Second company's value
    pub company2_value: Option<MetricValue>,
    /// Favored side
    pub winner: Winner,
    /// |v1 - v2| / |v2| * 100, absent when a value is missing
    pub difference_percentage: Option<f64>,
    /// Significance band
    pub rating: Rating,
    /// Whether larger values win
    pub higher_is_better: bool,
}

impl MetricComparison {
    /// Compare two values of the same metric.
    pub fn compare(
        key: impl Into<String>,
        name: impl Into<String>,
        company1_value: Option<MetricValue>,
        company2_value: Option<MetricValue>,
        higher_is_better: bool,
    ) -> Self {
        let (winner, difference_percentage, rating) = match (company1_value, company2_value) {
            (Some(v1), Some(v2)) => {
                let (a, b) = (v1.as_f64(), v2.as_f64());
                let diff = (a - b).abs();
                let pct = if b != 0.0 { diff / b.abs() * 100.0 } else { 0.0 };

                let winner = if a == b {
                    Winner::Neutral
                } else if (a > b) == higher_is_better {
                    Winner::Company1
                } else {
                    Winner::Company2
                };
                let rating = match winner {
                    Winner::Neutral => Rating::Neutral,
                    _ => Rating::from_difference(pct),
                };
                (winner, Some(pct), rating)
            }
            _ => (Winner::Neutral, None, Rating::Neutral),
        };

        Self {
            key: key.into(),
            name: name.into(),
            company1_value,
            company2_value,
            winner,
            difference_percentage,
            rating,
            higher_is_better,
        }
    }

    /// True when `side` won with a notable rating.
    pub fn is_strength_of(&self, side: Winner) -> bool {
        side != Winner::Neutral && self.winner == side && self.rating.is_notable()
    }
}
