//! Narrative text built from a metric table.

use crate::snapshot::CompanySnapshot;
use crate::verdict::{MetricComparison, Rating, Winner};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Debt-to-equity above which a company is flagged.
pub const HIGH_DEBT_TO_EQUITY: f64 = 2.0;

/// Largest win-count gap still called comparable.
pub const COMPARABLE_WIN_GAP: usize = 2;

/// Count of won metrics per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WinTally {
    /// Metrics won by the first company
    pub company1: usize,
    /// Metrics won by the second company
    pub company2: usize,
    /// Metrics compared, neutral rows included
    pub total: usize,
}

impl WinTally {
    /// Tally the non-neutral winners of a table.
    pub fn count(comparisons: &[MetricComparison]) -> Self {
        comparisons.iter().fold(
            Self {
                total: comparisons.len(),
                ..Self::default()
            },
            |mut tally, cmp| {
                match cmp.winner {
                    Winner::Company1 => tally.company1 += 1,
                    Winner::Company2 => tally.company2 += 1,
                    Winner::Neutral => {}
                }
                tally
            },
        )
    }

    /// Side with more wins. Ties go to the first company.
    pub const fn leader(&self) -> Winner {
        if self.company1 >= self.company2 {
            Winner::Company1
        } else {
            Winner::Company2
        }
    }

    /// Win count of the leading side.
    pub fn leading_count(&self) -> usize {
        self.company1.max(self.company2)
    }

    /// True when the win counts are within [`COMPARABLE_WIN_GAP`].
    pub const fn is_comparable(&self) -> bool {
        self.company1.abs_diff(self.company2) <= COMPARABLE_WIN_GAP
    }
}

/// Tickers leading each airline dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AirlineLeaders {
    /// Lower cost per ASM
    pub casm: Option<String>,
    /// Higher revenue per ASM
    pub rasm: Option<String>,
    /// Higher load factor
    pub load_factor: Option<String>,
    /// Higher passenger yield
    pub passenger_yield: Option<String>,
}

fn difference(cmp: &MetricComparison) -> f64 {
    cmp.difference_percentage.unwrap_or(0.0)
}

/// Notable wins of `side`, in table order.
pub fn strengths(comparisons: &[MetricComparison], side: Winner) -> Vec<String> {
    comparisons
        .iter()
        .filter(|cmp| cmp.is_strength_of(side))
        .map(|cmp| {
            format!(
                "Superior {}: {:.2}% better than competitor",
                cmp.name,
                difference(cmp)
            )
        })
        .collect()
}

/// Notable wins of the competitor of `side`, in table order.
pub fn weaknesses(comparisons: &[MetricComparison], side: Winner) -> Vec<String> {
    if side == Winner::Neutral {
        return Vec::new();
    }
    comparisons
        .iter()
        .filter(|cmp| cmp.is_strength_of(side.mirrored()))
        .map(|cmp| {
            format!(
                "Lower {}: {:.2}% behind competitor",
                cmp.name,
                difference(cmp)
            )
        })
        .collect()
}

/// One line per significantly better row.
pub fn highlights(
    comparisons: &[MetricComparison],
    company1: &CompanySnapshot,
    company2: &CompanySnapshot,
) -> Vec<String> {
    comparisons
        .iter()
        .filter(|cmp| cmp.rating == Rating::SignificantlyBetter)
        .map(|cmp| {
            let company = match cmp.winner {
                Winner::Company2 => &company2.name,
                _ => &company1.name,
            };
            format!(
                "{} shows significantly better {} ({:.2}% difference)",
                company,
                cmp.name,
                difference(cmp)
            )
        })
        .collect()
}

/// Company-level warnings: losses first, then leverage.
pub fn red_flags(company1: &CompanySnapshot, company2: &CompanySnapshot) -> Vec<String> {
    let mut flags = Vec::new();

    for company in [company1, company2] {
        if company
            .statement
            .net_income
            .is_some_and(|n| n < Decimal::ZERO)
        {
            flags.push(format!("{} has negative net income", company.name));
        }
    }
    for company in [company1, company2] {
        if company.metrics.debt_to_equity > HIGH_DEBT_TO_EQUITY {
            flags.push(format!("{} has high debt-to-equity ratio", company.name));
        }
    }

    flags
}

fn named<'a>(side: Winner, company1: &'a CompanySnapshot, company2: &'a CompanySnapshot) -> &'a str {
    match side {
        Winner::Company2 => &company2.name,
        _ => &company1.name,
    }
}

/// One-sentence summary naming the leader.
pub fn executive_summary(
    tally: &WinTally,
    company1: &CompanySnapshot,
    company2: &CompanySnapshot,
) -> String {
    let leader = tally.leader();
    format!(
        "{} demonstrates stronger overall financial performance compared to {}, leading in {} out of {} key metrics analyzed.",
        named(leader, company1, company2),
        named(leader.mirrored(), company1, company2),
        tally.leading_count(),
        tally.total
    )
}

/// Investment recommendation text.
pub fn recommendation(
    tally: &WinTally,
    company1: &CompanySnapshot,
    company2: &CompanySnapshot,
) -> String {
    if tally.is_comparable() {
        "Both companies show comparable financial performance. Investment decision should consider additional factors such as growth strategy, market position, and management quality.".to_string()
    } else {
        format!(
            "{} appears to be the stronger investment candidate based on superior financial metrics and operational efficiency.",
            named(tally.leader(), company1, company2)
        )
    }
}

fn leader(
    v1: Option<f64>,
    v2: Option<f64>,
    higher_is_better: bool,
    company1: &CompanySnapshot,
    company2: &CompanySnapshot,
) -> Option<String> {
    let (a, b) = (v1?, v2?);
    let first_leads = if higher_is_better { a > b } else { a < b };
    let ticker = if first_leads {
        &company1.ticker
    } else {
        &company2.ticker
    };
    Some(ticker.clone())
}

/// Per-dimension airline leaders, when both companies carry unit economics.
pub fn airline_leaders(
    company1: &CompanySnapshot,
    company2: &CompanySnapshot,
) -> Option<AirlineLeaders> {
    let (m1, m2) = (company1.operating_metrics()?, company2.operating_metrics()?);
    Some(AirlineLeaders {
        casm: leader(m1.casm, m2.casm, false, company1, company2),
        rasm: leader(m1.rasm, m2.rasm, true, company1, company2),
        load_factor: leader(m1.load_factor, m2.load_factor, true, company1, company2),
        passenger_yield: leader(
            m1.passenger_yield,
            m2.passenger_yield,
            true,
            company1,
            company2,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::MetricValue;

    fn row(winner_value: f64) -> MetricComparison {
        MetricComparison::compare(
            "M",
            "Metric",
            Some(MetricValue::Ratio(winner_value)),
            Some(MetricValue::Ratio(100.0)),
            true,
        )
    }

    #[test]
    fn test_tally_tie_goes_to_first() {
        let table = vec![row(120.0), row(80.0), row(100.0)];
        let tally = WinTally::count(&table);
        assert_eq!(tally.company1, 1);
        assert_eq!(tally.company2, 1);
        assert_eq!(tally.total, 3);
        assert_eq!(tally.leader(), Winner::Company1);
        assert!(tally.is_comparable());
    }

    #[test]
    fn test_comparable_gap() {
        let tally = WinTally {
            company1: 5,
            company2: 3,
            total: 8,
        };
        assert!(tally.is_comparable());

        let tally = WinTally {
            company1: 1,
            company2: 4,
            total: 5,
        };
        assert!(!tally.is_comparable());
        assert_eq!(tally.leader(), Winner::Company2);
        assert_eq!(tally.leading_count(), 4);
    }

    #[test]
    fn test_strengths_and_weaknesses() {
        let table = vec![row(140.0), row(107.0), row(60.0)];

        assert_eq!(
            strengths(&table, Winner::Company1),
            vec!["Superior Metric: 40.00% better than competitor"]
        );
        assert_eq!(
            weaknesses(&table, Winner::Company1),
            vec!["Lower Metric: 40.00% behind competitor"]
        );
        assert_eq!(
            strengths(&table, Winner::Company2),
            vec!["Superior Metric: 40.00% better than competitor"]
        );
        assert!(weaknesses(&table, Winner::Neutral).is_empty());
    }
}
