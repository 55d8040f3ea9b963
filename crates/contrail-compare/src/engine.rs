//! Pairwise company comparison.

use crate::catalogue::{FINANCIAL_METRICS, MetricSpec, OPERATIONAL_METRICS, Section};
use crate::narrative::{self, AirlineLeaders, WinTally};
use crate::snapshot::CompanySnapshot;
use crate::verdict::{MetricComparison, Winner};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Everything produced by comparing two companies.
///
/// Built once by [`ComparisonEngine::compare`] and never modified. The
/// comparison table keeps catalogue order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// First company
    pub company1: CompanySnapshot,
    /// Second company
    pub company2: CompanySnapshot,
    /// Per-metric verdicts in presentation order
    pub comparisons: Vec<MetricComparison>,
    /// Notable wins of the first company
    pub company1_strengths: Vec<String>,
    /// Notable wins of the second company over the first
    pub company1_weaknesses: Vec<String>,
    /// Notable wins of the second company
    pub company2_strengths: Vec<String>,
    /// Notable wins of the first company over the second
    pub company2_weaknesses: Vec<String>,
    /// Airline dimension leaders, when both are airlines
    pub airline_leaders: Option<AirlineLeaders>,
    /// One-sentence summary
    pub executive_summary: String,
    /// Significantly better rows, as text
    pub key_highlights: Vec<String>,
    /// Company-level warnings
    pub red_flags: Vec<String>,
    /// Investment recommendation
    pub recommendation: String,
}

impl ComparisonResult {
    /// Number of metrics won by `side`.
    pub fn wins(&self, side: Winner) -> usize {
        self.comparisons.iter().filter(|c| c.winner == side).count()
    }

    /// Verdict for a catalogue key.
    pub fn key_metric(&self, key: &str) -> Option<&MetricComparison> {
        self.comparisons.iter().find(|c| c.key == key)
    }

    /// Verdicts belonging to one catalogue section.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &MetricComparison> {
        self.comparisons.iter().filter(move |c| {
            crate::catalogue::find(&c.key).is_some_and(|spec| spec.section == section)
        })
    }

    /// Win tally over the whole table.
    pub fn tally(&self) -> WinTally {
        WinTally::count(&self.comparisons)
    }
}

/// Compares two company snapshots across the metric catalogue.
///
/// Stateless; one engine can serve concurrent comparisons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonEngine;

impl ComparisonEngine {
    /// Create a new engine.
    pub const fn new() -> Self {
        Self
    }

    fn compare_spec(
        spec: &MetricSpec,
        company1: &CompanySnapshot,
        company2: &CompanySnapshot,
    ) -> MetricComparison {
        MetricComparison::compare(
            spec.key,
            spec.name,
            spec.value(company1),
            spec.value(company2),
            spec.higher_is_better,
        )
    }

    /// Compare `company1` against `company2`.
    ///
    /// Airline rows are added only when both snapshots carry capacity-derived
    /// unit economics.
    pub fn compare(
        &self,
        company1: &CompanySnapshot,
        company2: &CompanySnapshot,
    ) -> ComparisonResult {
        info!(
            company1 = %company1.ticker,
            company2 = %company2.ticker,
            "Comparing companies"
        );

        let mut comparisons: Vec<MetricComparison> = FINANCIAL_METRICS
            .iter()
            .map(|spec| Self::compare_spec(spec, company1, company2))
            .collect();

        if company1.operating_metrics().is_some() && company2.operating_metrics().is_some() {
            comparisons.extend(
                OPERATIONAL_METRICS
                    .iter()
                    .map(|spec| Self::compare_spec(spec, company1, company2)),
            );
        } else {
            warn!(
                company1 = %company1.ticker,
                company2 = %company2.ticker,
                "Operating metrics unavailable for one or both companies, skipping airline comparison"
            );
        }

        let tally = WinTally::count(&comparisons);
        let result = ComparisonResult {
            company1_strengths: narrative::strengths(&comparisons, Winner::Company1),
            company1_weaknesses: narrative::weaknesses(&comparisons, Winner::Company1),
            company2_strengths: narrative::strengths(&comparisons, Winner::Company2),
            company2_weaknesses: narrative::weaknesses(&comparisons, Winner::Company2),
            airline_leaders: narrative::airline_leaders(company1, company2),
            executive_summary: narrative::executive_summary(&tally, company1, company2),
            key_highlights: narrative::highlights(&comparisons, company1, company2),
            red_flags: narrative::red_flags(company1, company2),
            recommendation: narrative::recommendation(&tally, company1, company2),
            company1: company1.clone(),
            company2: company2.clone(),
            comparisons,
        };

        info!(
            metrics = tally.total,
            company1_wins = tally.company1,
            company2_wins = tally.company2,
            red_flags = result.red_flags.len(),
            "Comparison complete"
        );
        result
    }
}
