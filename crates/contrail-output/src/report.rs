//! Console and markdown rendering of comparisons and metric history.

use crate::format::{comparison_unit, format_metric_value, format_optional, format_with_unit};
use contrail_compare::{ComparisonResult, MetricComparison, Section, Winner};
use contrail_metrics::{
    AirlineOperatingMetrics, FinancialMetrics, MetricCategory, available_metrics, metric_value,
};

/// Which catalogue sections a report shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetricsFilter {
    /// Financial and operational metrics
    #[default]
    All,
    /// Statement-derived metrics only
    Financial,
    /// Airline unit economics only
    Operational,
}

impl MetricsFilter {
    /// True when rows of `section` are shown.
    pub const fn includes(&self, section: Section) -> bool {
        matches!(
            (self, section),
            (Self::All, _)
                | (Self::Financial, Section::Financial)
                | (Self::Operational, Section::Operational)
        )
    }
}

/// Renders a [`ComparisonResult`] for people.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonReport<'a> {
    result: &'a ComparisonResult,
}

impl<'a> ComparisonReport<'a> {
    /// Wrap a comparison for rendering.
    pub const fn new(result: &'a ComparisonResult) -> Self {
        Self { result }
    }

    fn winner_label(&self, cmp: &MetricComparison) -> &'a str {
        match cmp.winner {
            Winner::Company1 => &self.result.company1.ticker,
            Winner::Company2 => &self.result.company2.ticker,
            Winner::Neutral => "-",
        }
    }

    fn value(cmp: &MetricComparison, side: Winner) -> String {
        let value = match side {
            Winner::Company2 => cmp.company2_value.as_ref(),
            _ => cmp.company1_value.as_ref(),
        };
        format_optional(value, |v| format_metric_value(v, comparison_unit(&cmp.key)))
    }

    fn difference(cmp: &MetricComparison) -> String {
        format_optional(cmp.difference_percentage, |d| format!("{:.2}%", d))
    }

    fn push_list(output: &mut String, title: &str, items: &[String], marker: &str, empty: &str) {
        output.push_str(&format!("{}\n", title));
        if items.is_empty() {
            output.push_str(&format!("  {}\n", empty));
        }
        for item in items {
            output.push_str(&format!("  {} {}\n", marker, item));
        }
    }

    fn push_table(&self, output: &mut String, section: Section) {
        let c1 = &self.result.company1;
        let c2 = &self.result.company2;

        output.push_str(&format!(
            "{:<24} {:>14} {:>14} {:>10} {:>12}\n",
            "Metric", c1.ticker, c2.ticker, "Winner", "Difference"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for cmp in self.result.section(section) {
            output.push_str(&format!(
                "{:<24} {:>14} {:>14} {:>10} {:>12}\n",
                cmp.name,
                Self::value(cmp, Winner::Company1),
                Self::value(cmp, Winner::Company2),
                self.winner_label(cmp),
                Self::difference(cmp)
            ));
        }
    }

    /// Fixed-width console report.
    pub fn to_ascii_table(&self, filter: MetricsFilter) -> String {
        let r = self.result;
        let mut output = String::new();

        output.push_str(&format!(
            "\nComparison: {} ({}) vs {} ({})\n",
            r.company1.name, r.company1.ticker, r.company2.name, r.company2.ticker
        ));
        output.push_str(&format!(
            "Fiscal Year: {} vs {}\n",
            r.company1.fiscal_year(),
            r.company2.fiscal_year()
        ));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!("{}\n", r.executive_summary));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if filter.includes(Section::Financial) {
            output.push_str("\nFINANCIAL METRICS\n");
            self.push_table(&mut output, Section::Financial);
        }

        if filter.includes(Section::Operational) {
            output.push_str("\nAIRLINE OPERATING METRICS\n");
            if r.section(Section::Operational).next().is_some() {
                self.push_table(&mut output, Section::Operational);
            } else {
                output.push_str("  Operating metrics unavailable for one or both companies\n");
            }

            if let Some(leaders) = &r.airline_leaders {
                let line = |label: &str, ticker: &Option<String>| {
                    format!("  {:<28} {}\n", label, ticker.as_deref().unwrap_or("N/A"))
                };
                output.push_str("\nOperational Efficiency Leaders:\n");
                output.push_str(&line("Cost Efficiency (CASM):", &leaders.casm));
                output.push_str(&line("Revenue Generation (RASM):", &leaders.rasm));
                output.push_str(&line("Load Factor:", &leaders.load_factor));
                output.push_str(&line("Passenger Yield:", &leaders.passenger_yield));
            }
        }

        output.push('\n');
        output.push_str(&"-".repeat(80));
        output.push('\n');
        for (company, strengths, weaknesses) in [
            (&r.company1, &r.company1_strengths, &r.company1_weaknesses),
            (&r.company2, &r.company2_strengths, &r.company2_weaknesses),
        ] {
            output.push_str(&format!("{} ({})\n", company.name, company.ticker));
            Self::push_list(
                &mut output,
                "Strengths:",
                strengths,
                "+",
                "No significant strengths identified",
            );
            Self::push_list(
                &mut output,
                "Weaknesses:",
                weaknesses,
                "-",
                "No significant weaknesses identified",
            );
            output.push('\n');
        }

        if !r.key_highlights.is_empty() {
            Self::push_list(&mut output, "Key Highlights:", &r.key_highlights, "*", "");
            output.push('\n');
        }
        if !r.red_flags.is_empty() {
            Self::push_list(&mut output, "Red Flags:", &r.red_flags, "!", "");
            output.push('\n');
        }

        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!("Recommendation: {}\n", r.recommendation));

        output
    }

    /// Markdown report with every section.
    pub fn to_markdown(&self) -> String {
        let r = self.result;
        let mut output = String::new();

        output.push_str(&format!(
            "# {} vs {}\n\n",
            r.company1.ticker, r.company2.ticker
        ));
        output.push_str(&format!(
            "**Companies:** {} (FY{}) and {} (FY{})\n\n",
            r.company1.name,
            r.company1.fiscal_year(),
            r.company2.name,
            r.company2.fiscal_year()
        ));
        output.push_str(&format!("{}\n\n", r.executive_summary));

        output.push_str(&format!(
            "| Metric | {} | {} | Winner | Difference |\n",
            r.company1.ticker, r.company2.ticker
        ));
        output.push_str("|--------|------|------|--------|------------|\n");
        for cmp in &r.comparisons {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                cmp.name,
                Self::value(cmp, Winner::Company1),
                Self::value(cmp, Winner::Company2),
                self.winner_label(cmp),
                Self::difference(cmp)
            ));
        }
        output.push('\n');

        let sections: [(String, &Vec<String>); 6] = [
            (format!("{} Strengths", r.company1.ticker), &r.company1_strengths),
            (format!("{} Weaknesses", r.company1.ticker), &r.company1_weaknesses),
            (format!("{} Strengths", r.company2.ticker), &r.company2_strengths),
            (format!("{} Weaknesses", r.company2.ticker), &r.company2_weaknesses),
            ("Key Highlights".to_string(), &r.key_highlights),
            ("Red Flags".to_string(), &r.red_flags),
        ];
        for (title, items) in sections {
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!("## {}\n\n", title));
            for item in items {
                output.push_str(&format!("- {}\n", item));
            }
            output.push('\n');
        }

        output.push_str("## Recommendation\n\n");
        output.push_str(&format!("{}\n", r.recommendation));

        output
    }
}

/// Year-by-year metric table for one company.
#[derive(Debug, Clone, Copy)]
pub struct MetricsHistoryReport<'a> {
    symbol: &'a str,
    financial: &'a [FinancialMetrics],
    airline: &'a [AirlineOperatingMetrics],
}

impl<'a> MetricsHistoryReport<'a> {
    /// Wrap yearly records, both ascending by fiscal year.
    pub const fn new(
        symbol: &'a str,
        financial: &'a [FinancialMetrics],
        airline: &'a [AirlineOperatingMetrics],
    ) -> Self {
        Self {
            symbol,
            financial,
            airline,
        }
    }

    fn airline_for(&self, year: i32) -> Option<&'a AirlineOperatingMetrics> {
        self.airline.iter().find(|a| a.fiscal_year == year)
    }

    /// One row per registered metric, one column per fiscal year.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nMetric History: {}\n", self.symbol));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        output.push_str(&format!("{:<32}", "Metric"));
        for m in self.financial {
            output.push_str(&format!(" {:>12}", m.fiscal_year));
        }
        output.push('\n');

        let mut category: Option<MetricCategory> = None;
        for info in available_metrics() {
            let airline_only = info.category == MetricCategory::Airline;
            if airline_only
                && !self.airline.iter().any(AirlineOperatingMetrics::has_capacity)
            {
                continue;
            }
            if category != Some(info.category) {
                category = Some(info.category);
                output.push_str(&"-".repeat(80));
                output.push('\n');
                output.push_str(&format!("{}\n", info.category.label()));
            }

            output.push_str(&format!("  {:<30}", info.name));
            for m in self.financial {
                let value = metric_value(info.key, m, self.airline_for(m.fiscal_year));
                output.push_str(&format!(
                    " {:>12}",
                    format_optional(value, |v| format_with_unit(v, info.unit))
                ));
            }
            output.push('\n');
        }

        output.push_str(&"=".repeat(80));
        output.push('\n');
        output
    }
}
