//! Glossary of abbreviations and metric definitions.

use contrail_metrics::{MetricCategory, metrics_by_category};

/// One glossary term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlossaryEntry {
    /// Abbreviation or short name
    pub term: &'static str,
    /// Expanded name
    pub full_name: &'static str,
    /// Definition
    pub definition: &'static str,
}

const fn entry(
    term: &'static str,
    full_name: &'static str,
    definition: &'static str,
) -> GlossaryEntry {
    GlossaryEntry {
        term,
        full_name,
        definition,
    }
}

/// Abbreviations used across reports, airline terms first.
pub const TERMS: &[GlossaryEntry] = &[
    entry("ASM", "Available Seat Miles", "Seats flown multiplied by miles flown; total passenger capacity."),
    entry("RPM", "Revenue Passenger Miles", "Paying passengers multiplied by miles flown; passenger traffic."),
    entry("Load Factor", "Passenger Load Factor", "RPM divided by ASM, as a percentage. Higher is better."),
    entry("RASM", "Revenue per Available Seat Mile", "Total revenue per ASM, in cents. Higher is better."),
    entry("PRASM", "Passenger Revenue per Available Seat Mile", "Passenger revenue per ASM, in cents."),
    entry("CASM", "Cost per Available Seat Mile", "Operating expenses per ASM, in cents. Lower is better."),
    entry("CASM-ex", "CASM excluding fuel", "Operating expenses less fuel per ASM, in cents. Lower is better."),
    entry("Yield", "Passenger Yield", "Passenger revenue per RPM, in cents. Higher is better."),
    entry("BELF", "Break-even Load Factor", "Load factor at which passenger revenue covers operating cost."),
    entry("EBIT", "Earnings Before Interest and Taxes", "Operating income, used as EBIT when not reported separately."),
    entry("EBITDA", "Earnings Before Interest, Taxes, Depreciation and Amortization", "EBIT plus depreciation and amortization."),
    entry("NOPAT", "Net Operating Profit After Tax", "Approximated here by operating income, without a tax adjustment."),
    entry("ROA", "Return on Assets", "Net income divided by total assets. Higher is better."),
    entry("ROE", "Return on Equity", "Net income divided by shareholders' equity. Higher is better."),
    entry("ROIC", "Return on Invested Capital", "Operating income divided by total debt plus equity."),
    entry("ROCE", "Return on Capital Employed", "EBIT divided by total assets less current liabilities."),
    entry("DSO", "Days Sales Outstanding", "Receivables divided by revenue, times 365. Lower is better."),
    entry("DIO", "Days Inventory Outstanding", "Inventory divided by cost of goods sold, times 365."),
    entry("DPO", "Days Payables Outstanding", "Not captured from filings; always reported as 0."),
    entry("CCC", "Cash Conversion Cycle", "DSO plus DIO less DPO."),
    entry("FCF", "Free Cash Flow", "Operating cash flow less capital expenditures."),
    entry("D/E", "Debt to Equity Ratio", "Total debt divided by shareholders' equity. Above 2.0 is flagged."),
    entry("EPS", "Earnings per Share", "Net income divided by shares outstanding."),
    entry("XBRL", "eXtensible Business Reporting Language", "Tagged financial data filed with the SEC."),
    entry("CIK", "Central Index Key", "The SEC's numeric identifier for a filer."),
];

/// Find a term, ignoring case.
pub fn lookup(term: &str) -> Option<&'static GlossaryEntry> {
    TERMS.iter().find(|e| e.term.eq_ignore_ascii_case(term))
}

/// Full glossary text: abbreviations, then every metric by category.
pub fn render_glossary() -> String {
    let mut output = String::new();

    output.push_str("\nAbbreviations\n");
    output.push_str(&"=".repeat(80));
    output.push('\n');
    for e in TERMS {
        output.push_str(&format!("{:<12} {}\n", e.term, e.full_name));
        output.push_str(&format!("{:<12} {}\n", "", e.definition));
    }

    output.push_str("\nMetrics\n");
    output.push_str(&"=".repeat(80));
    output.push('\n');
    for category in [
        MetricCategory::Profitability,
        MetricCategory::Liquidity,
        MetricCategory::WorkingCapital,
        MetricCategory::Solvency,
        MetricCategory::Efficiency,
        MetricCategory::Growth,
        MetricCategory::CashFlow,
        MetricCategory::PerShare,
        MetricCategory::Airline,
    ] {
        let metrics = metrics_by_category(category);
        if metrics.is_empty() {
            continue;
        }
        output.push_str(&format!("{}\n", category.label()));
        output.push_str(&"-".repeat(80));
        output.push('\n');
        for info in metrics {
            output.push_str(&format!("  {:<30} {}\n", info.name, info.description));
        }
        output.push('\n');
    }

    output
}
