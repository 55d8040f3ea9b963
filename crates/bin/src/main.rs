//! Contrail CLI binary.
//!
//! Ingests SEC EDGAR filings for US airlines and compares carriers head to head.

mod config;
mod integration;
mod logging;

use clap::{Parser, Subcommand};
use config::Config;
use contrail::{
    AirlineRegistry, Carrier, CarrierSegment, CompanyAnalysis, compare_companies,
    ingest_company_facts,
};
use contrail_data::edgar::{EdgarClient, XbrlDocument};
use contrail_data::{CompanyProfile, load_capacity_csv};
use contrail_output::{
    ComparisonReport, ExportFormat, Exporter, MetricsFilter, MetricsHistoryReport,
    render_glossary,
};
use indicatif::{ProgressBar, ProgressStyle};
use integration::store_manager::{open_store, print_store_info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration as StdDuration;
use tracing::debug;

#[derive(Parser)]
#[command(name = "contrail")]
#[command(about = "Contrail: Airline financial statement comparison", long_about = None)]
#[command(version)]
struct Cli {
    /// Log progress at info level (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract annual statements from SEC companyfacts and store them
    Ingest {
        /// Ticker symbol
        ticker: String,

        /// Read companyfacts JSON from a file instead of downloading it
        #[arg(long)]
        facts: Option<PathBuf>,

        /// Capacity CSV (fiscal_year, available_seat_miles, revenue_passenger_miles, ...)
        #[arg(long)]
        capacity: Option<PathBuf>,

        /// Override the company name
        #[arg(long)]
        name: Option<String>,
    },

    /// Compare the latest fiscal years of two stored airlines
    Compare {
        /// First company ticker
        company1: String,

        /// Second company ticker
        company2: String,

        /// Output format (console, csv, json or all)
        #[arg(long, default_value = "console")]
        format: String,

        /// Export path; the extension follows the format
        #[arg(long)]
        output: Option<PathBuf>,

        /// Metric rows to show (all, financial or operational)
        #[arg(long, default_value = "all")]
        metrics: String,
    },

    /// Show yearly metric history for a stored company
    Info {
        /// Ticker symbol
        ticker: String,

        /// Number of most recent fiscal years
        #[arg(long, default_value = "5")]
        years: usize,

        /// Also write the yearly financial metrics to a .csv or .json file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Inspect or clear the statement store
    Store {
        /// Delete every stored company, statement and capacity record
        #[arg(long)]
        clear: bool,

        /// Show store statistics
        #[arg(long)]
        stats: bool,
    },

    /// List known US passenger carriers
    Airlines {
        /// Filter by segment (legacy, low-cost, ultra-low-cost, regional)
        #[arg(long)]
        segment: Option<String>,
    },

    /// Explain airline and financial abbreviations
    Glossary,
}

/// Where a comparison goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Console,
    Csv,
    Json,
    All,
}

impl OutputFormat {
    const fn shows_console(self) -> bool {
        matches!(self, Self::Console | Self::All)
    }

    const fn exports(self, format: ExportFormat) -> bool {
        match format {
            ExportFormat::Csv => matches!(self, Self::Csv | Self::All),
            ExportFormat::Json | ExportFormat::PrettyJson => matches!(self, Self::Json | Self::All),
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_env();
    logging::init(cli.verbose);
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Ingest {
            ticker,
            facts,
            capacity,
            name,
        } => ingest(&config, &ticker, facts, capacity, name).await,
        Commands::Compare {
            company1,
            company2,
            format,
            output,
            metrics,
        } => compare(&config, &company1, &company2, &format, output.as_deref(), &metrics),
        Commands::Info {
            ticker,
            years,
            export,
        } => show_info(&config, &ticker, years, export.as_deref()),
        Commands::Store { clear, stats } => manage_store(&config, clear, stats),
        Commands::Airlines { segment } => list_airlines(segment.as_deref()),
        Commands::Glossary => {
            println!("{}", render_glossary());
            Ok(())
        }
    }
}

fn print_header(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", title);
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

async fn ingest(
    config: &Config,
    ticker: &str,
    facts: Option<PathBuf>,
    capacity: Option<PathBuf>,
    name: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err("Ticker must not be empty".into());
    }

    let registry = AirlineRegistry::new();
    let carrier = registry.lookup(&ticker);

    print_header(&format!("Ingesting {}", ticker));
    match carrier {
        Some(c) => println!("  Carrier: {} ({})", c.name, c.segment),
        None => println!("  Carrier: not in the known US carrier list"),
    }
    println!("  Store: {}", config.db_path.display());
    println!();

    let (mut profile, doc) = match facts {
        Some(path) => {
            print!("Reading companyfacts from {}...", path.display());
            std::io::Write::flush(&mut std::io::stdout())?;
            let doc = match read_company_facts(&path) {
                Ok(doc) => {
                    println!(" ✓ ({} facts)", doc.facts.len());
                    doc
                }
                Err(e) => {
                    println!(" ✗");
                    return Err(e);
                }
            };
            let profile_name = doc
                .entity_name
                .clone()
                .or_else(|| carrier.map(|c| c.name.to_string()))
                .unwrap_or_else(|| ticker.clone());
            let cik = doc.cik.clone().or_else(|| carrier.and_then(Carrier::padded_cik));
            (CompanyProfile::new(&ticker, cik, profile_name), doc)
        }
        None => download_company_facts(config, &ticker).await?,
    };
    if let Some(name) = name {
        profile.name = name;
    }

    let capacity_rows = match capacity {
        Some(path) => {
            let rows = load_capacity_csv(&path, &ticker)?;
            println!("Loaded {} capacity rows from {}", rows.len(), path.display());
            rows
        }
        None => {
            println!("No capacity file given: airline unit metrics will be unavailable");
            Vec::new()
        }
    };

    let store = open_store(&config.db_path)?;

    print!("Extracting annual statements...");
    std::io::Write::flush(&mut std::io::stdout())?;
    let count = match ingest_company_facts(&store, &profile, &doc, &capacity_rows) {
        Ok(n) => {
            println!(" ✓ ({} fiscal years)", n);
            n
        }
        Err(e) => {
            println!(" ✗");
            return Err(format!("Failed to ingest {}: {}", ticker, e).into());
        }
    };

    let analysis = CompanyAnalysis::load(&store, &ticker)?;
    println!("\nStored {} statements for {} ({})", count, profile.name, ticker);
    if let Some(year) = analysis.latest_year() {
        println!("Latest fiscal year: FY{}", year);
    }

    Ok(())
}

fn read_company_facts(path: &Path) -> Result<XbrlDocument, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(XbrlDocument::parse_json(&json)?)
}

async fn download_company_facts(
    config: &Config,
    ticker: &str,
) -> Result<(CompanyProfile, XbrlDocument), Box<dyn std::error::Error>> {
    let client = EdgarClient::with_user_agent(&config.user_agent)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(StdDuration::from_millis(100));
    pb.set_message(format!("Looking up {} on SEC EDGAR...", ticker));

    let profile = match client.lookup_company(ticker).await {
        Ok(profile) => profile,
        Err(e) => {
            pb.finish_with_message("Failed!");
            return Err(format!("Failed to look up {}: {}", ticker, e).into());
        }
    };
    let Some(cik) = profile.cik.clone() else {
        pb.finish_with_message("Failed!");
        return Err(format!("SEC EDGAR returned no CIK for {}", ticker).into());
    };

    pb.set_message(format!(
        "Downloading companyfacts for {} (CIK {})...",
        profile.name, cik
    ));
    let doc = match client.fetch_company_facts(&cik).await {
        Ok(doc) => doc,
        Err(e) => {
            pb.finish_with_message("Failed!");
            return Err(format!("Failed to download companyfacts for {}: {}", ticker, e).into());
        }
    };
    pb.finish_with_message(format!(
        "Downloaded {} facts for {}",
        doc.facts.len(),
        profile.name
    ));

    Ok((profile, doc))
}

fn compare(
    config: &Config,
    ticker1: &str,
    ticker2: &str,
    format: &str,
    output: Option<&Path>,
    metrics: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = parse_output_format(format)?;
    let filter = parse_metrics_filter(metrics)?;
    let store = open_store(&config.db_path)?;

    for ticker in [ticker1, ticker2] {
        let symbol = ticker.trim().to_uppercase();
        if !store.has_statements(&symbol)? {
            return Err(format!(
                "No statements stored for {}. Run `contrail ingest {}` first.",
                symbol, symbol
            )
            .into());
        }
    }

    let company1 = CompanyAnalysis::load(&store, ticker1)?;
    let company2 = CompanyAnalysis::load(&store, ticker2)?;
    let result = compare_companies(&company1, &company2)?;

    if format.shows_console() {
        print_header(&format!(
            "{} vs {}",
            company1.symbol(),
            company2.symbol()
        ));
        println!("{}", ComparisonReport::new(&result).to_ascii_table(filter));
    }

    for export in [ExportFormat::Csv, ExportFormat::PrettyJson] {
        if !format.exports(export) {
            continue;
        }
        let path = export_path(config, output, company1.symbol(), company2.symbol(), export);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        result.export_to_file(&path, export)?;
        println!(
            "Exported {} to {}",
            export.extension().to_uppercase(),
            path.display()
        );
    }

    Ok(())
}

fn export_path(
    config: &Config,
    output: Option<&Path>,
    ticker1: &str,
    ticker2: &str,
    format: ExportFormat,
) -> PathBuf {
    match output {
        Some(path) => path.with_extension(format.extension()),
        None => config.comparison_path(ticker1, ticker2, format),
    }
}

fn show_info(
    config: &Config,
    ticker: &str,
    years: usize,
    export: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if years == 0 {
        return Err("--years must be at least 1".into());
    }

    let store = open_store(&config.db_path)?;
    let analysis = CompanyAnalysis::load(&store, ticker)?;

    print_header(&format!("{} ({})", analysis.profile.name, analysis.symbol()));
    if let Some(carrier) = AirlineRegistry::new().lookup(analysis.symbol()) {
        println!("  Segment: {}", carrier.segment);
    }

    let report = MetricsHistoryReport::new(
        analysis.symbol(),
        analysis.history(years),
        analysis.airline_history(years),
    );
    println!("{}", report.to_ascii_table());

    if let Some(path) = export {
        let format = ExportFormat::from_path(path)?;
        analysis.history(years).to_vec().export_to_file(path, format)?;
        println!("Exported metric history to {}", path.display());
    }

    Ok(())
}

fn manage_store(config: &Config, clear: bool, stats: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&config.db_path)?;

    if clear {
        store.clear_all()?;
        println!("Cleared statement store at {}", config.db_path.display());
    }

    if stats || !clear {
        print_header("Statement Store");
        print_store_info(&config.db_path, &store)?;
    }

    Ok(())
}

fn list_airlines(segment: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let registry = AirlineRegistry::new();
    let segments = match segment {
        Some(name) => vec![parse_segment(name)?],
        None => CarrierSegment::all().to_vec(),
    };

    print_header("US Passenger Carriers");
    for segment in segments {
        let carriers = registry.in_segment(segment);
        println!("{} ({})", segment, carriers.len());
        for carrier in carriers {
            let cik = carrier.padded_cik().unwrap_or_else(|| "-".to_string());
            println!("  {:6} {:35} CIK {}", carrier.ticker, carrier.name, cik);
        }
        println!();
    }

    Ok(())
}

fn parse_output_format(name: &str) -> Result<OutputFormat, Box<dyn std::error::Error>> {
    let format = match name.trim().to_lowercase().as_str() {
        "console" | "text" | "table" => OutputFormat::Console,
        "csv" => OutputFormat::Csv,
        "json" => OutputFormat::Json,
        "all" => OutputFormat::All,
        _ => return Err(format!("Unknown output format: {}", name).into()),
    };

    Ok(format)
}

fn parse_metrics_filter(name: &str) -> Result<MetricsFilter, Box<dyn std::error::Error>> {
    let filter = match name.trim().to_lowercase().as_str() {
        "all" => MetricsFilter::All,
        "financial" | "finance" => MetricsFilter::Financial,
        "operational" | "operating" | "airline" => MetricsFilter::Operational,
        _ => return Err(format!("Unknown metrics filter: {}", name).into()),
    };

    Ok(filter)
}

fn parse_segment(name: &str) -> Result<CarrierSegment, Box<dyn std::error::Error>> {
    let normalized = name.to_lowercase().replace([' ', '-', '_'], "");

    let segment = match normalized.as_str() {
        "legacy" | "network" => CarrierSegment::Legacy,
        "lowcost" | "lcc" => CarrierSegment::LowCost,
        "ultralowcost" | "ulcc" => CarrierSegment::UltraLowCost,
        "regional" => CarrierSegment::Regional,
        _ => return Err(format!("Unknown segment: {}", name).into()),
    };

    Ok(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare_args() {
        let cli = Cli::try_parse_from([
            "contrail", "compare", "DAL", "UAL", "--format", "all", "--metrics", "operational",
        ])
        .unwrap();

        match cli.command {
            Commands::Compare {
                company1,
                company2,
                format,
                output,
                metrics,
            } => {
                assert_eq!(company1, "DAL");
                assert_eq!(company2, "UAL");
                assert_eq!(format, "all");
                assert_eq!(output, None);
                assert_eq!(metrics, "operational");
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["contrail", "glossary", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[rstest]
    #[case("console", OutputFormat::Console)]
    #[case("CSV", OutputFormat::Csv)]
    #[case(" json ", OutputFormat::Json)]
    #[case("all", OutputFormat::All)]
    fn test_parse_output_format(#[case] name: &str, #[case] expected: OutputFormat) {
        assert_eq!(parse_output_format(name).unwrap(), expected);
    }

    #[test]
    fn test_parse_output_format_rejects_unknown() {
        assert!(parse_output_format("xml").is_err());
    }

    #[rstest]
    #[case("all", MetricsFilter::All)]
    #[case("Financial", MetricsFilter::Financial)]
    #[case("operational", MetricsFilter::Operational)]
    fn test_parse_metrics_filter(#[case] name: &str, #[case] expected: MetricsFilter) {
        assert_eq!(parse_metrics_filter(name).unwrap(), expected);
    }

    #[rstest]
    #[case("legacy", CarrierSegment::Legacy)]
    #[case("Low-Cost", CarrierSegment::LowCost)]
    #[case("ULCC", CarrierSegment::UltraLowCost)]
    #[case("regional", CarrierSegment::Regional)]
    fn test_parse_segment(#[case] name: &str, #[case] expected: CarrierSegment) {
        assert_eq!(parse_segment(name).unwrap(), expected);
    }

    #[test]
    fn test_output_format_routing() {
        assert!(OutputFormat::Console.shows_console());
        assert!(!OutputFormat::Console.exports(ExportFormat::Csv));
        assert!(OutputFormat::Csv.exports(ExportFormat::Csv));
        assert!(!OutputFormat::Csv.exports(ExportFormat::PrettyJson));
        assert!(OutputFormat::All.exports(ExportFormat::PrettyJson));
        assert!(OutputFormat::All.shows_console());
    }

    #[test]
    fn test_export_path_follows_format() {
        let config = Config::from_env();
        let explicit = export_path(
            &config,
            Some(Path::new("reports/delta_united.csv")),
            "DAL",
            "UAL",
            ExportFormat::PrettyJson,
        );
        assert_eq!(explicit, PathBuf::from("reports/delta_united.json"));

        let default = export_path(&config, None, "DAL", "UAL", ExportFormat::Csv);
        assert!(default.ends_with("DAL_vs_UAL_comparison.csv"));
    }
}
