//! CSV and JSON export for comparisons and yearly metric history.

use crate::format::NOT_AVAILABLE;
use contrail_compare::{ComparisonResult, MetricValue};
use contrail_metrics::{AirlineOperatingMetrics, FinancialMetrics};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Self::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::PrettyJson),
            _ => Err(ExportError::InvalidFormat(format!(
                "cannot infer export format from '{}'",
                path.display()
            ))),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<()> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        info!(path = %path.display(), format = format.extension(), "Exported");
        Ok(())
    }
}

fn into_string(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, format: ExportFormat) -> Result<String> {
    Ok(match format {
        ExportFormat::PrettyJson => serde_json::to_string_pretty(value)?,
        _ => serde_json::to_string(value)?,
    })
}

fn csv_value(value: Option<&MetricValue>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
}

fn write_section(out: &mut String, title: &str, lines: &[String]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record([title])?;
    for line in lines {
        wtr.write_record([line])?;
    }
    out.push('\n');
    out.push_str(&into_string(wtr)?);
    Ok(())
}

fn comparison_csv(result: &ComparisonResult) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(vec![]);

    wtr.write_record([
        "Metric".to_string(),
        format!("Company1 ({})", result.company1.ticker),
        format!("Company2 ({})", result.company2.ticker),
        "Winner".to_string(),
        "Difference %".to_string(),
    ])?;

    for cmp in &result.comparisons {
        wtr.write_record([
            cmp.name.clone(),
            csv_value(cmp.company1_value.as_ref()),
            csv_value(cmp.company2_value.as_ref()),
            cmp.winner.to_string(),
            format!("{:.2}", cmp.difference_percentage.unwrap_or(0.0)),
        ])?;
    }

    let mut output = into_string(wtr)?;
    write_section(
        &mut output,
        "EXECUTIVE SUMMARY",
        std::slice::from_ref(&result.executive_summary),
    )?;
    write_section(&mut output, "KEY HIGHLIGHTS", &result.key_highlights)?;
    write_section(&mut output, "RED FLAGS", &result.red_flags)?;
    write_section(&mut output, "COMPANY 1 STRENGTHS", &result.company1_strengths)?;
    write_section(&mut output, "COMPANY 1 WEAKNESSES", &result.company1_weaknesses)?;
    write_section(&mut output, "COMPANY 2 STRENGTHS", &result.company2_strengths)?;
    write_section(&mut output, "COMPANY 2 WEAKNESSES", &result.company2_weaknesses)?;
    write_section(
        &mut output,
        "RECOMMENDATION",
        std::slice::from_ref(&result.recommendation),
    )?;

    Ok(output)
}

impl Exporter for ComparisonResult {
    fn export_to_string(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Csv => comparison_csv(self),
            ExportFormat::Json | ExportFormat::PrettyJson => to_json(self, format),
        }
    }
}

impl Exporter for Vec<FinancialMetrics> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for record in self {
                    wtr.serialize(record)?;
                }
                into_string(wtr)
            }
            ExportFormat::Json | ExportFormat::PrettyJson => to_json(self, format),
        }
    }
}

impl Exporter for Vec<AirlineOperatingMetrics> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for record in self {
                    wtr.serialize(record)?;
                }
                into_string(wtr)
            }
            ExportFormat::Json | ExportFormat::PrettyJson => to_json(self, format),
        }
    }
}
