#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/contrail/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod format;
pub mod glossary;
pub mod report;

pub use export::{ExportError, ExportFormat, Exporter};
pub use format::{
    format_cents, format_currency, format_metric_value, format_optional, format_percentage,
    format_ratio, format_with_unit,
};
pub use glossary::{GlossaryEntry, render_glossary};
pub use report::{ComparisonReport, MetricsFilter, MetricsHistoryReport};
