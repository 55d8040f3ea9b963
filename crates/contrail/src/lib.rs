#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/contrail/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod airlines;
pub mod pipeline;

// Re-export main types from sub-crates
pub use contrail_compare as compare;
pub use contrail_data as data;
pub use contrail_metrics as metrics;
pub use contrail_output as output;

pub use airlines::{AirlineRegistry, Carrier, CarrierSegment};
pub use pipeline::{
    AnalysisError, CompanyAnalysis, Result, compare_companies, ingest_company_facts,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
