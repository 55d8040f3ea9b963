#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/contrail/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod airline;
pub mod engine;
pub mod financial;
pub mod ratio;
pub mod registry;

pub use airline::AirlineOperatingMetrics;
pub use engine::MetricsEngine;
pub use financial::FinancialMetrics;
pub use ratio::{decimal_to_f64, growth_rate, ratio};

// Re-export registry types for convenience
pub use registry::{
    MetricCategory, MetricInfo, MetricUnit, available_metrics, get_metric_info, metric_value,
    metrics_by_category,
};
