#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/contrail/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod catalogue;
pub mod engine;
pub mod narrative;
pub mod snapshot;
pub mod value;
pub mod verdict;

pub use catalogue::{MetricSpec, Section, catalogue};
pub use engine::{ComparisonEngine, ComparisonResult};
pub use narrative::{AirlineLeaders, WinTally};
pub use snapshot::CompanySnapshot;
pub use value::MetricValue;
pub use verdict::{MetricComparison, Rating, Winner};
