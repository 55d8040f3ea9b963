#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/contrail/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod capacity;
pub mod edgar;
pub mod error;
pub mod model;
pub mod store;

pub use capacity::{load_capacity_csv, read_capacity_csv};
pub use error::{DataError, Result};
pub use model::{AirlineCapacity, CapacityUnit, CompanyProfile, FinancialStatement};
pub use store::{StatementStore, StoreStats};
