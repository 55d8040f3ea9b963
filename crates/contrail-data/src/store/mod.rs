//! Local persistence for ingested company data.
//!
//! Statements and capacity records are stored in SQLite so that comparisons
//! can run offline once a company has been ingested.

mod sqlite;

pub use sqlite::{StatementStore, StoreStats};
