//! SEC EDGAR data fetching and parsing.
//!
//! This module provides access to SEC EDGAR XBRL data:
//! - Company CIK lookup from ticker symbols
//! - Company facts download
//! - Annual statement extraction from XBRL facts
//!
//! # Example
//!
//! ```no_run
//! use contrail_data::edgar::{EdgarClient, StatementExtractor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new()?;
//!     let profile = client.lookup_company("UAL").await?;
//!     let cik = profile.cik.clone().unwrap_or_default();
//!
//!     let doc = client.fetch_company_facts(&cik).await?;
//!     let statements = StatementExtractor::new().extract(&profile.symbol, &doc);
//!     println!("{}: {} fiscal years", profile.name, statements.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod statements;
pub mod xbrl;

pub use client::{DEFAULT_USER_AGENT, EdgarClient};
pub use statements::StatementExtractor;
pub use xbrl::{XbrlDocument, XbrlFact, concepts};
