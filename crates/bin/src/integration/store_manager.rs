//! Statement store location and housekeeping.
//!
//! The store defaults to a platform-specific data directory and can be moved
//! with `CONTRAIL_DB_PATH`.

use contrail_data::{DataError, StatementStore};
use std::path::{Path, PathBuf};

/// Get the default data directory.
///
/// Uses platform-specific data directories:
/// - Linux: `~/.local/share/contrail/`
/// - macOS: `~/Library/Application Support/contrail/`
/// - Windows: `%APPDATA%\contrail\`
pub(crate) fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("contrail")
}

/// Get the default store database path.
pub(crate) fn default_store_path() -> PathBuf {
    default_data_dir().join("contrail.db")
}

/// Open the store at `path`, creating the directory if needed.
pub(crate) fn open_store(path: &Path) -> Result<StatementStore, DataError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    StatementStore::new(path)
}

/// Print the store location and its contents.
pub(crate) fn print_store_info(path: &Path, store: &StatementStore) -> Result<(), DataError> {
    let stats = store.stats()?;
    println!("  Store location: {}", path.display());
    println!(
        "  Stored data: {} statements for {} symbols, {} capacity records",
        stats.statements, stats.symbols_with_statements, stats.capacity_records
    );

    let companies = store.list_companies()?;
    if !companies.is_empty() {
        println!("\n  Companies:");
        for company in companies {
            let years: Vec<i32> = store
                .get_statements(&company.symbol)?
                .iter()
                .map(|s| s.fiscal_year)
                .collect();
            let span = match (years.first(), years.last()) {
                (Some(first), Some(last)) => format!("FY{}-FY{}", first, last),
                _ => "no statements".to_string(),
            };
            println!("    {:6} {:40} {}", company.symbol, company.name, span);
        }
    }
    Ok(())
}
