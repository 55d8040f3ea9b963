//! SQLite store for company profiles, annual statements and capacity records.

use crate::error::Result;
use crate::model::{AirlineCapacity, CompanyProfile, FinancialStatement};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use tracing::debug;

/// SQLite-backed store keyed by `(symbol, fiscal_year)`.
///
/// Records are stored as JSON documents so that new statement fields never
/// require a schema migration.
#[derive(Debug)]
pub struct StatementStore {
    conn: Connection,
}

impl StatementStore {
    /// Open (or create) a store at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS companies (
                symbol TEXT PRIMARY KEY,
                cik TEXT,
                name TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS statements (
                symbol TEXT NOT NULL,
                fiscal_year INTEGER NOT NULL,
                data TEXT NOT NULL,
                stored_at TEXT NOT NULL,
                PRIMARY KEY (symbol, fiscal_year)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS capacity (
                symbol TEXT NOT NULL,
                fiscal_year INTEGER NOT NULL,
                data TEXT NOT NULL,
                stored_at TEXT NOT NULL,
                PRIMARY KEY (symbol, fiscal_year)
            )",
            [],
        )?;

        Ok(())
    }

    /// Insert or replace a company profile.
    pub fn put_company(&self, profile: &CompanyProfile) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO companies (symbol, cik, name, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                profile.symbol,
                profile.cik,
                profile.name,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// Fetch a company profile by symbol.
    pub fn get_company(&self, symbol: &str) -> Result<Option<CompanyProfile>> {
        let profile = self
            .conn
            .query_row(
                "SELECT symbol, cik, name FROM companies WHERE symbol = ?1",
                params![symbol.to_uppercase()],
                |row| {
                    Ok(CompanyProfile {
                        symbol: row.get(0)?,
                        cik: row.get(1)?,
                        name: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(profile)
    }

    /// All stored company profiles, ordered by symbol.
    pub fn list_companies(&self) -> Result<Vec<CompanyProfile>> {
        let mut stmt = self
            .conn
            .prepare("SELECT symbol, cik, name FROM companies ORDER BY symbol ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(CompanyProfile {
                symbol: row.get(0)?,
                cik: row.get(1)?,
                name: row.get(2)?,
            })
        })?;

        let mut companies = Vec::new();
        for row in rows {
            companies.push(row?);
        }
        Ok(companies)
    }

    /// Store statements in a single transaction, replacing existing years.
    pub fn put_statements(&self, statements: &[FinancialStatement]) -> Result<()> {
        self.put_records(
            "statements",
            statements.iter().map(|s| (s.symbol.as_str(), s.fiscal_year, s)),
        )?;
        debug!(count = statements.len(), "Stored statements");
        Ok(())
    }

    /// All statements for a symbol, ascending by fiscal year.
    pub fn get_statements(&self, symbol: &str) -> Result<Vec<FinancialStatement>> {
        self.get_records("statements", symbol)
    }

    /// Statement for one fiscal year, if stored.
    pub fn get_statement(&self, symbol: &str, fiscal_year: i32) -> Result<Option<FinancialStatement>> {
        self.get_record("statements", symbol, fiscal_year)
    }

    /// Store capacity records in a single transaction, replacing existing years.
    pub fn put_capacity(&self, records: &[AirlineCapacity]) -> Result<()> {
        self.put_records(
            "capacity",
            records.iter().map(|c| (c.symbol.as_str(), c.fiscal_year, c)),
        )?;
        debug!(count = records.len(), "Stored capacity records");
        Ok(())
    }

    /// All capacity records for a symbol, ascending by fiscal year.
    pub fn get_capacity(&self, symbol: &str) -> Result<Vec<AirlineCapacity>> {
        self.get_records("capacity", symbol)
    }

    /// Capacity record for one fiscal year, if stored.
    pub fn get_capacity_for_year(
        &self,
        symbol: &str,
        fiscal_year: i32,
    ) -> Result<Option<AirlineCapacity>> {
        self.get_record("capacity", symbol, fiscal_year)
    }

    /// Check whether any statements are stored for a symbol.
    pub fn has_statements(&self, symbol: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM statements WHERE symbol = ?1",
            params![symbol.to_uppercase()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Remove every record from the store.
    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM companies", [])?;
        self.conn.execute("DELETE FROM statements", [])?;
        self.conn.execute("DELETE FROM capacity", [])?;
        Ok(())
    }

    /// Remove every record for a symbol.
    pub fn clear_symbol(&self, symbol: &str) -> Result<()> {
        let symbol = symbol.to_uppercase();
        self.conn
            .execute("DELETE FROM companies WHERE symbol = ?1", params![symbol])?;
        self.conn
            .execute("DELETE FROM statements WHERE symbol = ?1", params![symbol])?;
        self.conn
            .execute("DELETE FROM capacity WHERE symbol = ?1", params![symbol])?;
        Ok(())
    }

    /// Get store statistics.
    pub fn stats(&self) -> Result<StoreStats> {
        let companies: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM companies", [], |row| row.get(0))?;

        let statements: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM statements", [], |row| row.get(0))?;

        let symbols: i64 =
            self.conn
                .query_row("SELECT COUNT(DISTINCT symbol) FROM statements", [], |row| {
                    row.get(0)
                })?;

        let capacity_records: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM capacity", [], |row| row.get(0))?;

        Ok(StoreStats {
            companies: companies as usize,
            statements: statements as usize,
            symbols_with_statements: symbols as usize,
            capacity_records: capacity_records as usize,
        })
    }

    fn put_records<'a, T, I>(&self, table: &str, records: I) -> Result<()>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = (&'a str, i32, &'a T)>,
    {
        let stored_at = Utc::now().to_rfc3339();
        let sql = format!(
            "INSERT OR REPLACE INTO {table} (symbol, fiscal_year, data, stored_at)
             VALUES (?1, ?2, ?3, ?4)"
        );

        let tx = self.conn.unchecked_transaction()?;
        for (symbol, fiscal_year, record) in records {
            let data = serde_json::to_string(record)?;
            tx.execute(
                &sql,
                params![symbol.to_uppercase(), fiscal_year, data, stored_at],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get_records<T: DeserializeOwned>(&self, table: &str, symbol: &str) -> Result<Vec<T>> {
        let sql = format!(
            "SELECT data FROM {table} WHERE symbol = ?1 ORDER BY fiscal_year ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![symbol.to_uppercase()], |row| row.get::<_, String>(0))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(serde_json::from_str(&row?)?);
        }
        Ok(records)
    }

    fn get_record<T: DeserializeOwned>(
        &self,
        table: &str,
        symbol: &str,
        fiscal_year: i32,
    ) -> Result<Option<T>> {
        let sql = format!("SELECT data FROM {table} WHERE symbol = ?1 AND fiscal_year = ?2");
        let data: Option<String> = self
            .conn
            .query_row(&sql, params![symbol.to_uppercase(), fiscal_year], |row| {
                row.get(0)
            })
            .optional()?;

        data.map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(Into::into)
    }
}

/// Store statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of company profiles
    pub companies: usize,
    /// Number of annual statements
    pub statements: usize,
    /// Number of distinct symbols with at least one statement
    pub symbols_with_statements: usize,
    /// Number of capacity records
    pub capacity_records: usize,
}
