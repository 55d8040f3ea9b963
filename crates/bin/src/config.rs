//! Environment-driven settings.
//!
//! Values are read from the process environment after loading an optional
//! `.env` file from the working directory.

use crate::integration::store_manager::default_store_path;
use contrail_data::edgar::DEFAULT_USER_AGENT;
use contrail_output::ExportFormat;
use std::path::PathBuf;

/// Store path override
pub(crate) const DB_PATH_VAR: &str = "CONTRAIL_DB_PATH";
/// SEC User-Agent override
pub(crate) const USER_AGENT_VAR: &str = "CONTRAIL_USER_AGENT";
/// Directory for default export file names
pub(crate) const OUTPUT_DIR_VAR: &str = "CONTRAIL_OUTPUT_DIR";

/// CLI settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    /// SQLite statement store
    pub(crate) db_path: PathBuf,
    /// User-Agent sent to SEC EDGAR
    pub(crate) user_agent: String,
    /// Where exports land when no `--output` is given
    pub(crate) output_dir: PathBuf,
}

impl Config {
    /// Load `.env` if present, then read settings from the environment.
    pub(crate) fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            db_path: non_empty(DB_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_store_path),
            user_agent: non_empty(USER_AGENT_VAR)
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            output_dir: non_empty(OUTPUT_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// `{T1}_vs_{T2}_comparison.{ext}` inside the output directory.
    pub(crate) fn comparison_path(&self, ticker1: &str, ticker2: &str, format: ExportFormat) -> PathBuf {
        self.output_dir.join(format!(
            "{}_vs_{}_comparison.{}",
            ticker1.to_uppercase(),
            ticker2.to_uppercase(),
            format.extension()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.db_path, default_store_path());
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            (DB_PATH_VAR, "/tmp/airlines.db"),
            (USER_AGENT_VAR, "Research Desk research@example.org"),
            (OUTPUT_DIR_VAR, "/tmp/reports"),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/tmp/airlines.db"));
        assert_eq!(config.user_agent, "Research Desk research@example.org");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config(&[(USER_AGENT_VAR, "  "), (OUTPUT_DIR_VAR, "")]);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_comparison_path() {
        let config = config(&[(OUTPUT_DIR_VAR, "out")]);
        assert_eq!(
            config.comparison_path("dal", "ual", ExportFormat::Csv),
            PathBuf::from("out/DAL_vs_UAL_comparison.csv")
        );
        assert_eq!(
            config.comparison_path("DAL", "UAL", ExportFormat::PrettyJson),
            PathBuf::from("out/DAL_vs_UAL_comparison.json")
        );
    }
}
