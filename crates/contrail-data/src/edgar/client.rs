//! SEC EDGAR API client with rate limiting.

use super::xbrl::XbrlDocument;
use crate::error::{DataError, Result};
use crate::model::CompanyProfile;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

/// SEC EDGAR API base URL
const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// Ticker to CIK map (hosted at www.sec.gov, not data.sec.gov)
const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Default rate limit: 10 requests per second (SEC requirement)
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Default user agent (SEC requires identifying information)
pub const DEFAULT_USER_AGENT: &str = "Contrail-AirlineAnalysis/0.1 (contact@example.com)";

/// Company information from tickers endpoint
/// The SEC returns: {"0": {"cik_str": 100517, "ticker": "UAL", "title": "United Airlines Holdings, Inc."}, ...}
#[derive(Debug, Deserialize)]
struct CompanyInfo {
    /// CIK as a number (SEC returns this as an integer despite the name)
    cik_str: u64,
    /// Ticker symbol
    ticker: String,
    /// Company name
    title: String,
}

/// Rate limiter to ensure we don't exceed SEC's rate limits
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// SEC EDGAR API client with rate limiting
pub struct EdgarClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    base_url: String,
}

impl EdgarClient {
    /// Create a new EDGAR client with the default user agent (10 req/sec)
    pub fn new() -> Result<Self> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Create a new EDGAR client identifying itself with `user_agent`
    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        Self::build(user_agent, DEFAULT_RATE_LIMIT)
    }

    /// Create a new EDGAR client with custom rate limit
    ///
    /// # Example
    /// ```no_run
    /// use contrail_data::edgar::EdgarClient;
    /// use std::time::Duration;
    ///
    /// # fn example() -> contrail_data::Result<()> {
    /// // 5 requests per second
    /// let client = EdgarClient::with_rate_limit(Duration::from_millis(200))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_rate_limit(min_interval: Duration) -> Result<Self> {
        Self::build(DEFAULT_USER_AGENT, min_interval)
    }

    fn build(user_agent: &str, min_interval: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(min_interval))),
            base_url: EDGAR_BASE_URL.to_string(),
        })
    }

    /// Look up a company by ticker symbol
    ///
    /// Returns the profile with the CIK zero-padded to 10 digits and the
    /// registrant name as listed by the SEC.
    ///
    /// # Errors
    /// Returns `DataError::CikNotFound` if the ticker is not found
    ///
    /// # Example
    /// ```no_run
    /// use contrail_data::edgar::EdgarClient;
    ///
    /// # async fn example() -> contrail_data::Result<()> {
    /// let client = EdgarClient::new()?;
    /// let profile = client.lookup_company("DAL").await?;
    /// println!("{} CIK: {:?}", profile.name, profile.cik);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn lookup_company(&self, ticker: &str) -> Result<CompanyProfile> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(DataError::InvalidSymbol("Empty ticker".to_string()));
        }

        let ticker_upper = ticker.to_uppercase();

        self.rate_limiter.lock().await.wait().await;
        debug!(ticker = %ticker_upper, "Fetching SEC ticker map");

        let response = self
            .client
            .get(COMPANY_TICKERS_URL)
            .send()
            .await
            .map_err(DataError::Network)?;

        if !response.status().is_success() {
            return Err(DataError::EdgarApi(format!(
                "Failed to fetch company tickers: HTTP {}",
                response.status()
            )));
        }

        let data: HashMap<String, CompanyInfo> = response
            .json()
            .await
            .map_err(|e| DataError::EdgarApi(format!("Failed to parse company tickers: {}", e)))?;

        data.into_values()
            .find(|company| company.ticker.eq_ignore_ascii_case(&ticker_upper))
            .map(|company| {
                CompanyProfile::new(
                    &ticker_upper,
                    Some(format!("{:0>10}", company.cik_str)),
                    company.title,
                )
            })
            .ok_or_else(|| DataError::CikNotFound(ticker.to_string()))
    }

    /// Download the companyfacts JSON for a CIK as raw text
    pub async fn fetch_company_facts_json(&self, cik: &str) -> Result<String> {
        if cik.is_empty() {
            return Err(DataError::InvalidSymbol("Empty CIK".to_string()));
        }

        let cik_padded = format!("{:0>10}", cik);

        self.rate_limiter.lock().await.wait().await;

        let url = format!(
            "{}/api/xbrl/companyfacts/CIK{}.json",
            self.base_url, cik_padded
        );
        info!(cik = %cik_padded, "Downloading company facts");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(DataError::Network)?;

        if !response.status().is_success() {
            return Err(DataError::EdgarApi(format!(
                "Failed to fetch company facts for CIK {}: HTTP {}",
                cik_padded,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| DataError::EdgarApi(format!("Failed to read company facts: {}", e)))
    }

    /// Download and parse the companyfacts document for a CIK
    pub async fn fetch_company_facts(&self, cik: &str) -> Result<XbrlDocument> {
        let json = self.fetch_company_facts_json(cik).await?;
        XbrlDocument::parse_json(&json)
    }
}

impl std::fmt::Debug for EdgarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgarClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_empty_ticker() {
        let client = EdgarClient::new().unwrap();
        let result = client.lookup_company("  ").await;
        assert!(matches!(result, Err(DataError::InvalidSymbol(_))));
    }

    #[tokio::test]
    async fn test_fetch_facts_empty_cik() {
        let client = EdgarClient::new().unwrap();
        let result = client.fetch_company_facts("").await;
        assert!(matches!(result, Err(DataError::InvalidSymbol(_))));
    }

    #[tokio::test]
    #[ignore = "requires network access to sec.gov"]
    async fn test_lookup_company() {
        let client = EdgarClient::new().unwrap();
        let profile = client.lookup_company("dal").await.unwrap();
        assert_eq!(profile.symbol, "DAL");
        assert_eq!(profile.cik.as_deref().map(str::len), Some(10));
    }

    #[tokio::test]
    #[ignore = "requires network access to sec.gov"]
    async fn test_lookup_company_not_found() {
        let client = EdgarClient::new().unwrap();
        let result = client.lookup_company("NOTAREALTICKER123").await;
        assert!(matches!(result, Err(DataError::CikNotFound(_))));
    }

    #[tokio::test]
    #[ignore = "requires network access to sec.gov"]
    async fn test_fetch_company_facts() {
        let client = EdgarClient::new().unwrap();
        let cik = client.lookup_company("UAL").await.unwrap().cik.unwrap();
        let doc = client.fetch_company_facts(&cik).await.unwrap();
        assert!(!doc.facts.is_empty());
        assert!(!doc.annual_years().is_empty());
    }

    #[tokio::test]
    async fn test_rate_limiter_spacing() {
        let mut limiter = RateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
