//! Alpha Vantage API client

use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroU32;
use std::sync::Arc;

use chrono::NaiveDate;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{MarketError, Result};

const BASE_URL: &str = "https://www.alphavantage.co/query";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// One trading day of prices from the daily series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub open: f64,
    pub close: f64,
}

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client with API key and rate limit
    ///
    /// # Arguments
    /// * `api_key` - Alpha Vantage API key
    /// * `rate_limit` - Maximum requests per minute (default: 5 for free tier)
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Self {
        let quota =
            Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(5).unwrap()));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            rate_limiter,
        }
    }

    /// Create from environment variable ALPHA_VANTAGE_API_KEY with default rate limit
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ALPHA_VANTAGE_API_KEY").map_err(|_| {
            MarketError::ConfigError(
                "ALPHA_VANTAGE_API_KEY environment variable not set".to_string(),
            )
        })?;

        Ok(Self::new(api_key, 5)) // Default to free tier limit
    }

    /// Get the daily open/close series for a symbol, keyed by trading day
    pub async fn daily_series(&self, symbol: &str) -> Result<BTreeMap<NaiveDate, DailyBar>> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        let mut params = HashMap::new();
        params.insert("function", "TIME_SERIES_DAILY");
        params.insert("symbol", symbol);
        params.insert("apikey", &self.api_key);

        let response = self.client.get(BASE_URL).query(&params).send().await?;
        let data: serde_json::Value = response.json().await?;

        parse_daily_series(symbol, &data)
    }

    /// Get the open and close price for one trading day
    ///
    /// Returns `None` when the series has no entry for that date (market
    /// holiday, weekend, or a symbol listed after the date).
    pub async fn daily_prices(&self, symbol: &str, date: NaiveDate) -> Result<Option<(f64, f64)>> {
        let series = self.daily_series(symbol).await?;
        Ok(series.get(&date).map(|bar| (bar.open, bar.close)))
    }

    /// Download the listing status CSV (all active symbols with names)
    ///
    /// Returns the raw CSV body; column selection and parsing live in the
    /// listings module.
    pub async fn listing_status(&self) -> Result<String> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        let mut params = HashMap::new();
        params.insert("function", "LISTING_STATUS");
        params.insert("apikey", &self.api_key);

        let response = self.client.get(BASE_URL).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(MarketError::ApiError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }
}

/// Extract the daily bars from a TIME_SERIES_DAILY response body
fn parse_daily_series(
    symbol: &str,
    data: &serde_json::Value,
) -> Result<BTreeMap<NaiveDate, DailyBar>> {
    // Check for API error messages
    if let Some(error) = data.get("Error Message") {
        return Err(MarketError::ApiError(error.to_string()));
    }

    if data.get("Note").is_some() {
        return Err(MarketError::RateLimitExceeded {
            provider: "Alpha Vantage".to_string(),
        });
    }

    let series = data
        .get("Time Series (Daily)")
        .ok_or_else(|| MarketError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "no daily time series in response".to_string(),
        })?;

    let mut bars = BTreeMap::new();
    if let Some(obj) = series.as_object() {
        for (date, values) in obj {
            let Ok(date) = date.parse::<NaiveDate>() else {
                continue;
            };
            let open = values["1. open"]
                .as_str()
                .unwrap_or("0")
                .parse()
                .unwrap_or(0.0);
            let close = values["4. close"]
                .as_str()
                .unwrap_or("0")
                .parse()
                .unwrap_or(0.0);

            bars.insert(date, DailyBar { open, close });
        }
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = AlphaVantageClient::new("test_key", 5);
        assert_eq!(client.api_key, "test_key");
    }

    #[test]
    fn test_parse_daily_series() {
        let data = json!({
            "Meta Data": {"2. Symbol": "AAPL"},
            "Time Series (Daily)": {
                "2025-05-20": {"1. open": "208.95", "2. high": "210.0", "3. low": "206.1", "4. close": "206.86", "5. volume": "42496643"},
                "2025-05-19": {"1. open": "207.91", "2. high": "209.48", "3. low": "204.26", "4. close": "208.78", "5. volume": "46140527"}
            }
        });

        let bars = parse_daily_series("AAPL", &data).unwrap();
        assert_eq!(bars.len(), 2);

        let date = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let bar = bars.get(&date).unwrap();
        assert!((bar.open - 208.95).abs() < f64::EPSILON);
        assert!((bar.close - 206.86).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_daily_series_reports_api_error() {
        let data = json!({"Error Message": "Invalid API call."});

        let err = parse_daily_series("NOPE", &data).unwrap_err();
        assert!(matches!(err, MarketError::ApiError(_)));
    }

    #[test]
    fn test_parse_daily_series_reports_rate_limit_note() {
        let data = json!({"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."});

        let err = parse_daily_series("AAPL", &data).unwrap_err();
        assert!(matches!(err, MarketError::RateLimitExceeded { .. }));
    }

    #[test]
    fn test_parse_daily_series_without_series_is_data_unavailable() {
        let data = json!({"Meta Data": {}});

        let err = parse_daily_series("AAPL", &data).unwrap_err();
        assert!(matches!(err, MarketError::DataUnavailable { .. }));
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_daily_series_live() {
        let client = AlphaVantageClient::from_env().unwrap();
        let bars = client.daily_series("AAPL").await.unwrap();
        assert!(!bars.is_empty());
    }
}
