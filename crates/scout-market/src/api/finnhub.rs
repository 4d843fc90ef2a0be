//! Finnhub API client for real-time quotes

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;

use crate::error::{MarketError, Result};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Finnhub client for quote data
pub struct FinnhubClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl FinnhubClient {
    /// Create a new Finnhub client with rate limiting
    ///
    /// # Arguments
    /// * `api_key` - Finnhub API key
    /// * `rate_limit` - Requests per minute (free tier: 60)
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Self {
        let quota =
            Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(60).unwrap()));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            rate_limiter,
        }
    }

    /// Create from environment variable FINNHUB_API_KEY with default rate limit
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FINNHUB_API_KEY").map_err(|_| {
            MarketError::ConfigError("FINNHUB_API_KEY environment variable not set".to_string())
        })?;

        Ok(Self::new(api_key, 60))
    }

    /// Get the current price for a symbol (the `c` field of `/quote`)
    pub async fn quote(&self, symbol: &str) -> Result<f64> {
        self.rate_limiter.until_ready().await;

        let url = format!(
            "https://finnhub.io/api/v1/quote?symbol={}&token={}",
            symbol, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MarketError::ApiError(format!("Finnhub request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::ApiError(format!(
                "Finnhub API error {status}: {body}"
            )));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| MarketError::ApiError(format!("Failed to parse Finnhub response: {e}")))?;

        parse_quote(symbol, &data)
    }
}

/// Extract the current price from a `/quote` response body
fn parse_quote(symbol: &str, data: &serde_json::Value) -> Result<f64> {
    data.get("c")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| MarketError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "quote response missing current price".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_finnhub_client_creation() {
        let client = FinnhubClient::new("test_key", 60);
        assert_eq!(client.api_key, "test_key");
    }

    #[test]
    fn test_parse_quote() {
        let data = json!({"c": 261.74, "h": 263.31, "l": 260.68, "o": 261.07, "pc": 259.45});

        let price = parse_quote("AAPL", &data).unwrap();
        assert!((price - 261.74).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_quote_without_price_is_data_unavailable() {
        let data = json!({"error": "Symbol not supported"});

        let err = parse_quote("NOPE", &data).unwrap_err();
        assert!(matches!(err, MarketError::DataUnavailable { .. }));
    }
}
