//! NewsAPI client for company news

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use chrono::{Duration, Local};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{MarketError, Result};

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";
const SOURCES_URL: &str = "https://newsapi.org/v2/sources";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// One news item: publish date (`YYYY-MM-DD`) and the article description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub date: String,
    pub news: String,
}

/// NewsAPI client
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl NewsApiClient {
    /// Create a new NewsAPI client with rate limiting
    ///
    /// # Arguments
    /// * `api_key` - NewsAPI key
    /// * `rate_limit` - Requests per minute
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Self {
        let quota =
            Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(30).unwrap()));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            rate_limiter,
        }
    }

    /// Get news about a company published in the past `past_days` days
    ///
    /// Searches article descriptions for `"{ticker} OR ({company})"`, newest
    /// first. Articles without a description are skipped.
    pub async fn past_news(
        &self,
        ticker: &str,
        company: &str,
        past_days: u32,
    ) -> Result<Vec<NewsItem>> {
        self.rate_limiter.until_ready().await;

        let to = Local::now().date_naive();
        let from = to - Duration::days(i64::from(past_days));
        let query = format!("{ticker} OR ({company})");
        let from = from.to_string();
        let to = to.to_string();

        let mut params = HashMap::new();
        params.insert("q", query.as_str());
        params.insert("from", from.as_str());
        params.insert("to", to.as_str());
        params.insert("sortBy", "publishedAt");
        params.insert("apiKey", &self.api_key);
        params.insert("language", "en");
        params.insert("searchIn", "description");
        params.insert("page", "1");

        let response = self.client.get(EVERYTHING_URL).query(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::ApiError(format!(
                "NewsAPI error {status}: {body}"
            )));
        }

        let data: serde_json::Value = response.json().await?;
        let news = parse_articles(&data);
        info!(ticker, count = news.len(), "fetched news articles");

        Ok(news)
    }

    /// Get the available source ids from `/v2/sources`
    pub async fn sources(&self) -> Result<Vec<String>> {
        self.rate_limiter.until_ready().await;

        let mut params = HashMap::new();
        params.insert("apiKey", &self.api_key);

        let response = self.client.get(SOURCES_URL).query(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::ApiError(format!(
                "NewsAPI error {status}: {body}"
            )));
        }

        let data: serde_json::Value = response.json().await?;
        data.get("sources")
            .and_then(serde_json::Value::as_array)
            .map(|sources| {
                sources
                    .iter()
                    .filter_map(|source| source.get("id")?.as_str().map(String::from))
                    .collect()
            })
            .ok_or_else(|| {
                MarketError::ApiError("sources response missing sources list".to_string())
            })
    }
}

/// Extract date/description pairs from an `/v2/everything` response body
fn parse_articles(data: &serde_json::Value) -> Vec<NewsItem> {
    let Some(articles) = data.get("articles").and_then(serde_json::Value::as_array) else {
        return Vec::new();
    };

    articles
        .iter()
        .filter_map(|article| {
            let news = article.get("description")?.as_str()?.to_string();
            let date = article.get("publishedAt")?.as_str()?.get(..10)?.to_string();
            Some(NewsItem { date, news })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_news_client_creation() {
        let client = NewsApiClient::new("test_key", 30);
        assert_eq!(client.api_key, "test_key");
    }

    #[test]
    fn test_parse_articles_truncates_timestamps_to_dates() {
        let data = json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"publishedAt": "2025-05-20T13:45:00Z", "description": "TSM reports record revenue"},
                {"publishedAt": "2025-05-19T08:00:00Z", "description": "Chip demand stays strong"}
            ]
        });

        let news = parse_articles(&data);
        assert_eq!(
            news,
            vec![
                NewsItem {
                    date: "2025-05-20".to_string(),
                    news: "TSM reports record revenue".to_string()
                },
                NewsItem {
                    date: "2025-05-19".to_string(),
                    news: "Chip demand stays strong".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_articles_skips_null_descriptions() {
        let data = json!({
            "articles": [
                {"publishedAt": "2025-05-20T13:45:00Z", "description": null},
                {"publishedAt": "2025-05-19T08:00:00Z", "description": "Kept"}
            ]
        });

        let news = parse_articles(&data);
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].news, "Kept");
    }

    #[test]
    fn test_parse_articles_without_articles_is_empty() {
        let data = json!({"status": "error", "code": "apiKeyInvalid"});

        assert!(parse_articles(&data).is_empty());
    }
}
