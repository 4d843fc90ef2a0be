//! Configuration for the stockscout binary.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use scout_utils::CredentialStore;

/// Runtime configuration: API keys, paths and limits.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// DeepSeek API key (LLM provider).
    pub deepseek_api_key: Option<String>,
    /// Alpha Vantage API key (prices, company listing).
    pub alpha_vantage_api_key: Option<String>,
    /// NewsAPI key (news search).
    pub news_api_key: Option<String>,
    /// Finnhub API key (quotes).
    pub finnhub_api_key: Option<String>,
    /// Model identifier passed to the provider.
    pub model: String,
    /// Upper bound on the news lookback window.
    pub max_past_days: u32,
    /// Maximum number of entries the event cache holds.
    pub cache_max_size: usize,
    /// Backing file for the event cache.
    pub cache_path: PathBuf,
    /// Cached two-column company listing CSV.
    pub tickers_path: PathBuf,
    /// Provider request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            deepseek_api_key: None,
            alpha_vantage_api_key: None,
            news_api_key: None,
            finnhub_api_key: None,
            model: "deepseek-chat".to_string(),
            max_past_days: 30,
            cache_max_size: 100,
            cache_path: PathBuf::from("data/stock_news_cache.json"),
            tickers_path: PathBuf::from("data/tickers.csv"),
            request_timeout_secs: 120,
        }
    }
}

impl ScoutConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ScoutConfigBuilder {
        ScoutConfigBuilder::default()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            bail!("model must not be empty");
        }
        if self.max_past_days == 0 {
            bail!("max_past_days must be greater than 0");
        }
        Ok(())
    }

    pub fn require_deepseek_key(&self) -> Result<&str> {
        self.deepseek_api_key
            .as_deref()
            .context("DeepSeek API key not found; set DEEPSEEK_API_KEY or credentials/deepseek.txt")
    }

    pub fn require_alpha_vantage_key(&self) -> Result<&str> {
        self.alpha_vantage_api_key.as_deref().context(
            "Alpha Vantage API key not found; set ALPHA_VANTAGE_API_KEY or credentials/alpha.vantage.txt",
        )
    }

    pub fn require_news_api_key(&self) -> Result<&str> {
        self.news_api_key
            .as_deref()
            .context("NewsAPI key not found; set NEWS_API_KEY or credentials/newsapi.txt")
    }

    pub fn require_finnhub_key(&self) -> Result<&str> {
        self.finnhub_api_key
            .as_deref()
            .context("Finnhub API key not found; set FINNHUB_API_KEY or credentials/finnhub.txt")
    }
}

/// Builder for [`ScoutConfig`].
///
/// API keys left unset are resolved from the environment first and the
/// credentials directory second.
#[derive(Debug, Default)]
pub struct ScoutConfigBuilder {
    credentials_dir: Option<PathBuf>,
    deepseek_api_key: Option<String>,
    alpha_vantage_api_key: Option<String>,
    news_api_key: Option<String>,
    finnhub_api_key: Option<String>,
    model: Option<String>,
    max_past_days: Option<u32>,
    cache_max_size: Option<usize>,
    cache_path: Option<PathBuf>,
    tickers_path: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
}

impl ScoutConfigBuilder {
    /// Set the directory searched for `<provider>.txt` credential files.
    pub fn credentials_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.credentials_dir = Some(dir.into());
        self
    }

    pub fn deepseek_api_key(mut self, key: impl Into<String>) -> Self {
        self.deepseek_api_key = Some(key.into());
        self
    }

    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    pub fn finnhub_api_key(mut self, key: impl Into<String>) -> Self {
        self.finnhub_api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn max_past_days(mut self, days: u32) -> Self {
        self.max_past_days = Some(days);
        self
    }

    pub fn cache_max_size(mut self, max_size: usize) -> Self {
        self.cache_max_size = Some(max_size);
        self
    }

    pub fn cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    pub fn tickers_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tickers_path = Some(path.into());
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Build the configuration, resolving unset API keys.
    pub fn build(self) -> Result<ScoutConfig> {
        let defaults = ScoutConfig::default();
        let credentials = CredentialStore::new(
            self.credentials_dir
                .unwrap_or_else(|| PathBuf::from("credentials")),
        );

        let config = ScoutConfig {
            deepseek_api_key: self
                .deepseek_api_key
                .or_else(|| credentials.resolve("DEEPSEEK_API_KEY", "deepseek.txt")),
            alpha_vantage_api_key: self
                .alpha_vantage_api_key
                .or_else(|| credentials.resolve("ALPHA_VANTAGE_API_KEY", "alpha.vantage.txt")),
            news_api_key: self
                .news_api_key
                .or_else(|| credentials.resolve("NEWS_API_KEY", "newsapi.txt")),
            finnhub_api_key: self
                .finnhub_api_key
                .or_else(|| credentials.resolve("FINNHUB_API_KEY", "finnhub.txt")),
            model: self.model.unwrap_or(defaults.model),
            max_past_days: self.max_past_days.unwrap_or(defaults.max_past_days),
            cache_max_size: self.cache_max_size.unwrap_or(defaults.cache_max_size),
            cache_path: self.cache_path.unwrap_or(defaults.cache_path),
            tickers_path: self.tickers_path.unwrap_or(defaults.tickers_path),
            request_timeout_secs: self
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
        };

        config.validate()?;
        Ok(config)
    }
}
