//! API clients for market data providers

pub mod alpha_vantage;
pub mod finnhub;
pub mod news;

pub use alpha_vantage::{AlphaVantageClient, DailyBar};
pub use finnhub::FinnhubClient;
pub use news::{NewsApiClient, NewsItem};
