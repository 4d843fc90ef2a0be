//! # Scout Market
//!
//! Market data access for stockscout:
//!
//! - Daily open/close series and the company listing download from
//!   Alpha Vantage
//! - Real-time quotes from Finnhub
//! - Company news from NewsAPI
//! - Workday arithmetic for matching news dates to trading days
//!
//! Every provider client wraps a `reqwest::Client` with a per-provider
//! `governor` rate limiter sized for the free API tiers.

pub mod api;
pub mod calendar;
pub mod error;
pub mod listings;

// Re-export main types for convenience
pub use api::{AlphaVantageClient, DailyBar, FinnhubClient, NewsApiClient, NewsItem};
pub use calendar::find_workdays;
pub use error::{MarketError, Result};
pub use listings::{CompanyListing, ListingDirectory, clean_company_name, parse_listing_csv};
