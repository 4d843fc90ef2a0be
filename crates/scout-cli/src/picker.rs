//! Interactive company and lookback selection.

use anyhow::{Result, anyhow, bail};
use dialoguer::{FuzzySelect, Input, theme::ColorfulTheme};
use scout_market::{CompanyListing, ListingDirectory};

/// Picker rows in `SYMBOL - Name` form.
pub fn listing_rows(listings: &ListingDirectory) -> Vec<String> {
    listings
        .companies()
        .iter()
        .map(|company| format!("{} - {}", company.symbol, company.name))
        .collect()
}

/// Find a listing by ticker symbol, case-insensitively.
pub fn resolve_company(listings: &ListingDirectory, symbol: &str) -> Result<CompanyListing> {
    listings
        .companies()
        .iter()
        .find(|company| company.symbol.eq_ignore_ascii_case(symbol))
        .cloned()
        .ok_or_else(|| anyhow!("unknown symbol: {symbol}"))
}

/// Fuzzy-searchable company picker over the listing directory.
pub fn pick_company(listings: &ListingDirectory) -> Result<CompanyListing> {
    if listings.is_empty() {
        bail!("company listing is empty");
    }
    let rows = listing_rows(listings);
    let selection = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a company")
        .items(&rows)
        .default(0)
        .interact()?;
    Ok(listings.companies()[selection].clone())
}

/// Prompt for the news lookback window in days.
pub fn pick_past_days(max_past_days: u32) -> Result<u32> {
    let days = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Days of news history (1-{max_past_days})"))
        .default(5_u32)
        .validate_with(|days: &u32| -> Result<(), String> {
            if (1..=max_past_days).contains(days) {
                Ok(())
            } else {
                Err(format!("enter a number between 1 and {max_past_days}"))
            }
        })
        .interact_text()?;
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_market::AlphaVantageClient;
    use std::fs;

    async fn directory() -> ListingDirectory {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickers.csv");
        fs::write(
            &path,
            "symbol,name\nTSM,Taiwan Semiconductor Manufacturing Company Ltd\nAAPL,Apple Inc\n",
        )
        .unwrap();
        let client = AlphaVantageClient::new("unused", 5);
        ListingDirectory::load_or_fetch(&path, &client).await.unwrap()
    }

    #[tokio::test]
    async fn test_listing_rows_format() {
        let listings = directory().await;
        let rows = listing_rows(&listings);
        assert_eq!(rows[0], "TSM - Taiwan Semiconductor Manufacturing Company Ltd");
        assert_eq!(rows[1], "AAPL - Apple Inc");
    }

    #[tokio::test]
    async fn test_resolve_company_is_case_insensitive() {
        let listings = directory().await;
        let company = resolve_company(&listings, "aapl").unwrap();
        assert_eq!(company.symbol, "AAPL");
        assert_eq!(company.name, "Apple Inc");
    }

    #[tokio::test]
    async fn test_resolve_unknown_symbol() {
        let listings = directory().await;
        let err = resolve_company(&listings, "ZZZZ").unwrap_err();
        assert!(err.to_string().contains("unknown symbol"));
    }
}
