//! Company listing directory backing the ticker picker

use std::io::ErrorKind;
use std::path::Path;

use regex::Regex;
use tracing::info;

use crate::api::AlphaVantageClient;
use crate::error::Result;

/// Trailing company-name noise stripped before the name is used in a news
/// query: share-class markers, legal suffixes and trailing punctuation.
const COMPANY_SUFFIX_PATTERN: &str =
    r"(?i)\s*(?:-\s*Class\s+[A-Za-z]+|Company|Inc|Corp|Ltd|LLC|\.?)\s*$";

/// One listed company
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyListing {
    pub symbol: String,
    pub name: String,
}

/// The listing directory, cached on disk as a two-column `symbol,name` CSV
#[derive(Debug, Clone)]
pub struct ListingDirectory {
    companies: Vec<CompanyListing>,
}

impl ListingDirectory {
    /// Load the directory from the cached CSV at `path`, downloading the
    /// listing status from Alpha Vantage and writing the cache on first use.
    pub async fn load_or_fetch(
        path: impl AsRef<Path>,
        client: &AlphaVantageClient,
    ) -> Result<Self> {
        let path = path.as_ref();

        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "downloading company listing");
                let body = client.listing_status().await?;
                let two_columns = keep_first_two_columns(&body);

                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
                tokio::fs::write(path, &two_columns).await?;
                two_columns
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            companies: parse_listing_csv(&text),
        })
    }

    /// All listed companies in file order
    pub fn companies(&self) -> &[CompanyListing] {
        &self.companies
    }

    /// Number of listed companies
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    /// Whether the directory holds no companies
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

/// Parse the two-column `symbol,name` CSV, skipping the header row
pub fn parse_listing_csv(text: &str) -> Vec<CompanyListing> {
    text.lines()
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.split(',');
            let symbol = fields.next()?.trim();
            let name = fields.next().unwrap_or("").trim();
            if symbol.is_empty() {
                return None;
            }
            Some(CompanyListing {
                symbol: symbol.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

/// Strip one trailing legal suffix or share-class marker from a company name
///
/// `"Agilent Technologies Inc"` becomes `"Agilent Technologies"`,
/// `"Alphabet Inc - Class A"` becomes `"Alphabet Inc"`. Only the trailing
/// match is removed, so a name is shortened by at most one suffix per call.
pub fn clean_company_name(name: &str) -> String {
    let Ok(re) = Regex::new(COMPANY_SUFFIX_PATTERN) else {
        return name.to_string();
    };
    re.replace(name, "").to_string()
}

/// Keep only the first two comma-separated columns of every line
fn keep_first_two_columns(csv: &str) -> String {
    let mut out = String::new();
    for line in csv.lines() {
        let mut fields = line.splitn(3, ',');
        match (fields.next(), fields.next()) {
            (Some(first), Some(second)) => {
                out.push_str(first);
                out.push(',');
                out.push_str(second);
            }
            (Some(first), None) => out.push_str(first),
            _ => {}
        }
        out.push('\n');
    }
    out
}
