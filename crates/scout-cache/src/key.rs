//! Key-derivation strategies
//!
//! A cache key is derived from caller-supplied arguments by a pluggable
//! strategy, keeping the cache mechanics independent of what identifies an
//! entry.

use chrono::{Local, NaiveDate};

/// Derives the string key identifying a cache entry.
///
/// Implementations are stateless; one generator may support several
/// argument shapes by implementing the trait for each.
pub trait KeyGenerator<A>: Send + Sync {
    /// Build the key for `args`.
    fn generate_key(&self, args: A) -> String;
}

/// Key strategy for stock-news lookups: `"{symbol}:{date}:{days}"`.
///
/// The calendar date is taken at call time, so yesterday's entries stop
/// matching today's lookups without explicit TTL handling. Stale entries
/// remain in the store until capacity pressure evicts them.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockNewsKeyGenerator;

impl StockNewsKeyGenerator {
    /// Key for an explicit calendar date.
    ///
    /// [`KeyGenerator::generate_key`] uses today's local date; this is the
    /// date-independent form.
    pub fn key_for(&self, symbol: &str, date: NaiveDate, past_days: u32) -> String {
        format!("{symbol}:{date}:{past_days}")
    }
}

impl KeyGenerator<(&str, u32)> for StockNewsKeyGenerator {
    fn generate_key(&self, (symbol, past_days): (&str, u32)) -> String {
        self.key_for(symbol, Local::now().date_naive(), past_days)
    }
}
