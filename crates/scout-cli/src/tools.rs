//! Agent tools bridging market data, shared event state and the cache.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;
use scout_agent::tool::schema;
use scout_agent::{AgentError, Result, Tool};
use scout_cache::{PersistentCache, StockNewsKeyGenerator};
use scout_market::{AlphaVantageClient, NewsApiClient, find_workdays};
use serde_json::{Value, json};
use tracing::warn;

/// Shared holder for the event list the workflow steps hand to each other.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Mutex<Option<Value>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, events: Value) {
        *self.events.lock().unwrap_or_else(PoisonError::into_inner) = Some(events);
    }

    pub fn get(&self) -> Option<Value> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn tool_failed(tool: &str, message: impl Into<String>) -> AgentError {
    AgentError::ToolFailed {
        name: tool.to_string(),
        message: message.into(),
    }
}

fn required_str<'a>(input: &'a Value, tool: &str, field: &str) -> Result<&'a str> {
    input
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| tool_failed(tool, format!("missing required field: {field}")))
}

fn parse_date(tool: &str, text: &str) -> Result<NaiveDate> {
    text.parse()
        .map_err(|_| tool_failed(tool, format!("invalid date, expected YYYY-MM-DD: {text}")))
}

/// Search recent news for a company.
///
/// Lookup failures degrade to an empty article list so one flaky news query
/// does not sink the whole research run.
pub struct FetchPastNewsTool {
    client: Arc<NewsApiClient>,
}

impl FetchPastNewsTool {
    pub fn new(client: Arc<NewsApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for FetchPastNewsTool {
    fn name(&self) -> &str {
        "fetch_past_news"
    }

    fn description(&self) -> &str {
        "Get news about a company published in the past N days"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            [
                ("ticker", schema::string("Stock ticker symbol, e.g. TSM")),
                (
                    "company",
                    schema::string("Company name used to widen the search"),
                ),
                (
                    "past_days",
                    schema::integer("How many days of news history to search"),
                ),
            ],
            &["ticker", "past_days"],
        )
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let ticker = required_str(&input, self.name(), "ticker")?;
        let company = input
            .get("company")
            .and_then(Value::as_str)
            .unwrap_or(ticker);
        let past_days = input
            .get("past_days")
            .and_then(Value::as_u64)
            .and_then(|days| u32::try_from(days).ok())
            .unwrap_or(5);

        match self.client.past_news(ticker, company, past_days).await {
            Ok(items) => Ok(serde_json::to_value(items)?),
            Err(err) => {
                warn!(ticker, error = %err, "news lookup failed, returning no articles");
                Ok(json!([]))
            }
        }
    }
}

/// Open and close prices for one symbol on one date.
pub struct FetchStockPricesTool {
    client: Arc<AlphaVantageClient>,
}

impl FetchStockPricesTool {
    pub fn new(client: Arc<AlphaVantageClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for FetchStockPricesTool {
    fn name(&self) -> &str {
        "fetch_stock_prices"
    }

    fn description(&self) -> &str {
        "Get the open and close price of a stock on a given date"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            [
                ("symbol", schema::string("Stock ticker symbol")),
                ("date", schema::string("Trading date, YYYY-MM-DD")),
            ],
            &["symbol", "date"],
        )
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let symbol = required_str(&input, self.name(), "symbol")?;
        let date_text = required_str(&input, self.name(), "date")?;
        let date = parse_date(self.name(), date_text)?;

        let prices = self
            .client
            .daily_prices(symbol, date)
            .await
            .map_err(|err| tool_failed(self.name(), err.to_string()))?;

        match prices {
            Some((open, close)) => Ok(json!({
                "symbol": symbol,
                "date": date_text,
                "open": open,
                "close": close,
            })),
            None => Ok(json!({
                "symbol": symbol,
                "date": date_text,
                "open": null,
                "close": null,
            })),
        }
    }
}

/// Weekend-aware date arithmetic for pricing an event.
pub struct FindWorkdaysTool;

#[async_trait]
impl Tool for FindWorkdaysTool {
    fn name(&self) -> &str {
        "find_workdays"
    }

    fn description(&self) -> &str {
        "Find the closest workday and the previous workday for a date"
    }

    fn input_schema(&self) -> Value {
        schema::object([("date", schema::string("Date, YYYY-MM-DD"))], &["date"])
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let date_text = required_str(&input, self.name(), "date")?;
        let date = parse_date(self.name(), date_text)?;
        let (closest, previous) = find_workdays(date);
        Ok(json!({
            "closest_workday": closest.to_string(),
            "previous_workday": previous.to_string(),
        }))
    }
}

/// Store the extracted event list for the following workflow steps.
pub struct SaveEventsTool {
    store: Arc<EventStore>,
}

impl SaveEventsTool {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SaveEventsTool {
    fn name(&self) -> &str {
        "save_events"
    }

    fn description(&self) -> &str {
        "Save the extracted stock events so later steps can use them"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            [(
                "events",
                schema::array(
                    "Stock events in chronological order",
                    schema::object(
                        [
                            ("date", schema::string("Event date, YYYY-MM-DD")),
                            ("event", schema::string("One-sentence event description")),
                            ("open", schema::number("Opening price on the closest workday")),
                            ("close", schema::number("Closing price on the closest workday")),
                        ],
                        &["date", "event"],
                    ),
                ),
            )],
            &["events"],
        )
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let events = input
            .get("events")
            .cloned()
            .ok_or_else(|| tool_failed(self.name(), "missing required field: events"))?;
        let count = events.as_array().map_or(0, Vec::len);
        self.store.save(events);
        Ok(json!({"saved": count}))
    }
}

/// Retrieve the event list saved by an earlier workflow step.
pub struct GetEventsTool {
    store: Arc<EventStore>,
}

impl GetEventsTool {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GetEventsTool {
    fn name(&self) -> &str {
        "get_events"
    }

    fn description(&self) -> &str {
        "Retrieve the stock events saved by an earlier step"
    }

    fn input_schema(&self) -> Value {
        schema::object([], &[])
    }

    async fn execute(&self, _input: Value) -> Result<Value> {
        self.store
            .get()
            .ok_or_else(|| tool_failed(self.name(), "no events stored yet"))
    }
}

/// Persist the saved events through the bounded cache.
///
/// The cache key is fixed to the run's symbol and lookback window so the
/// stored entry matches the lookup the next invocation performs.
pub struct CacheEventsTool {
    cache: Arc<PersistentCache<StockNewsKeyGenerator>>,
    store: Arc<EventStore>,
    symbol: String,
    past_days: u32,
}

impl CacheEventsTool {
    pub fn new(
        cache: Arc<PersistentCache<StockNewsKeyGenerator>>,
        store: Arc<EventStore>,
        symbol: impl Into<String>,
        past_days: u32,
    ) -> Self {
        Self {
            cache,
            store,
            symbol: symbol.into(),
            past_days,
        }
    }
}

#[async_trait]
impl Tool for CacheEventsTool {
    fn name(&self) -> &str {
        "cache_events"
    }

    fn description(&self) -> &str {
        "Persist the saved events so future runs can skip the research"
    }

    fn input_schema(&self) -> Value {
        schema::object([], &[])
    }

    async fn execute(&self, _input: Value) -> Result<Value> {
        let events = self
            .store
            .get()
            .ok_or_else(|| tool_failed(self.name(), "no events stored yet"))?;
        self.cache
            .add(events, (self.symbol.as_str(), self.past_days))
            .await;
        Ok(json!("events cached"))
    }
}
