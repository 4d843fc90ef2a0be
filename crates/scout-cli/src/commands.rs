//! Command handlers for the stockscout binary.

use std::sync::Arc;

use anyhow::{Result, bail};
use scout_agent::{
    AgentWorkflow, DeepSeekConfig, DeepSeekProvider, ExecutorConfig, ToolRegistry, WorkflowStep,
};
use scout_cache::{PersistentCache, StockNewsKeyGenerator};
use scout_market::{
    AlphaVantageClient, FinnhubClient, ListingDirectory, NewsApiClient, clean_company_name,
};
use tracing::info;

use crate::config::ScoutConfig;
use crate::tools::{
    CacheEventsTool, EventStore, FetchPastNewsTool, FetchStockPricesTool, FindWorkdaysTool,
    GetEventsTool, SaveEventsTool,
};
use crate::{events, picker, prompts};

/// The user turn is fixed; the step prompts carry the real instructions.
const USER_MESSAGE: &str = "Show me stock price change related news";

// Free-tier request quotas.
const ALPHA_VANTAGE_RATE_LIMIT: u32 = 5;
const NEWS_API_RATE_LIMIT: u32 = 30;
const FINNHUB_RATE_LIMIT: u32 = 60;

/// Research the events behind a stock's recent moves.
///
/// Serves from the persistent cache when today's (symbol, days) entry
/// exists; otherwise runs the research / format / archive agent workflow.
pub async fn run_events(
    config: &ScoutConfig,
    symbol: Option<String>,
    days: Option<u32>,
) -> Result<()> {
    let alpha = Arc::new(AlphaVantageClient::new(
        config.require_alpha_vantage_key()?,
        ALPHA_VANTAGE_RATE_LIMIT,
    ));
    let listings = ListingDirectory::load_or_fetch(&config.tickers_path, &alpha).await?;

    let company = match symbol {
        Some(symbol) => picker::resolve_company(&listings, &symbol)?,
        None => picker::pick_company(&listings)?,
    };
    let company_name = clean_company_name(&company.name);

    let past_days = match days {
        Some(days) if (1..=config.max_past_days).contains(&days) => days,
        Some(days) => bail!(
            "days must be between 1 and {}, got {days}",
            config.max_past_days
        ),
        None => picker::pick_past_days(config.max_past_days)?,
    };

    info!(
        symbol = %company.symbol,
        company = %company_name,
        past_days,
        "researching stock events"
    );

    let cache = Arc::new(
        PersistentCache::open(&config.cache_path, config.cache_max_size, StockNewsKeyGenerator)
            .await,
    );
    if let Some(cached) = cache.get((company.symbol.as_str(), past_days)).await {
        info!(symbol = %company.symbol, "serving events from cache");
        print_events(&company.symbol, &company_name, &events::decode_events_str(&cached));
        return Ok(());
    }

    let news = Arc::new(NewsApiClient::new(
        config.require_news_api_key()?,
        NEWS_API_RATE_LIMIT,
    ));
    let store = Arc::new(EventStore::new());

    let registry = Arc::new(ToolRegistry::new());
    registry.register(Arc::new(FetchPastNewsTool::new(news)));
    registry.register(Arc::new(FetchStockPricesTool::new(alpha)));
    registry.register(Arc::new(FindWorkdaysTool));
    registry.register(Arc::new(SaveEventsTool::new(store.clone())));
    registry.register(Arc::new(GetEventsTool::new(store.clone())));
    registry.register(Arc::new(CacheEventsTool::new(
        cache,
        store.clone(),
        company.symbol.clone(),
        past_days,
    )));

    let provider_config = DeepSeekConfig::new(config.require_deepseek_key()?)
        .with_timeout(config.request_timeout_secs);
    let provider = Arc::new(DeepSeekProvider::with_config(provider_config)?);

    let executor_config = ExecutorConfig {
        model: config.model.clone(),
        ..ExecutorConfig::default()
    };
    let workflow = AgentWorkflow::with_config(provider, registry, executor_config)
        .add_step(WorkflowStep::new(
            "research",
            prompts::render(prompts::RESEARCH, &company.symbol, &company_name, past_days)?,
        ))
        .add_step(WorkflowStep::new(
            "format",
            prompts::render(prompts::FORMAT, &company.symbol, &company_name, past_days)?,
        ))
        .add_step(WorkflowStep::new(
            "archive",
            prompts::render(prompts::ARCHIVE, &company.symbol, &company_name, past_days)?,
        ));

    let summary = workflow.run(USER_MESSAGE).await?;
    println!("\n{summary}\n");

    match store.get() {
        Some(value) => print_events(&company.symbol, &company_name, &events::decode_events(&value)),
        None => println!("The research run saved no events."),
    }
    Ok(())
}

/// Print the current price of a stock.
pub async fn run_quote(config: &ScoutConfig, symbol: Option<String>) -> Result<()> {
    let alpha = AlphaVantageClient::new(
        config.require_alpha_vantage_key()?,
        ALPHA_VANTAGE_RATE_LIMIT,
    );
    let listings = ListingDirectory::load_or_fetch(&config.tickers_path, &alpha).await?;

    let company = match symbol {
        Some(symbol) => picker::resolve_company(&listings, &symbol)?,
        None => picker::pick_company(&listings)?,
    };
    let name = clean_company_name(&company.name);

    let finnhub = FinnhubClient::new(config.require_finnhub_key()?, FINNHUB_RATE_LIMIT);
    let price = finnhub.quote(&company.symbol).await?;
    println!("Current stock price for {} ({}): {}$", company.symbol, name, price);
    Ok(())
}

/// List the news source ids available to the research step.
pub async fn run_sources(config: &ScoutConfig) -> Result<()> {
    let news = NewsApiClient::new(config.require_news_api_key()?, NEWS_API_RATE_LIMIT);
    let sources = news.sources().await?;

    println!("{} news sources available:", sources.len());
    for source in &sources {
        println!("  {source}");
    }
    Ok(())
}

fn print_events(symbol: &str, company: &str, events: &[events::StockEvent]) {
    if events.is_empty() {
        println!("No notable events found for {company} ({symbol}).");
    } else {
        println!("Stock events for {company} ({symbol}):");
        println!("{}", events::render_events_table(events));
    }
}
