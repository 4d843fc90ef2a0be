//! stockscout: research the news events behind recent stock moves.
//!
//! Pick a company, choose how many days of news to consider, and an agent
//! workflow researches the events, prices them, summarizes them and caches
//! the result so same-day reruns are free.

mod commands;
mod config;
mod events;
mod picker;
mod prompts;
mod tools;

use clap::{Parser, Subcommand};

use crate::config::ScoutConfig;

#[derive(Parser, Debug)]
#[command(name = "stockscout")]
#[command(about = "Research the news events behind recent stock moves", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Research recent stock events (the default command)
    Events {
        /// Stock ticker symbol, skips the interactive picker
        #[arg(short, long)]
        symbol: Option<String>,
        /// Days of news history to consider
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Show the current price of a stock
    Quote {
        /// Stock ticker symbol, skips the interactive picker
        #[arg(short, long)]
        symbol: Option<String>,
    },
    /// List the available news sources
    Sources,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = scout_utils::init_tracing_with_file("logs", "stockscout");

    let cli = Cli::parse();
    let config = ScoutConfig::builder().build()?;

    match cli.command.unwrap_or(Command::Events {
        symbol: None,
        days: None,
    }) {
        Command::Events { symbol, days } => commands::run_events(&config, symbol, days).await,
        Command::Quote { symbol } => commands::run_quote(&config, symbol).await,
        Command::Sources => commands::run_sources(&config).await,
    }
}
