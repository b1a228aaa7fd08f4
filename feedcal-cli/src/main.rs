mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use feedcal_core::FeedConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "feedcal")]
#[command(about = "Browse upcoming events from a school calendar feed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where to read the calendar from. Defaults to `feed_url` from the config.
#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// Feed URL (https:// or webcal://)
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Local .ics file
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// The upcoming events strip
    Upcoming {
        /// Number of events to show (falls back to default_limit if not a positive integer)
        #[arg(short, long)]
        limit: Option<String>,

        #[command(flatten)]
        source: SourceArgs,

        /// Print events as JSON
        #[arg(long)]
        json: bool,

        /// Refresh every SECS seconds, rotating the featured event
        #[arg(short, long, value_name = "SECS")]
        watch: Option<u64>,
    },
    /// All upcoming events grouped by month
    Calendar {
        #[command(flatten)]
        source: SourceArgs,

        /// Print months as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show config path and effective values
    Config {
        /// Write a commented config template if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upcoming {
            limit,
            source,
            json,
            watch,
        } => {
            let config = FeedConfig::load()?;
            let source = commands::resolve_source(&source, &config)?;
            let limit = feedcal_core::parse_limit(limit.as_deref(), config.default_limit);
            match watch {
                Some(secs) => commands::upcoming::watch(source, limit, secs).await,
                None => commands::upcoming::run(source, limit, json).await,
            }
        }
        Commands::Calendar { source, json } => {
            let config = FeedConfig::load()?;
            let source = commands::resolve_source(&source, &config)?;
            commands::calendar::run(source, json).await
        }
        Commands::Config { init } => commands::config::run(init),
    }
}
