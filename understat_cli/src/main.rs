mod commands;
mod output;
mod xml_output;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use understat_lib::{CancelToken, FetchConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "understat")]
#[command(about = "Scrape shot-level match data from Understat")]
struct Cli {
    /// Output format: table, json, csv, markdown, xml
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Per-request timeout in seconds (overrides UNDERSTAT_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Site root to scrape (overrides UNDERSTAT_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the matches of a league season
    Matches(commands::matches::MatchesArgs),
    /// Aggregate shots from one or more matches
    Shots(commands::shots::ShotsArgs),
    /// Per-player shot, goal and xG totals
    Summary(commands::shots::ShotsArgs),
    /// Teams that took shots in the selected matches
    Teams(commands::shots::ShotsArgs),
    /// Players who took shots in the selected matches
    Players(commands::shots::ShotsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("understat=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let mut config = FetchConfig::from_env();
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs.max(1));
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupted, cancelling...");
            on_interrupt.cancel();
        }
    });

    match &cli.command {
        Commands::Matches(args) => commands::matches::run(args, &config, &format).await?,
        Commands::Shots(args) => commands::shots::run(args, &config, cancel, &format).await?,
        Commands::Summary(args) => commands::summary::run(args, &config, cancel, &format).await?,
        Commands::Teams(args) => commands::names::run_teams(args, &config, cancel, &format).await?,
        Commands::Players(args) => {
            commands::names::run_players(args, &config, cancel, &format).await?
        }
    }

    Ok(())
}
