use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use understat_lib::{
    validation, AggregateOptions, AggregateReport, Aggregator, CancelToken, FetchConfig, OnError,
    ScrapeClient, ShotFilter, ShotTable,
};

use crate::output::{
    print_shots_csv, print_shots_json, print_shots_markdown, print_shots_table, print_shots_xml,
    write_shots_csv, OutputFormat,
};

/// Match selection shared by the shot-based commands.
#[derive(Args)]
pub struct ShotsArgs {
    /// Match id to include; repeat for several matches
    #[arg(long = "match-id", conflicts_with_all = ["league", "year", "limit"])]
    pub match_ids: Vec<i64>,

    /// League code: EPL, La_liga, Bundesliga, Serie_A, Ligue_1, RFPL
    #[arg(long, requires = "year")]
    pub league: Option<String>,

    /// Season start year, used with --league
    #[arg(long, requires = "league")]
    pub year: Option<i32>,

    /// Only the first N completed matches of the season
    #[arg(long)]
    pub limit: Option<usize>,

    /// Leave failed matches out instead of aborting the whole batch
    #[arg(long)]
    pub skip_failed: bool,

    /// Matches fetched at once (overrides UNDERSTAT_CONCURRENCY)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Only shots taken by this team
    #[arg(long)]
    pub team: Option<String>,

    /// Only shots taken by this player
    #[arg(long)]
    pub player: Option<String>,

    /// Write the result as CSV to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub async fn run(
    args: &ShotsArgs,
    config: &FetchConfig,
    cancel: CancelToken,
    format: &OutputFormat,
) -> Result<()> {
    let table = collect(args, config, cancel).await?;

    if let Some(path) = &args.out {
        write_shots_csv(&table, path)?;
        eprintln!("Wrote {} shots to {}", table.len(), path.display());
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_shots_table(&table),
        OutputFormat::Json => print_shots_json(&table),
        OutputFormat::Csv => print_shots_csv(&table)?,
        OutputFormat::Markdown => print_shots_markdown(&table),
        OutputFormat::Xml => print_shots_xml(&table)?,
    }

    Ok(())
}

/// Fetches the selected matches and applies the team/player filter.
pub async fn collect(
    args: &ShotsArgs,
    config: &FetchConfig,
    cancel: CancelToken,
) -> Result<ShotTable> {
    let filter = build_filter(args)?;

    let on_error = if args.skip_failed {
        OnError::Skip
    } else {
        OnError::Abort
    };
    let options = AggregateOptions::default()
        .on_error(on_error)
        .concurrency(args.concurrency.unwrap_or(config.concurrency))
        .cancel_token(cancel);
    let aggregator = Aggregator::new(ScrapeClient::from_config(config), options);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} [{elapsed_precise}] {msg}")?);
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let report = if !args.match_ids.is_empty() {
        let ids = args
            .match_ids
            .iter()
            .map(|id| validation::validate_match_id(*id))
            .collect::<Result<Vec<_>, _>>()?;
        spinner.set_message(format!("fetching {} matches...", ids.len()));
        aggregator.aggregate(&ids).await
    } else if let (Some(league), Some(year)) = (&args.league, args.year) {
        let league = validation::validate_league(league)?;
        let year = validation::validate_year(year)?;
        spinner.set_message(format!("fetching {} {} matches...", league, year));
        aggregator.league_shots(league, year, args.limit).await
    } else {
        spinner.finish_and_clear();
        bail!("pass --match-id, or --league together with --year");
    };
    spinner.finish_and_clear();

    let AggregateReport { table, failures } = report?;
    for failure in &failures {
        eprintln!("Skipped match {}: {}", failure.match_id, failure.error);
    }

    let table = filter.apply(&table);
    eprintln!("{} shots", table.len());
    Ok(table)
}

fn build_filter(args: &ShotsArgs) -> Result<ShotFilter> {
    let mut filter = ShotFilter::new();
    if let Some(team) = &args.team {
        filter = filter.team(validation::validate_filter(team)?);
    }
    if let Some(player) = &args.player {
        filter = filter.player(validation::validate_filter(player)?);
    }
    Ok(filter)
}
