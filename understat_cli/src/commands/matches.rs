use anyhow::Result;
use clap::Args;
use understat_lib::{validation, FetchConfig, ScrapeClient};

use crate::output::{
    print_json, print_matches_csv, print_matches_markdown, print_matches_table, print_matches_xml,
    OutputFormat,
};

#[derive(Args)]
pub struct MatchesArgs {
    /// League code: EPL, La_liga, Bundesliga, Serie_A, Ligue_1, RFPL
    #[arg(long)]
    pub league: String,

    /// Season start year (e.g. 2024 for 2024/25)
    #[arg(long)]
    pub year: i32,

    /// Include fixtures that have not been played yet
    #[arg(long)]
    pub all: bool,
}

pub async fn run(args: &MatchesArgs, config: &FetchConfig, format: &OutputFormat) -> Result<()> {
    let league = validation::validate_league(&args.league)?;
    let year = validation::validate_year(args.year)?;

    let client = ScrapeClient::from_config(config);
    let matches = if args.all {
        client.league_listing(league, year).await?
    } else {
        client.league_matches(league, year).await?
    };

    eprintln!("{} {}: {} matches", league, year, matches.len());

    match format {
        OutputFormat::Table => print_matches_table(&matches),
        OutputFormat::Json => print_json(&matches),
        OutputFormat::Csv => print_matches_csv(&matches)?,
        OutputFormat::Markdown => print_matches_markdown(&matches),
        OutputFormat::Xml => print_matches_xml(&matches)?,
    }

    Ok(())
}
