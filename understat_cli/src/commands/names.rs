use anyhow::Result;
use understat_lib::filter::{players, teams};
use understat_lib::{CancelToken, FetchConfig};

use crate::commands::shots::{collect, ShotsArgs};
use crate::output::{print_names, write_names_csv, OutputFormat};

/// Distinct team names across the selected matches.
pub async fn run_teams(
    args: &ShotsArgs,
    config: &FetchConfig,
    cancel: CancelToken,
    format: &OutputFormat,
) -> Result<()> {
    let table = collect(args, config, cancel).await?;
    emit(&teams(&table), args, ("teams", "team"), format)
}

/// Distinct player names, limited to `--team` when given.
pub async fn run_players(
    args: &ShotsArgs,
    config: &FetchConfig,
    cancel: CancelToken,
    format: &OutputFormat,
) -> Result<()> {
    let table = collect(args, config, cancel).await?;
    let names = players(&table, args.team.as_deref());
    emit(&names, args, ("players", "player"), format)
}

fn emit(
    names: &[String],
    args: &ShotsArgs,
    tags: (&str, &str),
    format: &OutputFormat,
) -> Result<()> {
    if let Some(path) = &args.out {
        write_names_csv(names, path)?;
        eprintln!("Wrote {} {} to {}", names.len(), tags.0, path.display());
        return Ok(());
    }
    print_names(names, tags, format)
}
