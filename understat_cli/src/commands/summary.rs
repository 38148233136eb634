use anyhow::Result;
use understat_lib::summary::summarize_players;
use understat_lib::{CancelToken, FetchConfig};

use crate::commands::shots::{collect, ShotsArgs};
use crate::output::{
    print_json, print_summary_csv, print_summary_markdown, print_summary_table, print_summary_xml,
    write_summary_csv, OutputFormat,
};

pub async fn run(
    args: &ShotsArgs,
    config: &FetchConfig,
    cancel: CancelToken,
    format: &OutputFormat,
) -> Result<()> {
    let table = collect(args, config, cancel).await?;
    let summary = summarize_players(&table);

    if let Some(path) = &args.out {
        write_summary_csv(&summary, path)?;
        eprintln!("Wrote {} players to {}", summary.len(), path.display());
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_summary_table(&summary),
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Csv => print_summary_csv(&summary)?,
        OutputFormat::Markdown => print_summary_markdown(&summary),
        OutputFormat::Xml => print_summary_xml(&summary)?,
    }

    Ok(())
}
