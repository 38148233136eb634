use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use understat_lib::types::{MatchSummary, ShotRecord};
use understat_lib::{PlayerSummary, ShotTable};

use crate::xml_output;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
    Xml,
}

impl OutputFormat {
    /// Unknown names fall back to a plain table.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "csv" => Self::Csv,
            "markdown" | "md" => Self::Markdown,
            "xml" => Self::Xml,
            _ => Self::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct MatchRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Home")]
    #[serde(rename = "Home")]
    home: String,
    #[tabled(rename = "Away")]
    #[serde(rename = "Away")]
    away: String,
    #[tabled(rename = "Score")]
    #[serde(rename = "Score")]
    score: String,
    #[tabled(rename = "xG")]
    #[serde(rename = "xG")]
    xg: String,
}

#[derive(Tabled)]
struct ShotRow {
    #[tabled(rename = "Match")]
    match_id: i64,
    #[tabled(rename = "Min")]
    minute: i64,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Situation")]
    situation: String,
    #[tabled(rename = "Type")]
    shot_type: String,
    #[tabled(rename = "xG")]
    xg: String,
    #[tabled(rename = "X")]
    x: String,
    #[tabled(rename = "Y")]
    y: String,
    #[tabled(rename = "Assist")]
    assist: String,
}

#[derive(Tabled, Serialize)]
struct SummaryRow {
    #[tabled(rename = "Team")]
    #[serde(rename = "Team")]
    team: String,
    #[tabled(rename = "Player")]
    #[serde(rename = "Player")]
    player: String,
    #[tabled(rename = "Shots")]
    #[serde(rename = "Shots")]
    shots: usize,
    #[tabled(rename = "Goals")]
    #[serde(rename = "Goals")]
    goals: usize,
    #[tabled(rename = "xG")]
    #[serde(rename = "xG")]
    xg: String,
    #[tabled(rename = "No xG")]
    #[serde(rename = "No xG")]
    missing_xg: usize,
}

#[derive(Tabled, Serialize)]
struct NameRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
}

// -- Row builders --

fn build_match_rows(matches: &[MatchSummary]) -> Vec<MatchRow> {
    matches
        .iter()
        .map(|m| MatchRow {
            id: m.id,
            date: m.datetime.format("%Y-%m-%d %H:%M").to_string(),
            home: m.home.title.clone(),
            away: m.away.title.clone(),
            score: match (m.home_goals(), m.away_goals()) {
                (Some(h), Some(a)) => format!("{}-{}", h, a),
                _ => "-".to_string(),
            },
            xg: match m.xg.as_ref().map(|xg| (xg.h, xg.a)) {
                Some((Some(h), Some(a))) => format!("{:.2}-{:.2}", h, a),
                _ => "-".to_string(),
            },
        })
        .collect()
}

fn build_shot_rows(shots: &[ShotRecord]) -> Vec<ShotRow> {
    shots
        .iter()
        .map(|s| ShotRow {
            match_id: s.match_id,
            minute: s.minute,
            team: s.team().unwrap_or_default().to_string(),
            player: s.player.clone(),
            result: s.result.to_string(),
            situation: s.situation.as_ref().map(|v| v.to_string()).unwrap_or_default(),
            shot_type: s.shot_type.as_ref().map(|v| v.to_string()).unwrap_or_default(),
            xg: format_xg(s.xg),
            x: format!("{:.3}", s.x),
            y: format!("{:.3}", s.y),
            assist: s.player_assisted.clone().unwrap_or_default(),
        })
        .collect()
}

fn build_summary_rows(summary: &[PlayerSummary]) -> Vec<SummaryRow> {
    summary
        .iter()
        .map(|p| SummaryRow {
            team: p.team.clone(),
            player: p.player.clone(),
            shots: p.shots,
            goals: p.goals,
            xg: format!("{:.2}", p.xg),
            missing_xg: p.missing_xg,
        })
        .collect()
}

fn build_name_rows(names: &[String]) -> Vec<NameRow> {
    names.iter().map(|name| NameRow { name: name.clone() }).collect()
}

// -- Table output --

pub fn print_matches_table(matches: &[MatchSummary]) {
    println!("{}", Table::new(build_match_rows(matches)));
}

pub fn print_shots_table(table: &ShotTable) {
    println!("{}", Table::new(build_shot_rows(table.rows())));
}

pub fn print_summary_table(summary: &[PlayerSummary]) {
    println!("{}", Table::new(build_summary_rows(summary)));
}

// -- Markdown output --

pub fn print_matches_markdown(matches: &[MatchSummary]) {
    let mut table = Table::new(build_match_rows(matches));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_shots_markdown(table: &ShotTable) {
    let mut out = Table::new(build_shot_rows(table.rows()));
    out.with(Style::markdown());
    println!("{}", out);
}

pub fn print_summary_markdown(summary: &[PlayerSummary]) {
    let mut table = Table::new(build_summary_rows(summary));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_matches_csv(matches: &[MatchSummary]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_match_rows(matches) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Full shot table: every column, header row first, nulls as empty fields.
pub fn print_shots_csv(table: &ShotTable) -> Result<()> {
    write_table_csv(table, std::io::stdout())
}

pub fn write_shots_csv(table: &ShotTable, path: &Path) -> Result<()> {
    write_table_csv(table, std::fs::File::create(path)?)
}

fn write_table_csv<W: Write>(table: &ShotTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns())?;
    for row in table.string_rows() {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_summary_csv(summary: &[PlayerSummary]) -> Result<()> {
    write_summary_rows(summary, std::io::stdout())
}

pub fn write_summary_csv(summary: &[PlayerSummary], path: &Path) -> Result<()> {
    write_summary_rows(summary, std::fs::File::create(path)?)
}

fn write_summary_rows<W: Write>(summary: &[PlayerSummary], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in build_summary_rows(summary) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- XML output --

pub fn print_matches_xml(matches: &[MatchSummary]) -> Result<()> {
    println!("{}", xml_output::matches_to_xml(matches)?);
    Ok(())
}

pub fn print_shots_xml(table: &ShotTable) -> Result<()> {
    println!("{}", xml_output::shots_to_xml(table)?);
    Ok(())
}

pub fn print_summary_xml(summary: &[PlayerSummary]) -> Result<()> {
    println!("{}", xml_output::summary_to_xml(summary)?);
    Ok(())
}

// -- Name lists --

/// Team or player names, one per row. `tags` are the XML root and item names.
pub fn print_names(names: &[String], tags: (&str, &str), format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(build_name_rows(names))),
        OutputFormat::Markdown => {
            let mut table = Table::new(build_name_rows(names));
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Json => print_json(&names),
        OutputFormat::Csv => write_name_rows(names, std::io::stdout())?,
        OutputFormat::Xml => println!("{}", xml_output::names_to_xml(tags.0, tags.1, names)?),
    }
    Ok(())
}

pub fn write_names_csv(names: &[String], path: &Path) -> Result<()> {
    write_name_rows(names, std::fs::File::create(path)?)
}

fn write_name_rows<W: Write>(names: &[String], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in build_name_rows(names) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

/// One object per shot, every column present.
pub fn print_shots_json(table: &ShotTable) {
    print_json(&table.records());
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_xg(xg: Option<f64>) -> String {
    match xg {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understat_lib::normalize::{normalize_shots, parse_match_list};
    use understat_lib::summary::summarize_players;

    fn load_shots_fixture() -> ShotTable {
        let json_str = include_str!("../../understat_api/tests/fixtures/shots_26779.json");
        let payload: serde_json::Value = serde_json::from_str(json_str).unwrap();
        ShotTable::from_records(normalize_shots(&payload).unwrap())
    }

    fn load_matches_fixture() -> Vec<MatchSummary> {
        let json_str = include_str!("../../understat_api/tests/fixtures/dates_EPL_2024.json");
        let payload: serde_json::Value = serde_json::from_str(json_str).unwrap();
        parse_match_list(&payload).unwrap()
    }

    fn csv_string(table: &ShotTable) -> String {
        let mut buf = Vec::new();
        write_table_csv(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // -- format parsing --

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("CSV"), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::parse("xml"), OutputFormat::Xml);
        assert_eq!(OutputFormat::parse("bogus"), OutputFormat::Table);
    }

    #[test]
    fn test_format_xg() {
        assert_eq!(format_xg(Some(0.6102)), "0.61");
        assert_eq!(format_xg(None), "-");
    }

    // -- Row builder tests --

    #[test]
    fn test_build_match_rows_mapping() {
        let rows = build_match_rows(&load_matches_fixture());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, 26779);
        assert_eq!(rows[0].date, "2024-12-26 15:00");
        assert_eq!(rows[0].home, "Tottenham");
        assert_eq!(rows[0].away, "Nottingham Forest");
        assert_eq!(rows[0].score, "0-1");
        assert_eq!(rows[0].xg, "0.30-0.69");
    }

    #[test]
    fn test_build_match_rows_unplayed() {
        let rows = build_match_rows(&load_matches_fixture());
        assert_eq!(rows[2].score, "-");
        assert_eq!(rows[2].xg, "-");
    }

    #[test]
    fn test_build_shot_rows_mapping() {
        let table = load_shots_fixture();
        let rows = build_shot_rows(table.rows());
        assert_eq!(rows.len(), 5);

        let row = &rows[0];
        assert_eq!(row.match_id, 26779);
        assert_eq!(row.minute, 9);
        assert_eq!(row.team, "Tottenham");
        assert_eq!(row.player, "Son Heung-Min");
        assert_eq!(row.result, "MissedShots");
        assert_eq!(row.situation, "OpenPlay");
        assert_eq!(row.shot_type, "LeftFoot");
        assert_eq!(row.xg, "0.06");
        assert_eq!(row.x, "0.884");
        assert_eq!(row.assist, "James Maddison");

        assert_eq!(rows[3].team, "Nottingham Forest");
        assert_eq!(rows[2].assist, "");
    }

    #[test]
    fn test_build_shot_rows_empty() {
        assert!(build_shot_rows(&[]).is_empty());
    }

    #[test]
    fn test_build_summary_rows() {
        let summary = summarize_players(&load_shots_fixture());
        let rows = build_summary_rows(&summary);
        assert_eq!(rows.len(), 5);
        let wood = rows.iter().find(|r| r.player == "Chris Wood").unwrap();
        assert_eq!(wood.team, "Nottingham Forest");
        assert_eq!(wood.goals, 1);
        assert_eq!(wood.xg, "0.61");
    }

    // -- CSV --

    #[test]
    fn test_shots_csv_header_is_column_set() {
        let csv = csv_string(&load_shots_fixture());
        let header = csv.lines().next().unwrap();
        assert!(header.starts_with("id,minute,result,X,Y,xG,player,h_a,"));
        assert!(header.ends_with("player_assisted,lastAction"));
        assert_eq!(csv.lines().count(), 6);
    }

    #[test]
    fn test_shots_csv_null_is_empty_field() {
        let table = load_shots_fixture();
        let csv = csv_string(&table);
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let assisted = headers.iter().position(|h| h == "player_assisted").unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&records[0][assisted], "James Maddison");
        assert_eq!(&records[2][assisted], "");
    }

    #[test]
    fn test_shots_csv_empty_table_has_header_only() {
        let csv = csv_string(&ShotTable::new());
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_write_shots_csv_to_file() {
        let path = std::env::temp_dir().join(format!("understat_shots_{}.csv", std::process::id()));
        write_shots_csv(&load_shots_fixture(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(written.starts_with("id,minute,result"));
        assert!(written.contains("Chris Wood"));
    }

    #[test]
    fn test_summary_csv_headers() {
        let mut buf = Vec::new();
        write_summary_rows(&summarize_players(&load_shots_fixture()), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Team,Player,Shots,Goals,xG,No xG"));
    }

    // -- JSON --

    #[test]
    fn test_shots_json_keeps_upstream_names() {
        let table = load_shots_fixture();
        let value = serde_json::to_value(table.records()).unwrap();
        let first = &value[0];
        assert_eq!(first["h_a"], "h");
        assert_eq!(first["shotType"], "LeftFoot");
        assert_eq!(first["match_id"], 26779);
        assert!(first.get("xG").unwrap().is_number());
        assert!(value[2]["player_assisted"].is_null());
    }

    #[test]
    fn test_shots_json_rows_share_columns() {
        let mut shots = load_shots_fixture().rows().to_vec();
        shots[0]
            .extra
            .insert("zone".to_string(), serde_json::json!("box"));
        let table = ShotTable::from_records(shots);
        let value = serde_json::to_value(table.records()).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows[0]["zone"], "box");
        for row in rows {
            assert_eq!(row.as_object().unwrap().len(), table.columns().len());
        }
        assert!(rows[1]["zone"].is_null());
    }

    // -- Name lists --

    #[test]
    fn test_name_rows_csv() {
        let names = understat_lib::filter::teams(&load_shots_fixture());
        let mut buf = Vec::new();
        write_name_rows(&names, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Name\nNottingham Forest\nTottenham\n");
    }

    #[test]
    fn test_name_rows_empty_csv_is_blank() {
        let mut buf = Vec::new();
        write_name_rows(&[], &mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
