use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use serde_json::Value;
use std::io::Cursor;

use understat_lib::types::MatchSummary;
use understat_lib::{PlayerSummary, ShotTable};

/// Child element name for items of an array field.
fn singular(field: &str) -> &str {
    match field {
        "matches" => "match",
        "shots" => "shot",
        "players" => "player",
        _ => "item",
    }
}

/// Recursively write a serde_json::Value as XML elements. Nulls become empty elements.
fn write_value<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &Value,
) -> Result<(), quick_xml::Error> {
    let text = match value {
        Value::Null => {
            writer.write_event(Event::Empty(BytesStart::new(tag)))?;
            return Ok(());
        }
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            let child_tag = singular(tag);
            for item in arr {
                write_value(writer, child_tag, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
            return Ok(());
        }
        Value::Object(map) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for (key, val) in map {
                write_value(writer, key, val)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
            return Ok(());
        }
    };
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(&text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Serialize a slice of Serialize items into an XML string.
fn items_to_xml<T: Serialize>(root_tag: &str, item_tag: &str, items: &[T]) -> anyhow::Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    if items.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(root_tag)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(root_tag)))?;
        for item in items {
            let val = serde_json::to_value(item)?;
            write_value(&mut writer, item_tag, &val)?;
        }
        writer.write_event(Event::End(BytesEnd::new(root_tag)))?;
    }

    let buf = writer.into_inner().into_inner();
    Ok(String::from_utf8(buf)?)
}

pub fn matches_to_xml(matches: &[MatchSummary]) -> anyhow::Result<String> {
    items_to_xml("matches", "match", matches)
}

/// Every shot element carries every table column.
pub fn shots_to_xml(table: &ShotTable) -> anyhow::Result<String> {
    items_to_xml("shots", "shot", &table.records())
}

pub fn names_to_xml(root_tag: &str, item_tag: &str, names: &[String]) -> anyhow::Result<String> {
    items_to_xml(root_tag, item_tag, names)
}

pub fn summary_to_xml(summary: &[PlayerSummary]) -> anyhow::Result<String> {
    items_to_xml("players", "player", summary)
}
