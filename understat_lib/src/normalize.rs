//! Turning decoded payloads into typed match summaries and shot records.

use serde::Deserialize;
use serde_json::{Map, Value};

use understat_api::types::{MatchId, MatchSummary, ShotRecord, Side};

use crate::error::UnderstatError;

/// Parses every entry of a listing payload, played or not.
pub fn parse_match_list(payload: &Value) -> Result<Vec<MatchSummary>, UnderstatError> {
    listing_entries(payload)?
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            result_flag(index, entry)?;
            parse_summary(index, entry)
        })
        .collect()
}

/// Keeps only listing entries that have a completed result.
///
/// An entry without an `isResult` field is a payload-shape violation, not an
/// unplayed match.
pub fn normalize_matches(payload: &Value) -> Result<Vec<MatchSummary>, UnderstatError> {
    let mut completed = Vec::new();
    for (index, entry) in listing_entries(payload)?.iter().enumerate() {
        if result_flag(index, entry)? {
            completed.push(parse_summary(index, entry)?);
        }
    }
    Ok(completed)
}

/// Match identifiers in listing order. Duplicates are kept.
pub fn extract_ids(summaries: &[MatchSummary]) -> Vec<MatchId> {
    summaries.iter().map(|m| m.id).collect()
}

/// Flattens a match payload into home shots followed by away shots.
///
/// Both the `h` and `a` keys must be present; a side without shots is an
/// empty array. Each group keeps its own order.
pub fn normalize_shots(payload: &Value) -> Result<Vec<ShotRecord>, UnderstatError> {
    let groups = payload.as_object().ok_or_else(|| {
        UnderstatError::Schema(format!(
            "match payload is {}, expected an object",
            kind(payload)
        ))
    })?;
    let home = shot_group(groups, Side::Home)?;
    let away = shot_group(groups, Side::Away)?;

    let mut shots = Vec::with_capacity(home.len() + away.len());
    for (side, group) in [(Side::Home, home), (Side::Away, away)] {
        for (index, raw) in group.iter().enumerate() {
            shots.push(parse_shot(side, index, raw)?);
        }
    }
    Ok(shots)
}

fn listing_entries(payload: &Value) -> Result<&Vec<Value>, UnderstatError> {
    payload.as_array().ok_or_else(|| {
        UnderstatError::Schema(format!(
            "listing payload is {}, expected an array",
            kind(payload)
        ))
    })
}

fn result_flag(index: usize, entry: &Value) -> Result<bool, UnderstatError> {
    let obj = entry.as_object().ok_or_else(|| {
        UnderstatError::Schema(format!(
            "listing entry {} is {}, expected an object",
            index,
            kind(entry)
        ))
    })?;
    match obj.get("isResult") {
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(UnderstatError::Schema(format!(
            "listing entry {} has isResult of type {}",
            index,
            kind(other)
        ))),
        None => Err(UnderstatError::Schema(format!(
            "listing entry {} has no isResult field",
            index
        ))),
    }
}

fn parse_summary(index: usize, entry: &Value) -> Result<MatchSummary, UnderstatError> {
    MatchSummary::deserialize(entry)
        .map_err(|e| UnderstatError::Schema(format!("listing entry {}: {}", index, e)))
}

fn shot_group(groups: &Map<String, Value>, side: Side) -> Result<&Vec<Value>, UnderstatError> {
    match groups.get(side.key()) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(UnderstatError::Schema(format!(
            "shot group '{}' is {}, expected an array",
            side,
            kind(other)
        ))),
        None => Err(UnderstatError::Schema(format!(
            "match payload has no '{}' shot group",
            side
        ))),
    }
}

fn parse_shot(side: Side, index: usize, raw: &Value) -> Result<ShotRecord, UnderstatError> {
    let mut obj = raw.as_object().cloned().ok_or_else(|| {
        UnderstatError::Schema(format!(
            "shot {} in group '{}' is {}, expected an object",
            index,
            side,
            kind(raw)
        ))
    })?;

    // The group a shot came from decides its side.
    match obj.get("h_a") {
        Some(Value::String(tag)) if tag == side.key() => {}
        Some(Value::Null) | None => {
            obj.insert("h_a".into(), side.key().into());
        }
        Some(other) => {
            tracing::warn!(
                "shot {} in group '{}' is tagged h_a={}, using the group",
                index,
                side,
                other
            );
            obj.insert("h_a".into(), side.key().into());
        }
    }

    ShotRecord::deserialize(Value::Object(obj)).map_err(|e| {
        UnderstatError::Schema(format!("shot {} in group '{}': {}", index, side, e))
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
