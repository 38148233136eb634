//! Deserializers for Understat's stringly-typed fields.
//!
//! The site emits most numbers as strings (`"minute":"10"`, `"xG":"0.05"`)
//! but hand-built payloads and older seasons use plain JSON numbers, so
//! every numeric field accepts both. Empty strings count as null.

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serializer};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Int(i64),
    Float(f64),
    Str(String),
}

fn parse_int(raw: &str) -> Result<i64, String> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(v);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 => Ok(v as i64),
        _ => Err(format!("invalid integer '{}'", raw)),
    }
}

fn parse_float(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid number '{}'", raw))
}

fn to_int(value: NumOrStr) -> Result<Option<i64>, String> {
    match value {
        NumOrStr::Int(v) => Ok(Some(v)),
        NumOrStr::Float(v) if v.fract() == 0.0 => Ok(Some(v as i64)),
        NumOrStr::Float(v) => Err(format!("expected integer, got {}", v)),
        NumOrStr::Str(s) if s.trim().is_empty() => Ok(None),
        NumOrStr::Str(s) => parse_int(&s).map(Some),
    }
}

fn to_float(value: NumOrStr) -> Result<Option<f64>, String> {
    match value {
        NumOrStr::Int(v) => Ok(Some(v as f64)),
        NumOrStr::Float(v) => Ok(Some(v)),
        NumOrStr::Str(s) if s.trim().is_empty() => Ok(None),
        NumOrStr::Str(s) => parse_float(&s).map(Some),
    }
}

/// Required integer, given as a number or a numeric string.
pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    to_int(NumOrStr::deserialize(deserializer)?)
        .map_err(de::Error::custom)?
        .ok_or_else(|| de::Error::custom("expected integer, got empty string"))
}

/// Optional integer; null and `""` are `None`.
pub fn opt_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Option::<NumOrStr>::deserialize(deserializer)? {
        Some(value) => to_int(value).map_err(de::Error::custom),
        None => Ok(None),
    }
}

/// Required float, given as a number or a numeric string.
pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    to_float(NumOrStr::deserialize(deserializer)?)
        .map_err(de::Error::custom)?
        .ok_or_else(|| de::Error::custom("expected number, got empty string"))
}

/// Optional float; null and `""` are `None`.
pub fn opt_float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<NumOrStr>::deserialize(deserializer)? {
        Some(value) => to_float(value).map_err(de::Error::custom),
        None => Ok(None),
    }
}

fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|e| format!("invalid datetime '{}': {}", raw, e))
}

/// Timestamps in Understat's `YYYY-MM-DD HH:MM:SS` form, written back the same way.
pub mod datetime {
    use super::*;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_datetime(&raw).map_err(de::Error::custom)
    }
}

pub mod opt_datetime {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.format(DATETIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_datetime(&raw).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}
