//! Locating the inline `JSON.parse('...')` payload in an Understat page.

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::decode::decode;
use crate::error::UnderstatError;

const OPEN: &str = "('";
const CLOSE: &str = "')";

/// Where a page keeps its payload: the JavaScript variable it is assigned
/// to, and the script position used when no script names that variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayloadLocator {
    pub variable: Option<&'static str>,
    pub fallback_index: usize,
}

impl PayloadLocator {
    /// League-season listing page: `var datesData = JSON.parse('...')`.
    pub const LISTING: Self = Self {
        variable: Some("datesData"),
        fallback_index: 1,
    };

    /// Match page: `var shotsData = JSON.parse('...')`.
    pub const MATCH_SHOTS: Self = Self {
        variable: Some("shotsData"),
        fallback_index: 1,
    };
}

/// Returns the text of every `<script>` element in document order.
pub fn script_texts(html: &[u8]) -> Result<Vec<String>, UnderstatError> {
    let document = Html::parse_document(&String::from_utf8_lossy(html));
    let selector = Selector::parse("script").map_err(|e| {
        UnderstatError::PayloadNotFound(format!("script selector failed to compile: {}", e))
    })?;
    Ok(document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect())
}

/// Returns the raw escaped string of the `script_index`-th script element:
/// the text strictly between the first `('` and the next `')`.
pub fn extract_script_payload(html: &[u8], script_index: usize) -> Result<String, UnderstatError> {
    let scripts = script_texts(html)?;
    let count = scripts.len();
    let text = scripts.into_iter().nth(script_index).ok_or_else(|| {
        UnderstatError::PayloadNotFound(format!(
            "script index {} requested but page has {} script elements",
            script_index, count
        ))
    })?;
    if text.trim().is_empty() {
        return Err(UnderstatError::PayloadNotFound(format!(
            "script element {} has no text",
            script_index
        )));
    }
    delimited(&text).map(str::to_string)
}

/// Finds and decodes a page payload.
///
/// With a variable name, the first script assigning that variable from a
/// decodable `JSON.parse('...')` wins. Without one, the first script whose
/// delimited text decodes wins. The positional index is the last resort.
pub fn locate_payload(html: &[u8], locator: &PayloadLocator) -> Result<Value, UnderstatError> {
    let scripts = script_texts(html)?;

    let found = match locator.variable {
        Some(variable) => find_assigned(&scripts, variable)?,
        None => scripts
            .iter()
            .find_map(|text| delimited(text).ok().and_then(|raw| decode(raw).ok())),
    };
    if let Some(value) = found {
        return Ok(value);
    }

    tracing::warn!(
        "no script assigns {}, falling back to script index {}",
        locator.variable.unwrap_or("a payload"),
        locator.fallback_index
    );
    let raw = extract_script_payload(html, locator.fallback_index)?;
    decode(&raw)
}

fn find_assigned(scripts: &[String], variable: &str) -> Result<Option<Value>, UnderstatError> {
    let pattern = format!(r"\b{}\s*=\s*JSON\.parse\b", regex::escape(variable));
    let assignment = Regex::new(&pattern).map_err(|e| {
        UnderstatError::PayloadNotFound(format!("regex compile error: {}", e))
    })?;

    for text in scripts {
        for m in assignment.find_iter(text) {
            let Ok(raw) = delimited(&text[m.end()..]) else {
                continue;
            };
            match decode(raw) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => tracing::debug!("{} assignment did not decode: {}", variable, e),
            }
        }
    }
    Ok(None)
}

fn delimited(text: &str) -> Result<&str, UnderstatError> {
    let start = text
        .find(OPEN)
        .map(|i| i + OPEN.len())
        .ok_or_else(|| UnderstatError::MalformedPayload("opening (' delimiter not found".into()))?;
    let len = text[start..]
        .find(CLOSE)
        .ok_or_else(|| UnderstatError::MalformedPayload("closing ') delimiter not found".into()))?;
    Ok(&text[start..start + len])
}
