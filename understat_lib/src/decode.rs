//! Decoding of JSON payloads embedded as JavaScript string literals.
//!
//! Understat writes `JSON.parse('...')` with every structural character
//! hex-escaped (`\x7B\x22h\x22...`). The escapes must be resolved before the
//! text is valid JSON.

use std::iter::Peekable;
use std::str::CharIndices;

use serde_json::Value;

use crate::error::UnderstatError;

const RAW_SNIPPET_LEN: usize = 200;

/// Unescapes `escaped`, then parses the result as JSON.
pub fn decode(escaped: &str) -> Result<Value, UnderstatError> {
    let unescaped = unescape_js(escaped).map_err(|reason| UnderstatError::PayloadDecode {
        reason,
        raw: snippet(escaped),
    })?;
    serde_json::from_str(&unescaped).map_err(|e| UnderstatError::PayloadDecode {
        reason: format!("invalid JSON: {}", e),
        raw: snippet(escaped),
    })
}

/// Resolves JavaScript string escapes.
///
/// `\xHH` is the code point U+00HH, as in JavaScript. `\uHHHH` handles
/// UTF-16 surrogate pairs. A backslash before a line terminator is a line
/// continuation and produces nothing.
pub fn unescape_js(escaped: &str) -> Result<String, String> {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            return Err(format!("dangling backslash at offset {}", pos));
        };
        match esc {
            'x' => {
                let byte = take_hex(&mut chars, 2, pos)? as u8;
                out.push(char::from(byte));
            }
            'u' => out.push(take_unicode(&mut chars, pos)?),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // Line continuation.
            '\r' => {
                if matches!(chars.peek(), Some((_, '\n'))) {
                    chars.next();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }
    Ok(out)
}

fn take_hex(chars: &mut Peekable<CharIndices<'_>>, digits: usize, pos: usize) -> Result<u32, String> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or_else(|| format!("invalid hex escape at offset {}", pos))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

fn take_unicode(chars: &mut Peekable<CharIndices<'_>>, pos: usize) -> Result<char, String> {
    let unit = take_hex(chars, 4, pos)?;
    if !(0xD800..=0xDBFF).contains(&unit) {
        return char::from_u32(unit).ok_or_else(|| format!("unpaired surrogate at offset {}", pos));
    }
    let mut lookahead = chars.clone();
    let is_pair = matches!(lookahead.next(), Some((_, '\\')))
        && matches!(lookahead.next(), Some((_, 'u')));
    if !is_pair {
        return Err(format!("unpaired surrogate at offset {}", pos));
    }
    chars.next();
    chars.next();
    let low = take_hex(chars, 4, pos)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err(format!("invalid low surrogate at offset {}", pos));
    }
    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(code).ok_or_else(|| format!("invalid code point at offset {}", pos))
}

fn snippet(raw: &str) -> String {
    if raw.chars().count() <= RAW_SNIPPET_LEN {
        raw.to_string()
    } else {
        let head: String = raw.chars().take(RAW_SNIPPET_LEN).collect();
        format!("{}...[truncated]", head)
    }
}
