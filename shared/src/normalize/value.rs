//! Tolerant lookups over loosely-shaped JSON
//!
//! Every helper here is total: missing keys, wrong types and garbage strings
//! fall back to a default instead of failing.

use crate::models::RecordId;
use serde_json::Value;

/// How deep [`pick_array`] follows nested container objects
const MAX_CONTAINER_DEPTH: usize = 3;

const CURRENCY_SYMBOLS: &[char] = &['₹', '$', '€', '£', '¥'];
/// Longest first: `Rs.` must win over `Rs`
const CURRENCY_WORDS: &[&str] = &["Rs.", "Rs", "INR"];

/// Coerce any JSON value into a finite number
///
/// Numbers pass through, strings go through [`parse_number`], everything
/// else is 0. Non-finite results are 0.
pub fn to_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_number(s),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Parse a money/quantity string such as `"₹1,200"`, `"Rs. 99.50"` or
/// `"1,200/-"`
///
/// Thousands separators, whitespace and currency symbols are dropped, then
/// the first numeric run is parsed. A sign ahead of a currency marker
/// (`"-₹500"`, `"-Rs. 500"`) stays with the number. Strings without digits
/// yield 0.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect();

    let negated = cleaned.strip_prefix('-').and_then(|rest| {
        CURRENCY_WORDS
            .iter()
            .find_map(|word| rest.strip_prefix(word))
            .filter(|after| after.starts_with(|c: char| c.is_ascii_digit() || c == '.'))
    });
    match negated {
        Some(after) => -scan_number(after),
        None => scan_number(&cleaned),
    }
}

fn scan_number(cleaned: &str) -> f64 {
    let bytes = cleaned.as_bytes();

    let starts_number = |i: usize| -> bool {
        let digit_at = |j: usize| bytes.get(j).is_some_and(u8::is_ascii_digit);
        match bytes[i] {
            b'0'..=b'9' => true,
            // "Rs.500": a dot glued to a word is an abbreviation, not a decimal point
            b'.' => digit_at(i + 1) && (i == 0 || !bytes[i - 1].is_ascii_alphabetic()),
            b'-' => digit_at(i + 1) || (bytes.get(i + 1) == Some(&b'.') && digit_at(i + 2)),
            _ => false,
        }
    };

    let Some(start) = (0..bytes.len()).find(|&i| starts_number(i)) else {
        return 0.0;
    };

    let mut end = start;
    if bytes[end] == b'-' {
        end += 1;
    }
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    cleaned[start..end]
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Resolve a dotted path such as `customer.name` or `data.token_data.access_token`
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
}

/// First path that resolves to a non-null value (empty strings count as absent)
pub fn first_present<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().find_map(|path| {
        lookup(value, path).filter(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
    })
}

/// Render a scalar as a trimmed, non-empty string
pub fn string_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First path holding a usable string (numbers are stringified)
pub fn first_string(value: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| lookup(value, path).and_then(string_of))
}

/// First string, or the given default
pub fn string_or(value: &Value, paths: &[&str], default: &str) -> String {
    first_string(value, paths).unwrap_or_else(|| default.to_string())
}

/// Coerced number from the first present path, if any path is present
pub fn optional_number(value: &Value, paths: &[&str]) -> Option<f64> {
    first_present(value, paths).map(to_number)
}

/// Coerced number from the first present path, or the default
pub fn number_or(value: &Value, paths: &[&str], default: f64) -> f64 {
    optional_number(value, paths).unwrap_or(default)
}

/// Loose boolean: `true`, `1`, `"yes"`, `"on"` ...
pub fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Server id from the first usable path, else a synthetic one
pub fn record_id(value: &Value, paths: &[&str]) -> RecordId {
    match first_string(value, paths) {
        Some(id) => RecordId::Server(id),
        None => {
            tracing::debug!("payload without id, minting synthetic id");
            RecordId::synthetic()
        }
    }
}

/// Locate the array of records inside an arbitrary envelope
///
/// A bare array is returned as is. For objects, each container name is tried
/// in order; a container holding an object (a paginator such as
/// `{data: {data: [...], total: 3}}`) is searched the same way. Failing
/// that, the first array-valued property wins.
pub fn pick_array<'a>(value: &'a Value, containers: &[&str]) -> Option<&'a Vec<Value>> {
    find_array(value, containers, 0)
}

fn find_array<'a>(value: &'a Value, containers: &[&str], depth: usize) -> Option<&'a Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => {
            for key in containers {
                match map.get(*key) {
                    Some(Value::Array(items)) => return Some(items),
                    Some(nested @ Value::Object(_)) if depth < MAX_CONTAINER_DEPTH => {
                        if let Some(items) = find_array(nested, containers, depth + 1) {
                            return Some(items);
                        }
                    }
                    _ => {}
                }
            }
            map.values().find_map(Value::as_array)
        }
        _ => None,
    }
}

/// Locate a single record inside an envelope such as
/// `{success: true, data: {product: {...}}}`
///
/// Descends through the given wrapper keys until reaching an object that
/// carries an `id`, or no wrapper matches. A wrapper holding an array yields
/// its first object.
pub fn pick_record<'a>(value: &'a Value, wrappers: &[&str]) -> &'a Value {
    let mut current = value;
    for _ in 0..MAX_CONTAINER_DEPTH {
        if current.get("id").is_some() {
            break;
        }
        let next = wrappers.iter().find_map(|key| match current.get(*key) {
            Some(obj @ Value::Object(_)) => Some(obj),
            Some(Value::Array(items)) => items.iter().find(|v| v.is_object()),
            _ => None,
        });
        match next {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}
