//! Field deserializers for loosely typed server records
//!
//! The portal API does not hold to one shape: ids arrive as strings or
//! numbers, timestamps carry a time part the pages never show, and fields
//! may be null or of the wrong type. These helpers map whatever arrives to
//! the value a page falls back to, so one odd field never fails a record.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn as_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// String or number as text, anything else as ""
pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(as_text(Value::deserialize(d)?).unwrap_or_default())
}

/// Task titles fall back to "Untitled"
pub fn title<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(as_text(Value::deserialize(d)?).unwrap_or_else(|| "Untitled".to_string()))
}

/// Empty or missing text as `None`
pub fn non_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(as_text(Value::deserialize(d)?).filter(|s| !s.is_empty()))
}

/// Date part of an ISO timestamp (`2024-01-15T10:30:00Z` -> `2024-01-15`)
pub fn date_part<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(as_text(Value::deserialize(d)?)
        .and_then(|raw| raw.split('T').next().map(str::to_string))
        .unwrap_or_default())
}

/// String elements of an array; non-arrays read as empty
pub fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Parsed through `FromStr`; unknown values read as `None`
pub fn parsed<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(as_text(Value::deserialize(d)?).and_then(|s| s.parse().ok()))
}

/// Parsed through `FromStr`; unknown values read as the default
pub fn parsed_or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    Ok(parsed(d)?.unwrap_or_default())
}

/// Non-negative JSON number truncated to an index, else 0
pub fn index<'de, D: Deserializer<'de>>(d: D) -> Result<usize, D::Error> {
    let value = Value::deserialize(d)?;
    let index = value
        .as_u64()
        .or_else(|| value.as_f64().map(|f| f.max(0.0) as u64))
        .unwrap_or(0);
    Ok(index as usize)
}
