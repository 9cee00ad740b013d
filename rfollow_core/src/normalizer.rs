//! Conversion of export files into [`IdentityRecord`]s.
//!
//! Export versions disagree on where the handle lives. Older files carry it
//! inline as `value` next to `href` and `timestamp`; newer `following.json`
//! files drop `value` and put the handle in the entry's `title`. Each item is
//! classified on its own, so a file mixing both layouts still normalizes.

use rfollow_common::{IdentityRecord, Schema, SchemaError};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// One element of the top-level entry array
#[derive(Debug, Deserialize)]
struct ExportEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    string_list_data: Option<Vec<ListItem>>,
}

/// One object nested in `string_list_data`. `value` is absent when the
/// handle lives in the enclosing entry's title.
#[derive(Debug, Deserialize)]
struct ListItem {
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    href: String,
    timestamp: i64,
}

/// Normalize raw file contents
pub fn normalize_slice(data: &[u8], schema: Schema) -> Result<Vec<IdentityRecord>, SchemaError> {
    let raw: JsonValue =
        serde_json::from_slice(data).map_err(|e| SchemaError::Json(e.to_string()))?;
    normalize_value(raw, schema)
}

/// Normalize an already parsed JSON document
pub fn normalize_value(raw: JsonValue, schema: Schema) -> Result<Vec<IdentityRecord>, SchemaError> {
    let entries = match (schema, raw) {
        (Schema::Flat, JsonValue::Array(entries)) => entries,
        (Schema::Flat, other) => {
            return Err(SchemaError::UnexpectedShape {
                expected: "array",
                found: json_kind(&other),
            })
        }
        (Schema::Keyed(key), JsonValue::Object(mut map)) => match map.remove(key) {
            Some(JsonValue::Array(entries)) => entries,
            Some(other) => {
                return Err(SchemaError::UnexpectedShape {
                    expected: "array",
                    found: json_kind(&other),
                })
            }
            None => return Err(SchemaError::MissingKey(key)),
        },
        (Schema::Keyed(_), other) => {
            return Err(SchemaError::UnexpectedShape {
                expected: "object",
                found: json_kind(&other),
            })
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, raw_entry) in entries.into_iter().enumerate() {
        let entry: ExportEntry = serde_json::from_value(raw_entry).map_err(|e| {
            SchemaError::InvalidEntry {
                index,
                reason: e.to_string(),
            }
        })?;
        collect_entry(index, entry, &mut records)?;
    }

    Ok(records)
}

fn collect_entry(
    index: usize,
    entry: ExportEntry,
    records: &mut Vec<IdentityRecord>,
) -> Result<(), SchemaError> {
    let items = match entry.string_list_data {
        Some(items) if !items.is_empty() => items,
        _ => return Ok(()),
    };

    for item in items {
        let handle = match item.value {
            Some(value) => value,
            None => entry
                .title
                .clone()
                .filter(|title| !title.is_empty())
                .ok_or_else(|| SchemaError::InvalidEntry {
                    index,
                    reason: "item has no handle and the entry has no title".to_string(),
                })?,
        };
        records.push(IdentityRecord::new(handle, item.href, item.timestamp));
    }

    Ok(())
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
