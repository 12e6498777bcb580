//! Builds [`Festival`] read models from document-store JSON.
//!
//! This is the only place that looks at the shape of incoming date values.
//! Each one is wrapped in a [`RawDateValue`] here and normalized once.

use chrono::FixedOffset;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::dates::{RawDateValue, StoreTimestamp};
use crate::domain::{Festival, FestivalArtist, FestivalDate, Location, University};
use crate::error::{FestivalError, Result};
use crate::observability::metrics;

/// Reads a JSON file holding an array of festival documents, or an object
/// with a `festivals` array.
pub fn load_festivals(path: impl AsRef<Path>, offset: FixedOffset) -> Result<Vec<Festival>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    let festivals = festivals_from_value(&value, offset)?;
    info!(path = %path.display(), count = festivals.len(), "Loaded festivals");
    Ok(festivals)
}

pub fn festivals_from_value(value: &Value, offset: FixedOffset) -> Result<Vec<Festival>> {
    let documents = match value {
        Value::Array(documents) => documents,
        Value::Object(map) => match map.get("festivals") {
            Some(Value::Array(documents)) => documents,
            _ => {
                return Err(FestivalError::ConflictingShape(
                    "expected a `festivals` array in the top-level object".to_string(),
                ))
            }
        },
        other => {
            return Err(FestivalError::ConflictingShape(format!(
                "expected an array of festival documents, found {}",
                json_kind(other)
            )))
        }
    };

    let mut festivals = Vec::with_capacity(documents.len());
    for (index, document) in documents.iter().enumerate() {
        if !document.is_object() {
            warn!(index, kind = json_kind(document), "Skipping non-object festival document");
            metrics::loader::document_skipped();
            continue;
        }
        let id = document_id(document).unwrap_or_default();
        festivals.push(festival_from_document(&id, document, offset));
    }

    metrics::loader::festivals_loaded(festivals.len());
    Ok(festivals)
}

/// Converts one document. Missing or malformed fields degrade to defaults.
pub fn festival_from_document(id: &str, data: &Value, offset: FixedOffset) -> Festival {
    let university = data.get("university").and_then(read_university);

    let mut start_date = read_date(data, "startDate", id, offset);
    let mut end_date = read_date(data, "endDate", id, offset);

    // Legacy documents carry a single `date`
    if start_date.is_none() {
        if let Some(date) = read_date(data, "date", id, offset) {
            start_date = Some(date.clone());
            end_date = Some(date);
        }
    }

    let mut location = data.get("location").map(read_location).unwrap_or_default();
    if location.region.trim().is_empty() {
        if let Some(region) = university.as_ref().and_then(|u| u.location.clone()) {
            location.region = region;
        }
    }

    let artists = data
        .get("artists")
        .and_then(Value::as_array)
        .map(|artists| artists.iter().filter_map(read_artist).collect())
        .unwrap_or_default();

    Festival {
        id: id.to_string(),
        name: read_string(data, "name").unwrap_or_default(),
        university_name: read_string(data, "universityName"),
        school: read_string(data, "school"),
        university,
        start_date,
        end_date,
        location,
        artists,
        description: read_string(data, "description").unwrap_or_default(),
        image_url: read_string(data, "imageUrl").or_else(|| read_string(data, "image")),
    }
}

/// Wraps a JSON date value in the matching raw encoding.
///
/// `None` means the field is absent or empty; an unrecognised shape is
/// returned as `Err` with its JSON text.
pub fn raw_date_value(value: &Value, offset: FixedOffset) -> Option<std::result::Result<RawDateValue, String>> {
    match value {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(Ok(RawDateValue::from_text(text.trim()))),
        Value::Number(number) => Some(
            number
                .as_i64()
                .and_then(|millis| RawDateValue::from_epoch_millis(millis, offset))
                .ok_or_else(|| number.to_string()),
        ),
        Value::Object(map) => {
            let seconds = map.get("seconds").or_else(|| map.get("_seconds")).and_then(Value::as_i64);
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            Some(
                seconds
                    .map(|seconds| RawDateValue::deferred(StoreTimestamp::new(seconds, nanos, offset)))
                    .ok_or_else(|| value.to_string()),
            )
        }
        other => Some(Err(other.to_string())),
    }
}

fn read_date(data: &Value, field: &'static str, id: &str, offset: FixedOffset) -> Option<FestivalDate> {
    let date = match raw_date_value(data.get(field)?, offset)? {
        Ok(raw) => FestivalDate::from_raw(&raw),
        Err(text) => FestivalDate::Unparseable(text),
    };

    if let FestivalDate::Unparseable(raw) = &date {
        warn!(festival_id = id, field, raw = %raw, "Unparseable festival date");
        metrics::loader::date_unparseable(field);
    }
    Some(date)
}

fn read_university(value: &Value) -> Option<University> {
    let map = value.as_object()?;
    let location = match map.get("location") {
        Some(Value::String(region)) => Some(region.clone()),
        Some(Value::Object(location)) => location.get("region").and_then(Value::as_str).map(str::to_string),
        _ => None,
    };
    Some(University {
        id: map.get("id").and_then(Value::as_str).map(str::to_string),
        name: map.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
        location,
    })
}

fn read_location(value: &Value) -> Location {
    Location {
        region: read_string(value, "region").unwrap_or_default(),
        address: read_string(value, "address").unwrap_or_default(),
    }
}

/// Artists arrive either as `{name, time}` objects or as bare names.
fn read_artist(value: &Value) -> Option<FestivalArtist> {
    match value {
        Value::String(name) => Some(FestivalArtist::new(name.clone())),
        Value::Object(_) => Some(FestivalArtist {
            name: read_string(value, "name").unwrap_or_default(),
            time: read_string(value, "time"),
        }),
        _ => None,
    }
}

fn read_string(data: &Value, field: &str) -> Option<String> {
    data.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn document_id(document: &Value) -> Option<String> {
    match document.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
