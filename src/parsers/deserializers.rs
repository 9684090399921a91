use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Lenient timestamp deserializer accepting RFC3339 strings or epoch
/// milliseconds. Snapshots are produced by scrapers that have emitted both
/// forms over time, and a malformed value downgrades to `None` instead of
/// rejecting the whole record.
pub fn deserialize_lenient_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_timestamp_value(&value))
}

fn parse_timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            // Unix timestamp in milliseconds
            let ms = n.as_i64()?;
            DateTime::from_timestamp_millis(ms)
        }
        Value::String(s) => s.parse::<DateTime<Utc>>().ok(),
        _ => None,
    }
}

/// Lenient count deserializer. GitHub counts arrive as integers, but old
/// snapshots occasionally hold floats or numeric strings; anything else
/// defaults to zero.
pub fn deserialize_lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    Ok(count)
}

/// Category-list deserializer accepting both the collector's flattened form
/// (`["cs.LG"]`) and the raw Atom form (`[{"@term": "cs.LG"}]`). Elements
/// that are neither are dropped.
pub fn deserialize_categories<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    let categories = items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map.get("@term").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect();
    Ok(categories)
}
