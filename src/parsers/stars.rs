use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::models::{Repo, StarsSnapshot};
use crate::parsers::deserializers::deserialize_lenient_timestamp;

/// Raw document shape: repository values stay as JSON until decoded one by
/// one, so a single corrupt record cannot reject the whole snapshot.
#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    repositories: BTreeMap<String, Value>,
}

/// Parse the repository collection document.
///
/// Gracefully handles malformed repository entries by logging and skipping
/// them. Returns an error if the document itself is not JSON or if more than
/// 50% of the entries fail to decode.
pub fn parse_stars_document(text: &str) -> Result<StarsSnapshot> {
    let raw: RawSnapshot =
        serde_json::from_str(text).context("Repository document is not valid JSON")?;

    let total = raw.repositories.len();
    let mut repositories = BTreeMap::new();
    let mut skipped = 0;

    for (key, value) in raw.repositories {
        match serde_json::from_value::<Repo>(value) {
            Ok(repo) => {
                repositories.insert(key, repo);
            }
            Err(e) => {
                eprintln!("Warning: Failed to decode repository '{}': {}", key, e);
                skipped += 1;
            }
        }
    }

    if total > 0 {
        let failure_rate = (skipped as f64) / (total as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many decode failures in repository document: {} of {} entries failed ({:.1}%)",
                skipped,
                total,
                failure_rate * 100.0
            );
        }
    }

    if skipped > 0 {
        eprintln!(
            "Parsed repository document: {} entries ({} skipped)",
            repositories.len(),
            skipped
        );
    }

    Ok(StarsSnapshot { last_updated: raw.last_updated, repositories })
}
