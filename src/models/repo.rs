use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parsers::deserializers::{deserialize_lenient_count, deserialize_lenient_timestamp};

/// Top-level shape of the repository collection document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarsSnapshot {
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Repository records keyed by `"owner/name"`.
    #[serde(default)]
    pub repositories: BTreeMap<String, Repo>,
}

/// One starred repository: its user-defined list tags, GitHub metadata, and
/// optional arXiv references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    #[serde(default)]
    pub lists: Vec<String>,
    #[serde(default)]
    pub metadata: RepoMetadata,
    #[serde(default)]
    pub arxiv: Option<ArxivRefs>,
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// GitHub metadata block. Every field is optional in practice: snapshots from
/// older scraper versions omit fields, and a partially-failed scrape can leave
/// nulls behind, so everything defaults instead of failing the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoMetadata {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_count")]
    pub stars: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_count")]
    pub forks: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_count")]
    pub open_issues: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub starred_at: Option<DateTime<Utc>>,
}

/// ArXiv references attached to a repository. Two snapshot generations exist:
/// newer ones carry bare ids (`ids`/`primary_id`), older ones full URLs
/// (`urls`/`primary_url`). Both are kept so either vintage loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArxivRefs {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub primary_id: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub primary_url: Option<String>,
    #[serde(default)]
    pub bibtex_citations: Vec<String>,
}

impl ArxivRefs {
    /// The primary reference, preferring the bare id over the URL form.
    pub fn primary(&self) -> Option<&str> {
        self.primary_id.as_deref().or(self.primary_url.as_deref())
    }
}

/// One catalog row: the `"owner/name"` key, the record itself, and the
/// canonical arXiv id pre-extracted at load time so filtering and sorting
/// never re-run the extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoEntry {
    pub key: String,
    pub repo: Repo,
    pub arxiv_id: Option<String>,
}

impl RepoEntry {
    /// Browse URL for the repository, synthesized from the key when the
    /// snapshot predates the `url` metadata field.
    pub fn url(&self) -> String {
        match &self.repo.metadata.url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => format!("https://github.com/{}", self.key),
        }
    }
}
