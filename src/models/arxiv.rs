use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parsers::deserializers::{deserialize_categories, deserialize_lenient_timestamp};

/// Paper metadata map keyed by canonical arXiv id.
pub type ArxivIndex = HashMap<String, ArxivPaper>;

/// One arXiv paper as emitted by the metadata collector.
///
/// The collector normally flattens Atom categories to plain strings, but raw
/// feed dumps keep them as `{"@term": "cs.LG"}` objects; both forms load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArxivPaper {
    /// Entry id URL, e.g. `http://arxiv.org/abs/2101.00001v2`.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, rename = "abstract")]
    pub summary: String,
    #[serde(default, deserialize_with = "deserialize_categories")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub published: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub journal_ref: Option<String>,
    #[serde(default)]
    pub primary_category: Option<String>,
}

impl ArxivPaper {
    /// First category, preferring the explicit primary when present.
    pub fn primary_category(&self) -> Option<&str> {
        self.primary_category.as_deref().or_else(|| self.categories.first().map(String::as_str))
    }
}
