use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::models::{ArxivIndex, ArxivPaper};

/// Parse the arXiv metadata document: a JSON object keyed by arXiv id.
///
/// Individual malformed paper entries are logged and skipped; the document is
/// rejected only when it is not a JSON object or when more than 50% of its
/// entries fail to decode.
pub fn parse_arxiv_document(text: &str) -> Result<ArxivIndex> {
    let raw: HashMap<String, Value> =
        serde_json::from_str(text).context("ArXiv metadata document is not valid JSON")?;

    let total = raw.len();
    let mut papers = HashMap::with_capacity(total);
    let mut skipped = 0;

    for (id, value) in raw {
        match serde_json::from_value::<ArxivPaper>(value) {
            Ok(paper) => {
                papers.insert(id, paper);
            }
            Err(e) => {
                eprintln!("Warning: Failed to decode arXiv entry '{}': {}", id, e);
                skipped += 1;
            }
        }
    }

    if total > 0 {
        let failure_rate = (skipped as f64) / (total as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many decode failures in arXiv metadata document: {} of {} entries failed ({:.1}%)",
                skipped,
                total,
                failure_rate * 100.0
            );
        }
    }

    if skipped > 0 {
        eprintln!("Parsed arXiv metadata: {} papers ({} skipped)", papers.len(), skipped);
    }

    Ok(papers)
}
