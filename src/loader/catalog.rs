use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::models::{ArxivIndex, ArxivPaper, RepoEntry, StarsSnapshot};
use crate::parsers::{parse_arxiv_document, parse_stars_document};
use crate::utils::extract_arxiv_id;

use super::source::DataSource;

/// Repository collection document name.
pub const STARS_DOCUMENT: &str = "github_stars.json";
/// ArXiv metadata document name.
pub const ARXIV_DOCUMENT: &str = "arxiv_metadata.json";

/// Everything the application works with after loading: catalog rows in
/// snapshot key order, the paper index, and the vocabularies derived from
/// them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub entries: Vec<RepoEntry>,
    pub papers: ArxivIndex,
    /// Sorted union of every list tag in the collection.
    pub lists: Vec<String>,
    /// Sorted union of every paper category.
    pub categories: Vec<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Catalog {
    /// Assemble a catalog from parsed documents. Entries keep the snapshot's
    /// key order and get their canonical arXiv id extracted once here.
    pub fn from_parts(snapshot: StarsSnapshot, papers: ArxivIndex) -> Catalog {
        let mut lists = BTreeSet::new();
        let mut entries = Vec::with_capacity(snapshot.repositories.len());

        for (key, repo) in snapshot.repositories {
            for list in &repo.lists {
                lists.insert(list.clone());
            }
            let arxiv_id = repo
                .arxiv
                .as_ref()
                .and_then(|refs| refs.primary())
                .and_then(extract_arxiv_id);
            entries.push(RepoEntry { key, repo, arxiv_id });
        }

        let categories: BTreeSet<String> = papers
            .values()
            .flat_map(|paper| paper.categories.iter().cloned())
            .collect();

        Catalog {
            entries,
            papers,
            lists: lists.into_iter().collect(),
            categories: categories.into_iter().collect(),
            last_updated: snapshot.last_updated,
        }
    }

    /// The paper linked to an entry, when its id resolves in the index.
    pub fn paper_for(&self, entry: &RepoEntry) -> Option<&ArxivPaper> {
        crate::filters::linked_paper(entry, &self.papers)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load both snapshot documents from a source and assemble the catalog.
///
/// The two fetches run concurrently. A missing or unreadable repository
/// document fails the load; a missing arXiv document only costs the paper
/// annotations, so it degrades to an empty index with a warning.
pub fn load_catalog(source: &DataSource) -> Result<Catalog> {
    let (stars_text, arxiv_text) =
        rayon::join(|| source.fetch(STARS_DOCUMENT), || source.fetch(ARXIV_DOCUMENT));

    let stars_text = stars_text
        .with_context(|| format!("Failed to load {} from {}", STARS_DOCUMENT, source.describe()))?;
    let snapshot = parse_stars_document(&stars_text)?;

    let papers = match arxiv_text.and_then(|text| parse_arxiv_document(&text)) {
        Ok(papers) => papers,
        Err(err) => {
            eprintln!("Warning: arXiv metadata unavailable ({err:#}), continuing without it");
            ArxivIndex::new()
        }
    };

    Ok(Catalog::from_parts(snapshot, papers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_stars(dir: &TempDir, body: &str) {
        fs::write(dir.path().join(STARS_DOCUMENT), body).unwrap();
    }

    fn write_arxiv(dir: &TempDir, body: &str) {
        fs::write(dir.path().join(ARXIV_DOCUMENT), body).unwrap();
    }

    const STARS_BODY: &str = r#"{
        "last_updated": "2024-03-01T12:00:00Z",
        "repositories": {
            "zeta/paper-repo": {
                "lists": ["ml", "papers"],
                "metadata": {"stars": 100},
                "arxiv": {"primary_url": "https://arxiv.org/abs/2101.00001"}
            },
            "alpha/tool": {
                "lists": ["tools"],
                "metadata": {"stars": 5}
            }
        }
    }"#;

    const ARXIV_BODY: &str = r#"{
        "2101.00001": {
            "title": "A Paper",
            "categories": ["cs.LG", "stat.ML"]
        }
    }"#;

    #[test]
    fn test_from_parts_keeps_key_order_and_extracts_ids() {
        let snapshot = parse_stars_document(STARS_BODY).unwrap();
        let papers = parse_arxiv_document(ARXIV_BODY).unwrap();
        let catalog = Catalog::from_parts(snapshot, papers);

        let keys: Vec<_> = catalog.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["alpha/tool", "zeta/paper-repo"]);

        assert_eq!(catalog.entries[0].arxiv_id, None);
        assert_eq!(catalog.entries[1].arxiv_id.as_deref(), Some("2101.00001"));
    }

    #[test]
    fn test_from_parts_collects_sorted_vocabularies() {
        let snapshot = parse_stars_document(STARS_BODY).unwrap();
        let papers = parse_arxiv_document(ARXIV_BODY).unwrap();
        let catalog = Catalog::from_parts(snapshot, papers);

        assert_eq!(catalog.lists, vec!["ml", "papers", "tools"]);
        assert_eq!(catalog.categories, vec!["cs.LG", "stat.ML"]);
    }

    #[test]
    fn test_paper_for_resolves_linked_entry() {
        let snapshot = parse_stars_document(STARS_BODY).unwrap();
        let papers = parse_arxiv_document(ARXIV_BODY).unwrap();
        let catalog = Catalog::from_parts(snapshot, papers);

        let linked = &catalog.entries[1];
        assert_eq!(catalog.paper_for(linked).map(|p| p.title.as_str()), Some("A Paper"));
        assert!(catalog.paper_for(&catalog.entries[0]).is_none());
    }

    #[test]
    fn test_load_catalog_from_directory() {
        let dir = TempDir::new().unwrap();
        write_stars(&dir, STARS_BODY);
        write_arxiv(&dir, ARXIV_BODY);

        let source = DataSource::Dir(dir.path().to_path_buf());
        let catalog = load_catalog(&source).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.papers.len(), 1);
        assert!(catalog.last_updated.is_some());
    }

    #[test]
    fn test_load_catalog_without_arxiv_document_degrades() {
        let dir = TempDir::new().unwrap();
        write_stars(&dir, STARS_BODY);

        let source = DataSource::Dir(dir.path().to_path_buf());
        let catalog = load_catalog(&source).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.papers.is_empty());
        assert!(catalog.categories.is_empty());
    }

    #[test]
    fn test_load_catalog_without_stars_document_fails() {
        let dir = TempDir::new().unwrap();
        write_arxiv(&dir, ARXIV_BODY);

        let source = DataSource::Dir(dir.path().to_path_buf());
        let result = load_catalog(&source);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains(STARS_DOCUMENT));
    }
}
