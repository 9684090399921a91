//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Builder for creating test snapshot data directories
pub struct SnapshotDirBuilder {
    temp_dir: TempDir,
}

impl SnapshotDirBuilder {
    /// Create a new builder with an empty data directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the data directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a raw github_stars.json document with the given content
    pub fn with_stars(self, content: &str) -> Self {
        fs::write(self.temp_dir.path().join("github_stars.json"), content)
            .expect("Failed to write github_stars.json");
        self
    }

    /// Assemble github_stars.json from repository builders
    pub fn with_repos(self, repos: &[RepoRecordBuilder]) -> Self {
        let body =
            repos.iter().map(|r| format!(r#""{}":{}"#, r.key(), r.to_json())).collect::<Vec<_>>();

        let document = format!(
            r#"{{"last_updated":"2024-03-01T12:00:00Z","repositories":{{{}}}}}"#,
            body.join(",")
        );
        self.with_stars(&document)
    }

    /// Write a raw arxiv_metadata.json document with the given content
    pub fn with_arxiv(self, content: &str) -> Self {
        fs::write(self.temp_dir.path().join("arxiv_metadata.json"), content)
            .expect("Failed to write arxiv_metadata.json");
        self
    }

    /// Assemble arxiv_metadata.json from paper builders
    pub fn with_papers(self, papers: &[PaperRecordBuilder]) -> Self {
        let body = papers
            .iter()
            .map(|p| format!(r#""{}":{}"#, p.key(), p.to_json()))
            .collect::<Vec<_>>();

        self.with_arxiv(&format!("{{{}}}", body.join(",")))
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for SnapshotDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one repository record in github_stars.json
pub struct RepoRecordBuilder {
    key: String,
    stars: i64,
    forks: i64,
    language: Option<String>,
    description: Option<String>,
    lists: Vec<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    pushed_at: Option<String>,
    starred_at: Option<String>,
    arxiv_id: Option<String>,
    arxiv_url: Option<String>,
}

impl RepoRecordBuilder {
    /// Create a new record with default values for the given "owner/name" key
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            stars: 0,
            forks: 0,
            language: None,
            description: None,
            lists: Vec::new(),
            created_at: None,
            updated_at: None,
            pushed_at: None,
            starred_at: Some("2024-01-15T10:00:00Z".to_string()),
            arxiv_id: None,
            arxiv_url: None,
        }
    }

    /// Get the "owner/name" key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Set the star count
    pub fn stars(mut self, stars: i64) -> Self {
        self.stars = stars;
        self
    }

    /// Set the fork count
    pub fn forks(mut self, forks: i64) -> Self {
        self.forks = forks;
        self
    }

    /// Set the primary language
    pub fn language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    /// Set the description
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Add a list tag
    pub fn list(mut self, list: &str) -> Self {
        self.lists.push(list.to_string());
        self
    }

    /// Set the creation timestamp (RFC3339 string)
    pub fn created_at(mut self, timestamp: &str) -> Self {
        self.created_at = Some(timestamp.to_string());
        self
    }

    /// Set the metadata-update timestamp (RFC3339 string)
    pub fn updated_at(mut self, timestamp: &str) -> Self {
        self.updated_at = Some(timestamp.to_string());
        self
    }

    /// Set the last-push timestamp (RFC3339 string)
    pub fn pushed_at(mut self, timestamp: &str) -> Self {
        self.pushed_at = Some(timestamp.to_string());
        self
    }

    /// Set the starred timestamp (RFC3339 string)
    pub fn starred_at(mut self, timestamp: &str) -> Self {
        self.starred_at = Some(timestamp.to_string());
        self
    }

    /// Drop the default starred timestamp
    pub fn without_starred_at(mut self) -> Self {
        self.starred_at = None;
        self
    }

    /// Attach an arXiv reference in the bare-id form
    pub fn arxiv(mut self, id: &str) -> Self {
        self.arxiv_id = Some(id.to_string());
        self
    }

    /// Attach an arXiv reference in the older URL form
    pub fn arxiv_url(mut self, url: &str) -> Self {
        self.arxiv_url = Some(url.to_string());
        self
    }

    /// Convert to the JSON value stored under the key
    pub fn to_json(&self) -> String {
        let name = self.key.split('/').nth(1).unwrap_or(&self.key);
        let mut metadata = format!(
            r#""name":"{}","full_name":"{}","stars":{},"forks":{}"#,
            name, self.key, self.stars, self.forks
        );

        if let Some(language) = &self.language {
            metadata.push_str(&format!(r#","language":"{}""#, language));
        }
        if let Some(description) = &self.description {
            metadata.push_str(&format!(r#","description":"{}""#, description));
        }
        for (field, value) in [
            ("created_at", &self.created_at),
            ("updated_at", &self.updated_at),
            ("pushed_at", &self.pushed_at),
            ("starred_at", &self.starred_at),
        ] {
            if let Some(timestamp) = value {
                metadata.push_str(&format!(r#","{}":"{}""#, field, timestamp));
            }
        }

        let lists =
            self.lists.iter().map(|l| format!(r#""{}""#, l)).collect::<Vec<_>>().join(",");

        let arxiv_field = if let Some(id) = &self.arxiv_id {
            format!(r#","arxiv":{{"ids":["{}"],"primary_id":"{}"}}"#, id, id)
        } else if let Some(url) = &self.arxiv_url {
            format!(r#","arxiv":{{"urls":["{}"],"primary_url":"{}"}}"#, url, url)
        } else {
            String::new()
        };

        format!(r#"{{"lists":[{}],"metadata":{{{}}}{}}}"#, lists, metadata, arxiv_field)
    }
}

impl Default for RepoRecordBuilder {
    fn default() -> Self {
        Self::new("test/repo")
    }
}

/// Builder for one paper record in arxiv_metadata.json
pub struct PaperRecordBuilder {
    key: String,
    title: String,
    authors: Vec<String>,
    summary: String,
    categories: Vec<String>,
    published: Option<String>,
    updated: Option<String>,
}

impl PaperRecordBuilder {
    /// Create a new record keyed by the given canonical arXiv id
    pub fn new(id: &str) -> Self {
        Self {
            key: id.to_string(),
            title: "Test Paper".to_string(),
            authors: vec!["Ada Author".to_string()],
            summary: "A test abstract.".to_string(),
            categories: vec!["cs.LG".to_string()],
            published: Some("2021-01-04T00:00:00Z".to_string()),
            updated: None,
        }
    }

    /// Get the canonical arXiv id used as the map key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Set the title
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Replace the author list
    pub fn authors(mut self, authors: &[&str]) -> Self {
        self.authors = authors.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Set the abstract text
    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    /// Replace the category list
    pub fn categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Set the publication timestamp (RFC3339 string)
    pub fn published(mut self, timestamp: &str) -> Self {
        self.published = Some(timestamp.to_string());
        self
    }

    /// Set the revision timestamp (RFC3339 string)
    pub fn updated(mut self, timestamp: &str) -> Self {
        self.updated = Some(timestamp.to_string());
        self
    }

    /// Convert to the JSON value stored under the key
    pub fn to_json(&self) -> String {
        let authors =
            self.authors.iter().map(|a| format!(r#""{}""#, a)).collect::<Vec<_>>().join(",");
        let categories =
            self.categories.iter().map(|c| format!(r#""{}""#, c)).collect::<Vec<_>>().join(",");

        let mut fields = format!(
            r#""id":"http://arxiv.org/abs/{}v1","title":"{}","authors":[{}],"abstract":"{}","categories":[{}]"#,
            self.key, self.title, authors, self.summary, categories
        );

        if let Some(timestamp) = &self.published {
            fields.push_str(&format!(r#","published":"{}""#, timestamp));
        }
        if let Some(timestamp) = &self.updated {
            fields.push_str(&format!(r#","updated":"{}""#, timestamp));
        }

        format!("{{{}}}", fields)
    }
}

/// Helper to create a data directory holding only an empty repository document
pub fn minimal_snapshot_dir() -> TempDir {
    SnapshotDirBuilder::new().with_stars(r#"{"repositories":{}}"#).build()
}

/// Helper to create a realistic data directory with linked papers
pub fn realistic_snapshot_dir() -> TempDir {
    SnapshotDirBuilder::new()
        .with_repos(&[
            RepoRecordBuilder::new("huggingface/transformers")
                .stars(120000)
                .language("Python")
                .description("State-of-the-art machine learning models")
                .list("ml")
                .list("nlp")
                .starred_at("2024-02-01T09:00:00Z")
                .arxiv("1910.03771"),
            RepoRecordBuilder::new("tokio-rs/tokio")
                .stars(25000)
                .language("Rust")
                .description("A runtime for writing reliable async applications")
                .list("async")
                .starred_at("2023-11-20T16:30:00Z"),
            RepoRecordBuilder::new("ggerganov/llama.cpp")
                .stars(60000)
                .language("C++")
                .description("LLM inference in C/C++")
                .list("ml")
                .starred_at("2024-03-05T12:00:00Z"),
        ])
        .with_papers(&[PaperRecordBuilder::new("1910.03771")
            .title("HuggingFace's Transformers: State-of-the-art Natural Language Processing")
            .authors(&["Thomas Wolf", "Lysandre Debut"])
            .categories(&["cs.CL"])
            .published("2019-10-09T00:00:00Z")])
        .build()
}
