/// Integration tests for loading snapshot documents over HTTP
///
/// A mock server stands in for the static host the snapshots are
/// published on; both documents are plain GETs against a base URL
mod common;

use common::SnapshotDirBuilder;
use httpmock::prelude::*;
use stargazer::loader::{DataSource, load_catalog};

const STARS_BODY: &str = r#"{
    "last_updated": "2024-03-01T12:00:00Z",
    "repositories": {
        "huggingface/transformers": {
            "lists": ["ml"],
            "metadata": {"stars": 120000, "language": "Python"},
            "arxiv": {"ids": ["1910.03771"], "primary_id": "1910.03771"}
        },
        "tokio-rs/tokio": {
            "lists": ["async"],
            "metadata": {"stars": 25000, "language": "Rust"}
        }
    }
}"#;

const ARXIV_BODY: &str = r#"{
    "1910.03771": {
        "title": "HuggingFace's Transformers",
        "authors": ["Thomas Wolf"],
        "categories": ["cs.CL"],
        "published": "2019-10-09T00:00:00Z"
    }
}"#;

#[test]
fn test_http_load_catalog_from_server() {
    let server = MockServer::start();
    let stars_mock = server.mock(|when, then| {
        when.method(GET).path("/github_stars.json");
        then.status(200).header("content-type", "application/json").body(STARS_BODY);
    });
    let arxiv_mock = server.mock(|when, then| {
        when.method(GET).path("/arxiv_metadata.json");
        then.status(200).header("content-type", "application/json").body(ARXIV_BODY);
    });

    let source = DataSource::parse(&server.base_url());
    let result = load_catalog(&source);
    assert!(result.is_ok(), "Should load catalog over HTTP: {:?}", result.err());

    let catalog = result.unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.papers.len(), 1);
    assert_eq!(catalog.entries[0].key, "huggingface/transformers");
    assert_eq!(catalog.entries[0].arxiv_id.as_deref(), Some("1910.03771"));

    stars_mock.assert();
    arxiv_mock.assert();
}

#[test]
fn test_http_missing_arxiv_document_degrades() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/github_stars.json");
        then.status(200).body(STARS_BODY);
    });
    server.mock(|when, then| {
        when.method(GET).path("/arxiv_metadata.json");
        then.status(404);
    });

    let source = DataSource::parse(&server.base_url());
    let result = load_catalog(&source);
    assert!(result.is_ok(), "A missing arXiv document should only cost the annotations");

    let catalog = result.unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(catalog.papers.is_empty());
}

#[test]
fn test_http_missing_stars_document_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/github_stars.json");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(GET).path("/arxiv_metadata.json");
        then.status(200).body(ARXIV_BODY);
    });

    let source = DataSource::parse(&server.base_url());
    let result = load_catalog(&source);
    assert!(result.is_err(), "Should fail without the repository document");
    assert!(format!("{:#}", result.unwrap_err()).contains("Server returned 404"));
}

#[test]
fn test_http_server_error_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/github_stars.json");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/arxiv_metadata.json");
        then.status(500);
    });

    let source = DataSource::parse(&server.base_url());
    let result = load_catalog(&source);
    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("Server returned 500"));
}

#[test]
fn test_http_trailing_slash_in_base_url() {
    let server = MockServer::start();
    let stars_mock = server.mock(|when, then| {
        when.method(GET).path("/github_stars.json");
        then.status(200).body(STARS_BODY);
    });
    server.mock(|when, then| {
        when.method(GET).path("/arxiv_metadata.json");
        then.status(200).body(ARXIV_BODY);
    });

    let source = DataSource::parse(&format!("{}/", server.base_url()));
    let result = load_catalog(&source);
    assert!(result.is_ok(), "Trailing slash should not produce a double-slash path");

    stars_mock.assert();
}

#[test]
fn test_http_and_directory_loads_agree() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/github_stars.json");
        then.status(200).body(STARS_BODY);
    });
    server.mock(|when, then| {
        when.method(GET).path("/arxiv_metadata.json");
        then.status(200).body(ARXIV_BODY);
    });

    let data_dir = SnapshotDirBuilder::new().with_stars(STARS_BODY).with_arxiv(ARXIV_BODY).build();

    let from_http = load_catalog(&DataSource::parse(&server.base_url())).expect("HTTP load");
    let from_dir = load_catalog(&DataSource::parse(
        data_dir.path().to_str().expect("temp path should be UTF-8"),
    ))
    .expect("Directory load");

    let http_keys: Vec<&str> = from_http.entries.iter().map(|e| e.key.as_str()).collect();
    let dir_keys: Vec<&str> = from_dir.entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(http_keys, dir_keys);
    assert_eq!(from_http.lists, from_dir.lists);
    assert_eq!(from_http.papers.len(), from_dir.papers.len());
    assert_eq!(from_http.last_updated, from_dir.last_updated);
}
