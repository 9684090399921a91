//! Stargazer - browse and search a snapshot of starred GitHub repositories
//!
//! This library loads two static JSON documents - a starred-repository
//! collection and an arXiv paper metadata map - from a directory or HTTP
//! base URL, and serves interactive and one-shot views over them. It
//! supports:
//!
//! - Tolerant snapshot parsing with per-entry skip and failure-rate limits
//! - Free-text search plus structured field conditions (AND/OR)
//! - Stable sorting over repository fields and derived paper dates
//! - A split-pane terminal browser with clipboard integration
//!
//! # Example
//!
//! ```no_run
//! use stargazer::loader::{DataSource, load_catalog};
//!
//! let source = DataSource::parse("./snapshots");
//! let catalog = load_catalog(&source)?;
//! println!("Loaded {} repositories", catalog.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod filters;
pub mod loader;
pub mod models;
pub mod parsers;
pub mod sort;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use loader::{Catalog, DataSource, load_catalog};
pub use models::{ArxivIndex, ArxivPaper, Repo, RepoEntry, StarsSnapshot};
pub use utils::{extract_arxiv_id, resolve_data_location};
