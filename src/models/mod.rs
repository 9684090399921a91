//! Data models for the starred-repository dashboard.
//!
//! This module defines the data structures loaded from the two snapshot
//! documents:
//!
//! - [`StarsSnapshot`] / [`Repo`] - the repository collection document
//! - [`ArxivPaper`] - one entry of the arXiv metadata document
//! - [`RepoEntry`] - a catalog row with its pre-extracted arXiv id
//!
//! These models use serde for JSON deserialization with custom deserializers
//! for lenient fields (timestamps, counts, category lists) in the
//! `parsers::deserializers` module.

pub mod arxiv;
pub mod repo;

pub use arxiv::{ArxivIndex, ArxivPaper};
pub use repo::{ArxivRefs, Repo, RepoEntry, RepoMetadata, StarsSnapshot};
