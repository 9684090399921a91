//! Snapshot loading.
//!
//! Both documents are fetched from the same [`DataSource`], parsed with the
//! tolerant parsers, and assembled into a [`Catalog`] the rest of the
//! application reads from.

pub mod catalog;
pub mod source;

pub use catalog::{ARXIV_DOCUMENT, Catalog, STARS_DOCUMENT, load_catalog};
pub use source::DataSource;
