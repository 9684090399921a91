//! Parsers for the two snapshot documents
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach suitable for CLI tools:
//!
//! - **Individual entry failures**: A repository or paper value that fails to
//!   decode is logged to stderr and skipped, allowing the rest of the document
//!   to load. This prevents a single corrupt record from hiding the whole
//!   collection.
//!
//! - **Catastrophic failure detection**: If >50% of a document's entries fail
//!   to decode, the parser returns an error. This prevents accepting
//!   fundamentally broken snapshots.
//!
//! - **Field-level tolerance**: Inside a record, optional fields (timestamps,
//!   counts, category lists) use lenient deserializers that default instead of
//!   failing, since snapshot generations differ in which fields they carry.
//!
//! - **Error propagation**: Uses `anyhow::Result` with context. Since this is
//!   a binary/CLI tool (not a library), errors are boxed and consumers don't
//!   match on error types.

pub mod arxiv;
pub mod deserializers;
pub mod stars;

pub use arxiv::parse_arxiv_document;
pub use stars::parse_stars_document;
