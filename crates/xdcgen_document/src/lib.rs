//! Hierarchical script documents for vendor tool input files.
//!
//! A [`Document`] owns an ordered tree of [`DocumentNode`]s (sections,
//! subsections and lines). Rendering walks the tree in insertion order and
//! frames each container with comment rules built from the single comment
//! marker of the document. Rendering never touches storage; only
//! [`Document::materialize`] and [`DocumentWriter`] write files.
//!
//! # Architecture
//!
//! - [`node`]: the node variants and the [`Container`] insertion API
//! - [`document`]: the root document, its banner, and materialization
//! - [`writer`]: the write step, reporting outcomes into a diagnostic sink
//! - [`error`]: storage errors

#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod node;
pub mod writer;

pub use document::{Banner, Document, WriteOutcome};
pub use error::DocumentError;
pub use node::{Container, DocumentNode, Line, Section, Subsection, RULE_WIDTH};
pub use writer::{DocumentWriter, DOCUMENT_SKIPPED, DOCUMENT_WRITTEN};
