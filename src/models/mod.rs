//! Data model layer.

pub mod document;
pub mod outline;
pub mod samples;

pub use document::{Document, DocumentError, DocumentStore, SharedDocuments};
pub use outline::{NodeId, Outline, OutlineError, OutlineNode, OutlineRow};
