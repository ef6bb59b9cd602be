//! Read-only analyses over a [`Document`](crate::core::models::document::Document).
//!
//! Nothing in this module mutates records. Classification ambiguity is reported as a value
//! ([`Classification::Indeterminate`](classify::Classification::Indeterminate)); only a
//! document without coordinate records is an error.

pub mod classify;
pub mod sequence;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("The document contains no ATOM/HETATM records")]
    EmptyDocument,
    #[error("Invalid residue sequence number '{value}' in record: {line}")]
    InvalidResidueNumber { line: String, value: String },
}
