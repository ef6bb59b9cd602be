//! # Workflows Module
//!
//! End-to-end procedures built on the core and engine layers. These are the entry points a
//! front end calls: each one loads a structure file (converting it first when it is in the
//! mol2 dialect), runs its analyses or transforms and hands back a plain summary value.
//!
//! - **Clean** ([`clean`]) - load, classify, run the transform pipeline and write the result.
//! - **Inspect** ([`inspect`]) - load and describe a file without changing it.

pub mod clean;
pub mod inspect;

use crate::core::analysis::AnalysisError;
use crate::core::io::convert::FormatConverter;
use crate::core::io::pdb::PdbError;
use crate::core::models::document::Document;
use crate::engine::error::EngineError;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Pdb(#[from] PdbError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Loads `input`, converting it first when a converter is supplied and the file is mol2.
pub(crate) fn load(
    input: &Path,
    converter: Option<&dyn FormatConverter>,
) -> Result<Document, PdbError> {
    let document = match converter {
        Some(converter) => Document::load_converting(input, converter)?,
        None => Document::load(input)?,
    };
    if document.is_mol2() {
        warn!(
            "{:?} was loaded as mol2 without conversion; its structure records may be missing.",
            input
        );
    }
    Ok(document)
}
