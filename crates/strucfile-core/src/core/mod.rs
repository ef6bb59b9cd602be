//! # Core Module
//!
//! The stateless foundations of the library.
//!
//! ## Architecture
//!
//! - **Record Model** ([`models`]) - Fixed-width records with named column accessors, the
//!   single-frame document that owns them, and its diagnostic report
//! - **File I/O** ([`io`]) - The structure-file loader and writer, plus the format-conversion
//!   collaborator used for alternate-dialect inputs
//! - **Reference Vocabularies** ([`utils`]) - Immutable lookup tables for residue, atom, ion and
//!   water names across the supported naming dialects
//! - **Analyses** ([`analysis`]) - Molecule classification, non-canonical name checks and
//!   one-letter sequence extraction; these never mutate a document

pub mod analysis;
pub mod io;
pub mod models;
pub mod utils;
