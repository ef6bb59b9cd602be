//! Provides input/output functionality for structure files.
//!
//! The loader and writer work on the fixed-column record text directly; files in the alternate
//! Tripos mol2 dialect are only ever handed to an external [`convert::FormatConverter`].

pub mod convert;
pub mod pdb;
pub mod traits;
