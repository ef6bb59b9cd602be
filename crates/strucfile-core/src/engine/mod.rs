//! # Engine Module
//!
//! The transform layer. Each pass in [`passes`] consumes a record sequence and returns a new
//! one; passes are idempotent and leave records that match no rule untouched. The
//! [`pipeline::Pipeline`] runs a chosen set of passes in their required order, so callers
//! cannot accidentally run a pass before the one it depends on.
//!
//! ## Required order
//!
//! 1. canonicalize residue names
//! 2. align residue names
//! 3. convert to DNA naming
//! 4. remove hydrogens
//! 5. remove ions
//! 6. remove water
//! 7. fix phosphate names
//! 8. fix pyrimidine oxygen (matches canonical residue names, so it must follow 1 and 3)
//! 9. renumber atoms (last, so serials are dense after every removal)

pub mod config;
pub mod error;
pub mod passes;
pub mod pipeline;
pub mod progress;
