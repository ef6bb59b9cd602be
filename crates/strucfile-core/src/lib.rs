//! # strucfile Core Library
//!
//! A record-level model of fixed-column molecular structure files (PDB-style `ATOM`/`HETATM`
//! lines) together with read-only analyses and a normalization pipeline for the many naming
//! dialects found in RNA, DNA and protein structure files.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** The column-addressed [`Record`](core::models::record::Record),
//!   the single-frame [`Document`](core::models::document::Document), the process-wide reference
//!   vocabularies, file I/O and the read-only analyses (classification, sequence extraction).
//!
//! - **[`engine`]: The Logic Core.** The individual rewrite passes and the ordered
//!   [`Pipeline`](engine::pipeline::Pipeline) that runs them in their required order.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that tie loading, optional format
//!   conversion, analysis, the pipeline and writing together.

pub mod core;
pub mod engine;
pub mod workflows;
