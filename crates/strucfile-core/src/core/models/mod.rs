//! Data structures for structure-file records and the documents that own them.

pub mod document;
pub mod record;
