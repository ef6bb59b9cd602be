//! Atom-name rewrites for legacy naming conventions.

use super::rewrite_records;
use crate::core::models::record::{Record, RecordError, columns};
use crate::core::utils::vocabulary::{PHOSPHATE_OXYGEN_NAMES, is_pyrimidine};

const LEGACY_PRIME: char = '*';
const PRIME: char = '\'';

/// Rewrites the `*` prime marker to `'` and renames `O1P`/`O2P`/`O3P` to `OP1`/`OP2`/`OP3`.
///
/// Both rewrites are confined to the atom-name window.
pub fn fix_phosphate_names(records: Vec<Record>) -> Result<Vec<Record>, RecordError> {
    rewrite_records(records, false, |record| {
        let raw = record.field(columns::ATOM_NAME);
        if raw.contains(LEGACY_PRIME) {
            let width = columns::ATOM_NAME.width();
            let primed = format!("{:<width$}", raw.replace(LEGACY_PRIME, &PRIME.to_string()));
            record.set_field(columns::ATOM_NAME, &primed)?;
        }
        if let Some(renamed) = PHOSPHATE_OXYGEN_NAMES.get(record.atom_name()) {
            record.set_atom_name(renamed)?;
        }
        Ok(())
    })
}

/// Renames a bare `O` atom to `O2` in pyrimidine residues.
///
/// Residues are matched by canonical name only, so legacy spellings must be canonicalized
/// first or they pass through untouched.
pub fn fix_pyrimidine_oxygen(records: Vec<Record>) -> Result<Vec<Record>, RecordError> {
    rewrite_records(records, false, |record| {
        if record.atom_name() == "O" && is_pyrimidine(record.residue_name()) {
            record.set_atom_name("O2")?;
        }
        Ok(())
    })
}
