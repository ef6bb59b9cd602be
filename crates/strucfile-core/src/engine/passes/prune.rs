//! Passes that drop whole coordinate records. Delimiters are always kept.

use crate::core::models::record::{Record, columns};
use crate::core::utils::vocabulary::{is_hydrogen_name, is_ion, is_water};

/// Drops atoms whose element column reads `H`, or, for files without an element column, whose
/// atom name is a known hydrogen name.
pub fn remove_hydrogens(records: Vec<Record>) -> Vec<Record> {
    retain_unless(records, |r| {
        r.element().eq_ignore_ascii_case("H") || is_hydrogen_name(r.atom_name())
    })
}

/// Drops water molecules. The name is matched over the four-column window as well, which
/// catches `TIP3` spilling into the chain column.
pub fn remove_water(records: Vec<Record>) -> Vec<Record> {
    retain_unless(records, |r| {
        is_water(r.residue_name()) || is_water(r.field_trimmed(columns::RESIDUE_WINDOW))
    })
}

/// Drops free ions, recognised by an ion residue name.
///
/// The element column is consulted only when the residue name is blank: a chlorine or zinc atom
/// inside a named ligand or protein residue is bound, not free, and is kept.
pub fn remove_ions(records: Vec<Record>) -> Vec<Record> {
    retain_unless(records, |r| {
        let residue_name = r.residue_name();
        is_ion(residue_name) || (residue_name.is_empty() && is_ion(r.element()))
    })
}

fn retain_unless(mut records: Vec<Record>, drop: impl Fn(&Record) -> bool) -> Vec<Record> {
    records.retain(|r| !(r.is_coordinate() && drop(r)));
    records
}
