//! Residue-name rewrites.

use super::rewrite_records;
use crate::core::models::record::{Record, RecordError, columns};
use crate::core::utils::vocabulary::{
    BARE_DNA_NAMES, DNA_ATOM_NAMES, canonical_residue_name, dna_residue_name, is_nucleotide,
};

/// Maps legacy residue spellings (`RA5`, `URA`, `rG`, `DT3`, ...) onto the canonical
/// nucleotide code. Chain terminators carry a residue name too and are rewritten alike.
pub fn canonicalize_residue_names(records: Vec<Record>) -> Result<Vec<Record>, RecordError> {
    rewrite_records(records, true, |record| {
        match canonical_residue_name(record.residue_name()) {
            Some(canonical) => record.set_residue_name(canonical),
            None => Ok(()),
        }
    })
}

/// Right-justifies short nucleotide names written at the left of the residue window
/// (`"U  "` becomes `"  U"`).
pub fn align_residue_names(records: Vec<Record>) -> Result<Vec<Record>, RecordError> {
    rewrite_records(records, true, |record| {
        let name = record.residue_name().to_string();
        let short_nucleotide = name.len() < columns::RESIDUE_NAME.width()
            && (is_nucleotide(&name) || BARE_DNA_NAMES.contains(name.as_str()));
        let width = columns::RESIDUE_NAME.width();
        if short_nucleotide && record.field(columns::RESIDUE_NAME) != format!("{name:>width$}") {
            record.set_residue_name(&name)?;
        }
        Ok(())
    })
}

/// Renames ribonucleotides to their deoxyribonucleotide codes, keeping uracil (`DU`) apart
/// from thymine (`DT`), and renames the 5-methyl carbon `C5M` to `C7`.
///
/// Only coordinate records are touched.
pub fn convert_to_dna(records: Vec<Record>) -> Result<Vec<Record>, RecordError> {
    rewrite_records(records, false, |record| {
        if let Some(dna) = dna_residue_name(record.residue_name()) {
            record.set_residue_name(dna)?;
        }
        if let Some(renamed) = DNA_ATOM_NAMES.get(record.atom_name()) {
            record.set_atom_name(renamed)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::fixtures::{atom, hetatm};

    fn records(lines: &[String]) -> Vec<Record> {
        lines.iter().filter_map(|l| Record::parse(l)).collect()
    }

    fn residue_names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.residue_name()).collect()
    }

    /// Asserts that two lines differ at most inside the given byte window.
    fn assert_only_window_changed(before: &Record, after: &Record, start: usize, end: usize) {
        let (b, a) = (before.line(), after.line());
        assert_eq!(b.len(), a.len(), "line width changed: {a:?}");
        assert_eq!(b[..start], a[..start]);
        assert_eq!(b[end..], a[end..]);
    }

    #[test]
    fn legacy_spellings_become_canonical_codes() {
        let input = records(&[
            atom(1, "P", "RG5", 1, "P"),
            atom(2, "P", "URA", 2, "P"),
            atom(3, "P", "rC", 3, "P"),
            atom(4, "P", "DT3", 4, "P"),
            atom(5, "CA", "ALA", 5, "C"),
        ]);

        let output = canonicalize_residue_names(input).unwrap();

        assert_eq!(residue_names(&output), vec!["G", "U", "C", "DT", "ALA"]);
    }

    #[test]
    fn canonicalization_rewrites_only_the_residue_window() {
        let input = records(&[atom(1, "O1P", "RA5", 1, "O"), hetatm(2, "P", "rU", 2, "P")]);

        let output = canonicalize_residue_names(input.clone()).unwrap();

        for (before, after) in input.iter().zip(&output) {
            assert_only_window_changed(before, after, 17, 20);
            assert_eq!(after.field(columns::RESIDUE_NAME).len(), 3);
        }
        assert_eq!(output[0].field(columns::RESIDUE_NAME), "  A");
    }

    #[test]
    fn canonicalization_reaches_chain_terminators() {
        let input = records(&["TER    1025      RU5 A  47".to_string()]);
        let output = canonicalize_residue_names(input).unwrap();
        assert_eq!(output[0].line(), "TER    1025        U A  47");
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let input = records(&[atom(1, "P", "RA3", 1, "P"), atom(2, "P", "GUA", 2, "P")]);
        let once = canonicalize_residue_names(input).unwrap();
        let twice = canonicalize_residue_names(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn left_justified_nucleotides_are_right_justified() {
        let input = records(&[
            "ATOM      1  P   U   A   1      50.193  51.190  50.534  1.00 99.85           P"
                .to_string(),
            "ATOM      2  P   DA  A   2      50.193  51.190  50.534  1.00 99.85           P"
                .to_string(),
            "ATOM      3  CA  ALA A   3      50.193  51.190  50.534  1.00 99.85           C"
                .to_string(),
        ]);

        let output = align_residue_names(input.clone()).unwrap();

        assert_eq!(output[0].field(columns::RESIDUE_NAME), "  U");
        assert_eq!(output[1].field(columns::RESIDUE_NAME), " DA");
        assert_eq!(output[2], input[2]);
        for (before, after) in input.iter().zip(&output) {
            assert_only_window_changed(before, after, 17, 20);
        }
    }

    #[test]
    fn alignment_is_idempotent_and_leaves_aligned_names_alone() {
        let input = records(&[atom(1, "P", "G", 1, "P"), atom(2, "P", "T", 2, "P")]);
        let once = align_residue_names(input.clone()).unwrap();
        assert_eq!(once, input);
        assert_eq!(align_residue_names(once.clone()).unwrap(), once);
    }

    #[test]
    fn dna_conversion_keeps_thymine_and_uracil_apart() {
        let input = records(&[
            atom(1, "P", "U", 1, "P"),
            atom(2, "P", "T", 2, "P"),
            atom(3, "P", "RA5", 3, "P"),
            atom(4, "P", "DG", 4, "P"),
        ]);

        let output = convert_to_dna(input).unwrap();

        assert_eq!(residue_names(&output), vec!["DU", "DT", "DA", "DG"]);
    }

    #[test]
    fn dna_conversion_renames_the_methyl_carbon() {
        let input = records(&[atom(1, "C5M", "T", 1, "C")]);

        let output = convert_to_dna(input.clone()).unwrap();

        assert_eq!(output[0].field(columns::ATOM_NAME), " C7 ");
        assert_eq!(output[0].field(columns::RESIDUE_NAME), " DT");
        assert_only_window_changed(&input[0], &output[0], 12, 20);
    }

    #[test]
    fn dna_conversion_preserves_delimiters() {
        let mut input = records(&[atom(1, "P", "G", 1, "P")]);
        input.push(Record::parse("TER       2        G A   1").unwrap());
        input.push(Record::end_of_structure());

        let output = convert_to_dna(input.clone()).unwrap();

        assert_eq!(output[1..], input[1..]);
        assert_eq!(output[0].residue_name(), "DG");
    }

    #[test]
    fn dna_conversion_is_idempotent() {
        let input = records(&[atom(1, "C5M", "RU3", 1, "C"), atom(2, "P", "C", 2, "P")]);
        let once = convert_to_dna(input).unwrap();
        let twice = convert_to_dna(once.clone()).unwrap();
        assert_eq!(once, twice);
    }
}
