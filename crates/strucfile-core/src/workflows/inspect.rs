use super::{WorkflowError, load};
use crate::core::analysis::AnalysisError;
use crate::core::analysis::classify::{
    Classification, bare_dna_names, classify, legacy_rna_names, non_canonical_nucleic_acid_names,
    non_canonical_protein_names,
};
use crate::core::analysis::sequence::sequence;
use crate::core::io::convert::FormatConverter;
use crate::core::models::document::Dialect;
use crate::core::models::record::RecordKind;
use std::fmt;
use std::path::Path;
use tracing::{info, instrument};

/// A read-only description of one structure file.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub source: String,
    pub records: usize,
    pub atoms: usize,
    pub hetero_atoms: usize,
    pub dialect: Dialect,
    pub residue_names: Vec<String>,
    /// `None` when the file has no residue names at all.
    pub classification: Option<Classification>,
    pub non_canonical_nucleic_acid_names: Vec<String>,
    pub non_canonical_protein_names: Vec<String>,
    pub legacy_rna_names: Vec<String>,
    pub bare_dna_names: Vec<String>,
    /// `None` when the file has no coordinate records.
    pub sequence: Option<String>,
    pub preview: String,
    pub report: String,
}

/// Loads `path` and describes it without changing anything.
///
/// # Errors
///
/// Fails when the file cannot be loaded or when a residue sequence number is not an integer.
#[instrument(skip_all, name = "inspect_workflow")]
pub fn run(
    path: &Path,
    converter: Option<&dyn FormatConverter>,
) -> Result<Inspection, WorkflowError> {
    let document = load(path, converter)?;

    let classification = match classify(&document) {
        Ok(c) => Some(c),
        Err(AnalysisError::EmptyDocument) => None,
        Err(e) => return Err(e.into()),
    };
    let sequence = match sequence(&document) {
        Ok(s) => Some(s),
        Err(AnalysisError::EmptyDocument) => None,
        Err(e) => return Err(e.into()),
    };
    info!(
        "Inspected {} records of {}.",
        document.len(),
        document.source()
    );

    Ok(Inspection {
        source: document.source().to_string(),
        records: document.len(),
        atoms: document.count(RecordKind::Atom),
        hetero_atoms: document.count(RecordKind::HetAtom),
        dialect: document.dialect(),
        residue_names: document.residue_names().iter().cloned().collect(),
        classification,
        non_canonical_nucleic_acid_names: non_canonical_nucleic_acid_names(&document),
        non_canonical_protein_names: non_canonical_protein_names(&document),
        legacy_rna_names: legacy_rna_names(&document),
        bare_dna_names: bare_dna_names(&document),
        sequence,
        preview: document.preview(),
        report: document.report().to_string(),
    })
}

fn list(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(" ")
    }
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File:            {}", self.source)?;
        writeln!(
            f,
            "Records:         {} ({} ATOM, {} HETATM)",
            self.records, self.atoms, self.hetero_atoms
        )?;
        writeln!(f, "mol2:            {}", self.dialect.mol2)?;
        writeln!(f, "Amber-like:      {}", self.dialect.amber_like)?;
        writeln!(f, "Residue names:   {}", list(&self.residue_names))?;
        match &self.classification {
            Some(c) => writeln!(f, "Molecule:        {c}")?,
            None => writeln!(f, "Molecule:        -")?,
        }
        writeln!(
            f,
            "Non-canonical (nucleic acid): {}",
            list(&self.non_canonical_nucleic_acid_names)
        )?;
        writeln!(
            f,
            "Non-canonical (protein):      {}",
            list(&self.non_canonical_protein_names)
        )?;
        writeln!(f, "Legacy RNA names: {}", list(&self.legacy_rna_names))?;
        writeln!(f, "Bare DNA names:   {}", list(&self.bare_dna_names))?;
        writeln!(
            f,
            "Sequence:        {}",
            self.sequence.as_deref().unwrap_or("-")
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.preview)?;
        writeln!(f)?;
        write!(f, "{}", self.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::classify::MoleculeKind;
    use crate::core::models::record::fixtures::{atom, document_text, hetatm};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn inspection_describes_an_rna_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rna.pdb");
        fs::write(
            &path,
            document_text(&[
                atom(1, "P", "G", 1, "P"),
                atom(2, "P", "RU", 2, "P"),
                atom(3, "P", "C", 3, "P"),
                hetatm(4, "MG", "MG", 4, "MG"),
            ]),
        )
        .unwrap();

        let inspection = run(&path, None).unwrap();

        assert_eq!(inspection.records, 4);
        assert_eq!(inspection.atoms, 3);
        assert_eq!(inspection.hetero_atoms, 1);
        assert_eq!(
            inspection.classification.and_then(|c| c.kind()),
            Some(MoleculeKind::Nucleic)
        );
        assert_eq!(inspection.sequence.as_deref(), Some("GUCG"));
        assert_eq!(inspection.legacy_rna_names, vec!["RU"]);
        assert_eq!(inspection.non_canonical_nucleic_acid_names, vec!["MG", "RU"]);
        assert!(!inspection.dialect.mol2);
    }

    #[test]
    fn a_file_without_records_inspects_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.pdb");
        fs::write(&path, "HEADER    NOTHING\n").unwrap();

        let inspection = run(&path, None).unwrap();

        assert_eq!(inspection.records, 0);
        assert!(inspection.classification.is_none());
        assert!(inspection.sequence.is_none());
        assert!(inspection.to_string().contains("Sequence:        -"));
    }

    #[test]
    fn malformed_residue_numbers_fail_the_inspection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.pdb");
        fs::write(&path, "ATOM      1  P     G A  x1\n").unwrap();

        let err = run(&path, None).unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::Analysis(AnalysisError::InvalidResidueNumber { .. })
        ));
    }

    #[test]
    fn display_lists_every_section() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rna.pdb");
        fs::write(&path, document_text(&[atom(1, "P", "A", 1, "P")])).unwrap();

        let text = run(&path, None).unwrap().to_string();

        assert!(text.contains("Records:         1 (1 ATOM, 0 HETATM)"));
        assert!(text.contains("Molecule:        nucleic acid"));
        assert!(text.contains("Sequence:        A"));
        assert!(text.contains("Structure file report:"));
    }
}
