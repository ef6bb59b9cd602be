use super::AnalysisError;
use crate::core::models::document::Document;
use crate::core::models::record::Record;
use crate::core::utils::vocabulary::{
    AMINO_ACID_CODES, BARE_DNA_NAMES, LEGACY_RNA_NAMES, NUCLEOTIDE_CODES, STANDARD_NUCLEOTIDES,
};
use phf::Set;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoleculeKind {
    Protein,
    Nucleic,
}

impl fmt::Display for MoleculeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoleculeKind::Protein => write!(f, "protein"),
            MoleculeKind::Nucleic => write!(f, "nucleic acid"),
        }
    }
}

/// The outcome of scoring a document's residue names against the reference vocabularies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    /// No residue name belongs to either vocabulary.
    Indeterminate,
    Classified {
        kind: MoleculeKind,
        protein_fraction: f64,
        nucleic_fraction: f64,
    },
}

impl Classification {
    pub fn kind(&self) -> Option<MoleculeKind> {
        match self {
            Classification::Indeterminate => None,
            Classification::Classified { kind, .. } => Some(*kind),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Indeterminate => write!(f, "indeterminate"),
            Classification::Classified {
                kind,
                protein_fraction,
                nucleic_fraction,
            } => write!(
                f,
                "{kind} (protein {protein_fraction:.2}, nucleic acid {nucleic_fraction:.2})"
            ),
        }
    }
}

/// Collects the distinct residue names of the coordinate records, upper-cased and trimmed.
///
/// Blank residue fields are skipped.
pub fn unique_residue_names(records: &[Record]) -> BTreeSet<String> {
    records
        .iter()
        .filter(|r| r.is_coordinate())
        .map(|r| r.residue_name().to_ascii_uppercase())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Scores the document as protein or nucleic acid.
///
/// Both fractions are computed over *distinct* residue names, so a structure with one unusual
/// residue weighs that residue as heavily as a canonical one. Ties go to
/// [`MoleculeKind::Nucleic`].
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyDocument`] when the document has no residue names at all.
pub fn classify(document: &Document) -> Result<Classification, AnalysisError> {
    let names = document.residue_names();
    if names.is_empty() {
        return Err(AnalysisError::EmptyDocument);
    }

    let total = names.len() as f64;
    let protein_fraction = count_members(names, &AMINO_ACID_CODES) as f64 / total;
    let nucleic_fraction = count_members(names, &NUCLEOTIDE_CODES) as f64 / total;

    if protein_fraction == 0.0 && nucleic_fraction == 0.0 {
        return Ok(Classification::Indeterminate);
    }

    let kind = if protein_fraction > nucleic_fraction {
        MoleculeKind::Protein
    } else {
        MoleculeKind::Nucleic
    };
    Ok(Classification::Classified {
        kind,
        protein_fraction,
        nucleic_fraction,
    })
}

/// Residue names outside the standard nucleotide codes (`A`, `C`, `G`, `U`, `DA`, ...).
pub fn non_canonical_nucleic_acid_names(document: &Document) -> Vec<String> {
    names_outside(document, &STANDARD_NUCLEOTIDES)
}

/// Residue names outside the twenty canonical amino acids.
pub fn non_canonical_protein_names(document: &Document) -> Vec<String> {
    names_outside(document, &AMINO_ACID_CODES)
}

/// Residue names written in the "r"-prefixed RNA dialect (`RA`, `RU`, ...).
pub fn legacy_rna_names(document: &Document) -> Vec<String> {
    names_inside(document, &LEGACY_RNA_NAMES)
}

/// One-letter `A`/`T`/`C`/`G` names, which in a DNA structure should carry a `D` prefix.
pub fn bare_dna_names(document: &Document) -> Vec<String> {
    names_inside(document, &BARE_DNA_NAMES)
}

fn count_members(names: &BTreeSet<String>, vocabulary: &Set<&'static str>) -> usize {
    names
        .iter()
        .filter(|name| vocabulary.contains(name.as_str()))
        .count()
}

fn names_outside(document: &Document, vocabulary: &Set<&'static str>) -> Vec<String> {
    document
        .residue_names()
        .iter()
        .filter(|name| !vocabulary.contains(name.as_str()))
        .cloned()
        .collect()
}

fn names_inside(document: &Document, vocabulary: &Set<&'static str>) -> Vec<String> {
    document
        .residue_names()
        .iter()
        .filter(|name| vocabulary.contains(name.as_str()))
        .cloned()
        .collect()
}
