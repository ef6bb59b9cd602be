//! Process-wide reference vocabularies.
//!
//! Every table is a compile-time perfect-hash set or map, so lookups never allocate and the
//! tables are shared by reference across any number of documents.

use phf::{Map, Set, phf_map, phf_set};

/// The twenty canonical amino-acid three-letter codes.
pub static AMINO_ACID_CODES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLU", "GLN", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
};

/// Standard nucleotide residue names: two-letter DNA and one-letter RNA codes.
pub static STANDARD_NUCLEOTIDES: Set<&'static str> = phf_set! {
    "DA", "DG", "DT", "DC",
    "A", "G", "U", "C",
};

/// Every residue name recognised as a nucleotide when classifying a molecule, including
/// modified bases and legacy dialect spellings.
#[rustfmt::skip]
pub static NUCLEOTIDE_CODES: Set<&'static str> = phf_set! {
    "A", "C", "G", "U",
    "DA", "DC", "DG", "DT",
    "ADE", "CYT", "GUA", "URY", "URI",
    "U34", "U31", "C31", "4SU", "H2U", "QUO", "G7M", "5MU", "5MC", "PSU", "2MG", "1MG", "1MA",
    "M2G", "5BU", "FHU", "FMU", "IU", "OMG", "OMC", "OMU", "A2M", "A23", "CCC", "I",
    "RC", "RU", "RA", "RG", "RT",
};

/// The single-prefixed "r"-dialect RNA spellings.
pub static LEGACY_RNA_NAMES: Set<&'static str> = phf_set! {
    "RA", "RC", "RG", "RU", "RT",
};

/// One-letter codes that, in a DNA structure, should have been written with a `D` prefix.
pub static BARE_DNA_NAMES: Set<&'static str> = phf_set! {
    "A", "T", "C", "G",
};

/// Amber terminal-residue spellings whose presence marks an amber-like file.
pub static AMBER_TERMINAL_NAMES: Set<&'static str> = phf_set! {
    "RA5", "RC5", "RG5", "RU5", "RT5",
    "RA3", "RC3", "RG3", "RU3", "RT3",
};

pub static WATER_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "TIP", "TIP3", "TIP4", "H2O", "SOL", "DOD",
};

/// Element symbols (and identically spelled residue names) of free ions.
pub static ION_SYMBOLS: Set<&'static str> = phf_set! {
    "NA", "MG", "K", "CL", "CA", "ZN", "MN", "SR", "BA", "CS", "RB", "LI", "CD", "CO", "NI",
};

/// Hydrogen atom names across the standard, amber and legacy `*`-prime dialects, used when a
/// file carries no element column.
#[rustfmt::skip]
pub static HYDROGEN_NAMES: Set<&'static str> = phf_set! {
    "H", "H1", "H2", "H3", "H5", "H6", "H8",
    "H21", "H22", "H41", "H42", "H61", "H62",
    "1H2", "2H2", "1H4", "2H4", "1H6", "2H6",
    "H1'", "H2'", "H3'", "H4'", "H5'", "H5''", "H5'1", "H5'2", "H2'1",
    "1H5'", "2H5'", "1H2'",
    "HO2'", "HO3'", "HO5'", "2HO'", "HO'2", "H5T", "H3T",
    "H1*", "H3*", "H4*", "1H5*", "2H5*", "1H2*", "2HO*",
};

/// Legacy residue spellings and their canonical nucleotide codes.
#[rustfmt::skip]
pub static CANONICAL_RESIDUE_NAMES: Map<&'static str, &'static str> = phf_map! {
    // --- Adenine ---
    "RA5" => "A", "RA3" => "A", "A5" => "A", "A3" => "A", "ADE" => "A", "RA" => "A", "rA" => "A",
    // --- Cytosine ---
    "RC5" => "C", "RC3" => "C", "C5" => "C", "C3" => "C", "CYT" => "C", "RC" => "C", "rC" => "C",
    // --- Guanine ---
    "RG5" => "G", "RG3" => "G", "G5" => "G", "G3" => "G", "GUA" => "G", "RG" => "G", "rG" => "G",
    // --- Uracil ---
    "RU5" => "U", "RU3" => "U", "U5" => "U", "U3" => "U", "URA" => "U", "URI" => "U", "URY" => "U",
    "RU" => "U", "rU" => "U",
    // --- Thymine ---
    "RT5" => "T", "RT3" => "T", "THY" => "T", "RT" => "T", "rT" => "T",
    // --- Deoxyribo terminal variants ---
    "DA5" => "DA", "DA3" => "DA",
    "DC5" => "DC", "DC3" => "DC",
    "DG5" => "DG", "DG3" => "DG",
    "DT5" => "DT", "DT3" => "DT",
    "DU5" => "DU", "DU3" => "DU",
};

/// Ribo- and deoxyribonucleotide spellings and their deoxyribonucleotide codes.
#[rustfmt::skip]
pub static DNA_RESIDUE_NAMES: Map<&'static str, &'static str> = phf_map! {
    "A" => "DA", "A5" => "DA", "A3" => "DA", "RA" => "DA", "rA" => "DA", "RA5" => "DA", "RA3" => "DA",
    "ADE" => "DA", "DA5" => "DA", "DA3" => "DA",
    "C" => "DC", "C5" => "DC", "C3" => "DC", "RC" => "DC", "rC" => "DC", "RC5" => "DC", "RC3" => "DC",
    "CYT" => "DC", "DC5" => "DC", "DC3" => "DC",
    "G" => "DG", "G5" => "DG", "G3" => "DG", "RG" => "DG", "rG" => "DG", "RG5" => "DG", "RG3" => "DG",
    "GUA" => "DG", "DG5" => "DG", "DG3" => "DG",
    "U" => "DU", "U5" => "DU", "U3" => "DU", "RU" => "DU", "rU" => "DU", "RU5" => "DU", "RU3" => "DU",
    "URA" => "DU", "DU5" => "DU", "DU3" => "DU",
    "T" => "DT", "RT" => "DT", "rT" => "DT", "RT5" => "DT", "RT3" => "DT",
    "THY" => "DT", "DT5" => "DT", "DT3" => "DT",
};

/// Canonical pyrimidine residue names (RNA and DNA).
pub static PYRIMIDINES: Set<&'static str> = phf_set! {
    "C", "U", "T", "DC", "DU", "DT",
};

/// Legacy phosphate oxygen names and their current spelling.
pub static PHOSPHATE_OXYGEN_NAMES: Map<&'static str, &'static str> = phf_map! {
    "O1P" => "OP1", "O2P" => "OP2", "O3P" => "OP3",
};

/// Atom renames applied when a structure is converted to DNA naming.
pub static DNA_ATOM_NAMES: Map<&'static str, &'static str> = phf_map! {
    "C5M" => "C7",
};

pub fn is_nucleotide(residue_name: &str) -> bool {
    NUCLEOTIDE_CODES.contains(residue_name.trim())
}

pub fn is_amber_terminal(residue_name: &str) -> bool {
    AMBER_TERMINAL_NAMES.contains(residue_name.trim())
}

pub fn is_water(residue_name: &str) -> bool {
    WATER_NAMES.contains(residue_name.trim())
}

/// Matches ion symbols case-insensitively, since element columns are written in either case.
pub fn is_ion(symbol: &str) -> bool {
    ION_SYMBOLS.contains(symbol.trim().to_ascii_uppercase().as_str())
}

pub fn is_hydrogen_name(atom_name: &str) -> bool {
    HYDROGEN_NAMES.contains(atom_name.trim())
}

pub fn is_pyrimidine(residue_name: &str) -> bool {
    PYRIMIDINES.contains(residue_name.trim())
}

pub fn canonical_residue_name(residue_name: &str) -> Option<&'static str> {
    CANONICAL_RESIDUE_NAMES.get(residue_name.trim()).copied()
}

pub fn dna_residue_name(residue_name: &str) -> Option<&'static str> {
    DNA_RESIDUE_NAMES.get(residue_name.trim()).copied()
}
