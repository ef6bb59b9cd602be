use super::record::{Record, RecordKind};
use crate::core::analysis::classify::unique_residue_names;
use crate::core::io::convert::{ConvertError, FormatConverter, converted_file_name};
use crate::core::io::pdb::{PdbError, PdbFile};
use crate::core::io::traits::StructureFile;
use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const PREVIEW_LINES: usize = 5;
const PREVIEW_RULE: &str = "-------------------------------------------------------------------";

/// An append-only, human-readable log of what was detected in and done to a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    notes: Vec<String>,
}

impl Report {
    pub fn new(source: &str) -> Self {
        Self {
            notes: vec![format!("Structure file report: {source}")],
        }
    }

    pub fn push(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notes.join("\n"))
    }
}

/// Dialect facts established while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dialect {
    /// The source contained a Tripos mol2 section marker.
    pub mol2: bool,
    /// At least one residue used an amber-style terminal spelling such as `RG5`.
    pub amber_like: bool,
}

/// The ordered records of one single-frame structure file.
///
/// The residue-name set is computed eagerly and refreshed whenever the record sequence is
/// replaced, so analyses always see the current names.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    source: String,
    records: Vec<Record>,
    residue_names: BTreeSet<String>,
    dialect: Dialect,
    report: Report,
}

impl Document {
    pub(crate) fn new(
        source: &str,
        records: Vec<Record>,
        dialect: Dialect,
        report: Report,
    ) -> Self {
        let residue_names = unique_residue_names(&records);
        Self {
            source: source.to_string(),
            records,
            residue_names,
            dialect,
            report,
        }
    }

    /// Loads a structure file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PdbError::MissingFile`] when the path cannot be opened and
    /// [`PdbError::MultiFrame`] when the file holds more than one model.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PdbError> {
        PdbFile::read_from_path(path)
    }

    /// Loads a structure file, routing mol2 inputs through `converter` first.
    ///
    /// The converter writes into a scratch directory that is removed once the converted file
    /// has been reloaded, so nothing is left next to the source. The reloaded document keeps
    /// the source path as its name and its report records the conversion.
    pub fn load_converting<P: AsRef<Path>>(
        path: P,
        converter: &dyn FormatConverter,
    ) -> Result<Self, PdbError> {
        let path = path.as_ref();
        let document = Self::load(path)?;
        if !document.is_mol2() {
            return Ok(document);
        }

        let scratch = tempfile::Builder::new()
            .prefix("strucfile-")
            .tempdir()
            .map_err(ConvertError::Io)?;
        let destination = scratch.path().join(converted_file_name(path));
        info!("Input {:?} is in mol2 format; converting it.", path);
        let converted = converter.convert(path, &destination)?;

        let file = File::open(&converted).map_err(|e| PdbFile::open_failed(&converted, e))?;
        let mut document =
            PdbFile::read_from(&mut BufReader::new(file), &path.display().to_string())?;
        document.report.push("  Converted from mol2 to PDB");
        Ok(document)
    }

    /// Writes the document to disk, terminated by an `END` record.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PdbError> {
        PdbFile::write_to_path(self, path)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates over the `ATOM`/`HETATM` records only.
    pub fn coordinate_records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| r.is_coordinate())
    }

    /// Installs a new record sequence and refreshes the residue-name set.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.residue_names = unique_residue_names(&records);
        self.records = records;
    }

    /// Distinct residue names, upper-cased and trimmed.
    pub fn residue_names(&self) -> &BTreeSet<String> {
        &self.residue_names
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn is_mol2(&self) -> bool {
        self.dialect.mol2
    }

    pub fn is_amber_like(&self) -> bool {
        self.dialect.amber_like
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn report_mut(&mut self) -> &mut Report {
        &mut self.report
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source was recognised as a structure file at all.
    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    /// All records, each terminated by a newline.
    pub fn text(&self) -> String {
        self.records
            .iter()
            .map(|r| format!("{}\n", r.line().trim_end()))
            .collect()
    }

    /// The coordinate records of one chain followed by a `TER` line.
    pub fn chain(&self, chain_id: char) -> String {
        let mut text: String = self
            .coordinate_records()
            .filter(|r| r.chain_id() == Some(chain_id))
            .map(|r| format!("{}\n", r.line().trim_end()))
            .collect();
        text.push_str("TER");
        text
    }

    pub fn head(&self, n: usize) -> String {
        join_lines(self.records.iter().take(n))
    }

    pub fn tail(&self, n: usize) -> String {
        let skip = self.records.len().saturating_sub(n);
        join_lines(self.records.iter().skip(skip))
    }

    /// The first and last five records separated by a dashed rule.
    pub fn preview(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.head(PREVIEW_LINES),
            PREVIEW_RULE,
            self.tail(PREVIEW_LINES)
        )
    }

    /// Counts records of the given kind.
    pub fn count(&self, kind: RecordKind) -> usize {
        self.records.iter().filter(|r| r.kind() == kind).count()
    }
}

impl FromStr for Document {
    type Err = PdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PdbFile::read_from(&mut s.as_bytes(), "<memory>")
    }
}

fn join_lines<'a>(records: impl Iterator<Item = &'a Record>) -> String {
    records
        .map(|r| r.line().trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
