use super::convert::ConvertError;
use super::traits::StructureFile;
use crate::core::models::document::{Dialect, Document, Report};
use crate::core::models::record::{Record, RecordKind, columns};
use crate::core::utils::vocabulary::is_amber_terminal;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Opens a conformational frame; a document may contain at most one.
const FRAME_MARKER: &str = "MODEL";
/// Section marker of the Tripos mol2 format.
const MOL2_MARKER: &str = "@<TRIPOS>";

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Cannot read structure file '{path}': {source}", path = path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "Second MODEL record on line {line}; select a single model before processing this file"
    )]
    MultiFrame { line: usize },
    #[error("Record on line {line} is not valid UTF-8")]
    Encoding { line: usize },
    #[error("Format conversion failed: {0}")]
    Conversion(#[from] ConvertError),
}

/// The fixed-column PDB-style structure format.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    /// Keeps `ATOM`, `HETATM`, `TER` and `END` lines and silently drops everything else.
    ///
    /// Dialect detection happens on the way through: a mol2 section marker anywhere in the text
    /// and any amber terminal residue spelling are both noted in the report.
    fn read_from(reader: &mut impl BufRead, source: &str) -> Result<Document, Self::Error> {
        let mut report = Report::new(source);
        let mut dialect = Dialect::default();
        let mut records = Vec::new();
        let mut frames = 0usize;

        let mut buf = Vec::new();
        let mut line_num = 0usize;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_num += 1;

            if buf.starts_with(FRAME_MARKER.as_bytes()) {
                frames += 1;
                if frames > 1 {
                    return Err(PdbError::MultiFrame { line: line_num });
                }
                continue;
            }

            if !dialect.mol2 && contains(&buf, MOL2_MARKER.as_bytes()) {
                dialect.mol2 = true;
                report.push("This is mol2 format");
                warn!("{} contains mol2 sections ({}).", source, MOL2_MARKER);
            }

            // Only kept records must be text; dropped lines may carry any encoding.
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(_) if RecordKind::detect(&String::from_utf8_lossy(&buf)).is_none() => continue,
                Err(_) => return Err(PdbError::Encoding { line: line_num }),
            };

            let Some(record) = Record::parse(line) else {
                continue;
            };
            if !dialect.amber_like
                && record.is_coordinate()
                && is_amber_terminal(record.field(columns::RESIDUE_NAME))
            {
                dialect.amber_like = true;
                report.push("This is amber-like format");
                warn!(
                    "{} uses amber-style terminal residue names (e.g. '{}').",
                    source,
                    record.residue_name()
                );
            }
            records.push(record);
        }

        debug!("Loaded {} records from {}.", records.len(), source);
        Ok(Document::new(source, records, dialect, report))
    }

    /// Writes every record verbatim and terminates the output with `END` unless the last record
    /// already is one.
    fn write_to(document: &Document, writer: &mut impl Write) -> Result<(), Self::Error> {
        for record in document.records() {
            writeln!(writer, "{}", record.line())?;
        }
        let terminated = document
            .records()
            .last()
            .is_some_and(|r| r.kind() == RecordKind::EndOfStructure);
        if !terminated {
            writeln!(writer, "{}", Record::end_of_structure())?;
        }
        Ok(())
    }

    fn open_failed(path: &Path, source: io::Error) -> Self::Error {
        PdbError::MissingFile {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::fixtures::{atom, document_text, hetatm};
    use std::fs;
    use tempfile::tempdir;

    fn write_to_string(document: &Document) -> String {
        let mut out = Vec::new();
        PdbFile::write_to(document, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn headers_and_remarks_are_dropped() {
        let text = format!(
            "HEADER    RNA\nREMARK   2 RESOLUTION.\nCRYST1   1.000\n{}\nCONECT    1    2\nEND\n",
            atom(1, "P", "G", 1, "P")
        );
        let d: Document = text.parse().unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.records()[0].kind(), RecordKind::Atom);
        assert_eq!(d.records()[1].kind(), RecordKind::EndOfStructure);
    }

    #[test]
    fn non_utf8_header_lines_are_dropped_like_any_other_header() {
        let mut bytes = b"REMARK   1 AUTHOR J. M\xfcller\n".to_vec();
        bytes.extend_from_slice(atom(1, "P", "G", 1, "P").as_bytes());
        bytes.push(b'\n');

        let d = PdbFile::read_from(&mut bytes.as_slice(), "latin1.pdb").unwrap();

        assert_eq!(d.len(), 1);
        assert_eq!(d.records()[0].residue_name(), "G");
    }

    #[test]
    fn non_utf8_records_are_rejected_with_their_line_number() {
        let mut bytes = b"HEADER    RNA\n".to_vec();
        bytes.extend_from_slice(b"ATOM      1  P     G A   1  \xe9\n");

        let err = PdbFile::read_from(&mut bytes.as_slice(), "latin1.pdb").unwrap_err();

        assert!(matches!(err, PdbError::Encoding { line: 2 }));
    }

    #[test]
    fn a_single_model_is_accepted() {
        let text = format!("MODEL        1\n{}\nENDMDL\nEND\n", atom(1, "P", "G", 1, "P"));
        let d: Document = text.parse().unwrap();
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn a_second_model_is_rejected_with_its_line_number() {
        let text = format!(
            "MODEL        1\n{}\nENDMDL\nMODEL        2\n{}\nENDMDL\n",
            atom(1, "P", "G", 1, "P"),
            atom(1, "P", "G", 1, "P")
        );
        let err = text.parse::<Document>().unwrap_err();
        assert!(matches!(err, PdbError::MultiFrame { line: 4 }));
    }

    #[test]
    fn mol2_marker_is_detected_anywhere() {
        let d: Document = "# comment\n@<TRIPOS>MOLECULE\nlig\n@<TRIPOS>ATOM\n"
            .parse()
            .unwrap();
        assert!(d.is_mol2());
        assert!(!d.has_records());
        assert!(d.report().notes().iter().any(|n| n == "This is mol2 format"));
    }

    #[test]
    fn amber_terminal_names_mark_the_document_amber_like() {
        let text = document_text(&[atom(1, "P", "RG5", 1, "P"), atom(2, "P", "RG5", 1, "P")]);
        let d: Document = text.parse().unwrap();
        assert!(d.is_amber_like());
        let amber_notes = d
            .report()
            .notes()
            .iter()
            .filter(|n| n.contains("amber-like"))
            .count();
        assert_eq!(amber_notes, 1);
    }

    #[test]
    fn standard_names_are_not_amber_like() {
        let d: Document = document_text(&[atom(1, "P", "G", 1, "P")]).parse().unwrap();
        assert!(!d.is_amber_like());
        assert!(!d.is_mol2());
    }

    #[test]
    fn writing_round_trips_records_byte_for_byte_and_appends_end() {
        let lines = vec![
            atom(1, "P", "G", 1, "P"),
            "ATOM      2  OP1   G A   1      50.626  49.730  50.573  1.00100.00           O    "
                .to_string(),
            "TER       3        G A   1".to_string(),
            hetatm(4, "MG", "MG", 101, "MG"),
        ];
        let text = document_text(&lines);
        let d: Document = text.parse().unwrap();

        let written = write_to_string(&d);

        assert_eq!(written, format!("{text}END\n"));
    }

    #[test]
    fn writing_does_not_duplicate_an_existing_end() {
        let text = format!("{}\nEND\n", atom(1, "P", "G", 1, "P"));
        let d: Document = text.parse().unwrap();
        assert_eq!(write_to_string(&d), text);
    }

    #[test]
    fn writing_an_empty_document_still_terminates_it() {
        let d: Document = "REMARK nothing\n".parse().unwrap();
        assert_eq!(write_to_string(&d), "END\n");
    }

    #[test]
    fn unreadable_path_is_a_missing_file_error() {
        let dir = tempdir().unwrap();
        let err = PdbFile::read_from_path(dir.path().join("absent.pdb")).unwrap_err();
        assert!(matches!(err, PdbError::MissingFile { .. }));
    }

    #[test]
    fn path_round_trip_preserves_content() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        let output = dir.path().join("out.pdb");
        let text = document_text(&[atom(1, "P", "U", 1, "P"), atom(2, "P", "C", 2, "P")]);
        fs::write(&input, &text).unwrap();

        let d = PdbFile::read_from_path(&input).unwrap();
        assert_eq!(d.source(), input.display().to_string());
        PdbFile::write_to_path(&d, &output).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), format!("{text}END\n"));
    }
}
