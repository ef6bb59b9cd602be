use super::AnalysisError;
use crate::core::models::document::Document;
use crate::core::models::record::columns;

/// Placeholder emitted for a residue whose record ends before the sequence-code column.
const MISSING_CODE: char = '?';

/// Extracts the one-letter sequence implied by residue boundaries, in file order.
///
/// One character is emitted for the first coordinate record and again every time the residue
/// sequence number changes. The character is read from column 20, the last column of the
/// residue-name field, rather than looked up in a vocabulary. That is exact for right-justified
/// one-letter nucleotide names (`"  G"` yields `G`) and only that: two-letter DNA codes yield
/// their base letter by coincidence, and three-letter residues yield their final letter.
///
/// # Errors
///
/// - [`AnalysisError::EmptyDocument`] when there are no coordinate records.
/// - [`AnalysisError::InvalidResidueNumber`] when a residue number is not an integer.
pub fn sequence(document: &Document) -> Result<String, AnalysisError> {
    let mut sequence = String::new();
    let mut current: Option<Option<i32>> = None;

    for record in document.coordinate_records() {
        let number = match record.residue_number() {
            None => None,
            Some(Ok(n)) => Some(n),
            Some(Err(raw)) => {
                return Err(AnalysisError::InvalidResidueNumber {
                    line: record.line().to_string(),
                    value: raw.to_string(),
                });
            }
        };
        if current != Some(number) {
            let code = record
                .field(columns::SEQUENCE_CODE)
                .chars()
                .next()
                .unwrap_or(MISSING_CODE);
            sequence.push(code);
            current = Some(number);
        }
    }

    if current.is_none() {
        return Err(AnalysisError::EmptyDocument);
    }
    Ok(sequence)
}
