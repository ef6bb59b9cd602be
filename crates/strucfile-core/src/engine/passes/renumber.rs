use crate::core::models::record::{Record, RecordError};

/// Rewrites atom serials to a dense `1..=N` over the coordinate records, in file order.
///
/// Chain terminators keep whatever serial they carried.
///
/// # Errors
///
/// Returns [`RecordError::FieldWidth`] once a serial no longer fits the five-column window,
/// that is, for documents of more than 99999 atoms.
pub fn renumber_atoms(mut records: Vec<Record>) -> Result<Vec<Record>, RecordError> {
    let mut serial = 0;
    for record in records.iter_mut().filter(|r| r.is_coordinate()) {
        serial += 1;
        record.set_serial(serial)?;
    }
    Ok(records)
}
