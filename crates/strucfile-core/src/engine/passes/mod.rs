//! The individual rewrite passes.
//!
//! Every pass takes ownership of a record sequence and returns the rewritten one. Rewrites go
//! through the column-addressed setters of [`Record`], so a pass can change the width of no
//! field and shift no column.

pub mod atoms;
pub mod prune;
pub mod renumber;
pub mod residues;

use super::error::EngineError;
use crate::core::models::document::Document;
use crate::core::models::record::{Record, RecordError, RecordKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A named transform stage. The declaration order is the order a pipeline runs them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    CanonicalizeResidueNames,
    AlignResidueNames,
    ConvertToDna,
    RemoveHydrogens,
    RemoveIons,
    RemoveWater,
    FixPhosphateNames,
    FixPyrimidineOxygen,
    RenumberAtoms,
}

impl Stage {
    /// Every stage, in required order.
    pub const ALL: [Stage; 9] = [
        Stage::CanonicalizeResidueNames,
        Stage::AlignResidueNames,
        Stage::ConvertToDna,
        Stage::RemoveHydrogens,
        Stage::RemoveIons,
        Stage::RemoveWater,
        Stage::FixPhosphateNames,
        Stage::FixPyrimidineOxygen,
        Stage::RenumberAtoms,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::CanonicalizeResidueNames => "canonicalize-residue-names",
            Stage::AlignResidueNames => "align-residue-names",
            Stage::ConvertToDna => "convert-to-dna",
            Stage::RemoveHydrogens => "remove-hydrogens",
            Stage::RemoveIons => "remove-ions",
            Stage::RemoveWater => "remove-water",
            Stage::FixPhosphateNames => "fix-phosphate-names",
            Stage::FixPyrimidineOxygen => "fix-pyrimidine-oxygen",
            Stage::RenumberAtoms => "renumber-atoms",
        }
    }

    fn report_note(self) -> &'static str {
        match self {
            Stage::CanonicalizeResidueNames => "  Fix: legacy residue names -> canonical",
            Stage::AlignResidueNames => "  Fix: U__ -> __U",
            Stage::ConvertToDna => "  Residue names converted to DNA",
            Stage::RemoveHydrogens => "  Hydrogens removed",
            Stage::RemoveIons => "  Ions removed",
            Stage::RemoveWater => "  Water removed",
            Stage::FixPhosphateNames => "  Fix: O1P/O2P/O3P -> OP1/OP2/OP3, * -> '",
            Stage::FixPyrimidineOxygen => "  Fix: O -> O2 in pyrimidines",
            Stage::RenumberAtoms => "  Atoms renumbered",
        }
    }

    /// Runs this stage's pass over a record sequence.
    pub fn apply(self, records: Vec<Record>) -> Result<Vec<Record>, EngineError> {
        let result = match self {
            Stage::CanonicalizeResidueNames => residues::canonicalize_residue_names(records),
            Stage::AlignResidueNames => residues::align_residue_names(records),
            Stage::ConvertToDna => residues::convert_to_dna(records),
            Stage::RemoveHydrogens => Ok(prune::remove_hydrogens(records)),
            Stage::RemoveIons => Ok(prune::remove_ions(records)),
            Stage::RemoveWater => Ok(prune::remove_water(records)),
            Stage::FixPhosphateNames => atoms::fix_phosphate_names(records),
            Stage::FixPyrimidineOxygen => atoms::fix_pyrimidine_oxygen(records),
            Stage::RenumberAtoms => renumber::renumber_atoms(records),
        };
        result.map_err(|source| EngineError::Record {
            stage: self,
            source,
        })
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Stage {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == normalized)
            .ok_or_else(|| EngineError::UnknownStage(s.to_string()))
    }
}

/// The effect of one stage on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageOutcome {
    pub stage: Stage,
    pub records_before: usize,
    pub records_after: usize,
}

impl StageOutcome {
    pub fn removed(&self) -> usize {
        self.records_before.saturating_sub(self.records_after)
    }
}

/// Applies one stage to a document in place and notes it in the document's report.
///
/// On failure the document keeps its records from before the stage.
pub fn apply(document: &mut Document, stage: Stage) -> Result<StageOutcome, EngineError> {
    let records = document.records().to_vec();
    let records_before = records.len();
    let rewritten = stage.apply(records)?;
    let records_after = rewritten.len();

    document.replace_records(rewritten);
    document.report_mut().push(stage.report_note());
    debug!(
        stage = stage.name(),
        records_before, records_after, "Stage applied."
    );
    Ok(StageOutcome {
        stage,
        records_before,
        records_after,
    })
}

/// Rewrites, in place, every record that carries residue and atom columns.
///
/// `END` records never do; `TER` records are included only when `include_terminators` is set.
pub(crate) fn rewrite_records(
    mut records: Vec<Record>,
    include_terminators: bool,
    mut rewrite: impl FnMut(&mut Record) -> Result<(), RecordError>,
) -> Result<Vec<Record>, RecordError> {
    for record in records.iter_mut() {
        let eligible = match record.kind() {
            RecordKind::Atom | RecordKind::HetAtom => true,
            RecordKind::ChainTerminator => include_terminators,
            RecordKind::EndOfStructure => false,
        };
        if eligible {
            rewrite(record)?;
        }
    }
    Ok(records)
}
