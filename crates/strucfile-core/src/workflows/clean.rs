use super::{WorkflowError, load};
use crate::core::analysis::AnalysisError;
use crate::core::analysis::classify::{
    self, Classification, MoleculeKind, non_canonical_nucleic_acid_names,
    non_canonical_protein_names,
};
use crate::core::io::convert::FormatConverter;
use crate::core::models::document::Document;
use crate::engine::config::PipelineConfig;
use crate::engine::passes::StageOutcome;
use crate::engine::pipeline::Pipeline;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct CleanSummary {
    pub records_in: usize,
    pub records_out: usize,
    /// `None` when the document had no residue names to classify.
    pub classification: Option<Classification>,
    pub stages: Vec<StageOutcome>,
    pub report: String,
}

/// Loads `input`, runs the configured pipeline over it and writes the result to `output`.
///
/// A mol2 input is converted through `converter` first, when one is supplied.
///
/// # Errors
///
/// Fails when the input cannot be loaded (missing, multi-model, failed conversion), when a
/// stage cannot rewrite a record, or when the output cannot be written. Nothing is written
/// unless every stage succeeded.
#[instrument(skip_all, name = "clean_workflow")]
pub fn run(
    input: &Path,
    output: &Path,
    config: &PipelineConfig,
    converter: Option<&dyn FormatConverter>,
    reporter: &ProgressReporter,
) -> Result<CleanSummary, WorkflowError> {
    info!("Loading structure file {:?}.", input);
    let mut document = load(input, converter)?;
    let records_in = document.len();

    let classification = describe(&document);

    if config.is_empty() {
        info!("No stages enabled; records are written back unchanged.");
    }
    let pipeline = Pipeline::new(config);
    reporter.report(Progress::Message(format!(
        "Running {} stage(s) over {} records",
        pipeline.stages().len(),
        records_in
    )));
    let stages = pipeline.run(&mut document, reporter)?;

    document.save(output)?;
    info!("Wrote {} records to {:?}.", document.len(), output);

    Ok(CleanSummary {
        records_in,
        records_out: document.len(),
        classification,
        stages,
        report: document.report().to_string(),
    })
}

fn describe(document: &Document) -> Option<Classification> {
    let classification = match classify::classify(document) {
        Ok(classification) => classification,
        Err(AnalysisError::EmptyDocument) => {
            warn!("No residue names found; the document cannot be classified.");
            return None;
        }
        Err(e) => {
            warn!("Classification failed: {}", e);
            return None;
        }
    };
    info!("Molecule classified as {}.", classification);

    let non_canonical = match classification.kind() {
        Some(MoleculeKind::Nucleic) => non_canonical_nucleic_acid_names(document),
        Some(MoleculeKind::Protein) => non_canonical_protein_names(document),
        None => Vec::new(),
    };
    if !non_canonical.is_empty() {
        warn!("Non-canonical residue names: {}", non_canonical.join(", "));
    }
    Some(classification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::convert::ConvertError;
    use crate::core::io::pdb::PdbError;
    use crate::core::models::record::RecordKind;
    use crate::core::models::record::fixtures::{atom, document_text, hetatm};
    use crate::engine::passes::Stage;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_input(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn water_hydrogen_and_numbering_are_cleaned_end_to_end() {
        let dir = tempdir().unwrap();
        let input = write_input(
            dir.path(),
            "in.pdb",
            &document_text(&[
                atom(10, "P", "G", 1, "P"),
                atom(11, "H1'", "G", 1, "H"),
                atom(12, "P", "C", 2, "P"),
                hetatm(13, "O", "HOH", 3, "O"),
            ]),
        );
        let output = dir.path().join("out.pdb");
        let config = PipelineConfig::builder()
            .remove_water(true)
            .remove_hydrogens(true)
            .renumber_atoms(true)
            .build();

        let summary = run(&input, &output, &config, None, &ProgressReporter::new()).unwrap();

        assert_eq!(summary.records_in, 4);
        assert_eq!(summary.records_out, 2);
        let written = Document::load(&output).unwrap();
        let kinds: Vec<_> = written.records().iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![RecordKind::Atom, RecordKind::Atom, RecordKind::EndOfStructure]
        );
        let serials: Vec<_> = written.coordinate_records().map(|r| r.serial()).collect();
        assert_eq!(serials, vec![Some(1), Some(2)]);
        let names: Vec<_> = written.coordinate_records().map(|r| r.residue_name()).collect();
        assert_eq!(names, vec!["G", "C"]);
    }

    #[test]
    fn summary_lists_stages_in_run_order_and_classifies() {
        let dir = tempdir().unwrap();
        let input = write_input(
            dir.path(),
            "in.pdb",
            &document_text(&[atom(1, "P", "RG5", 1, "P"), atom(2, "P", "U", 2, "P")]),
        );
        let output = dir.path().join("out.pdb");

        let summary = run(
            &input,
            &output,
            &PipelineConfig::rna_cleanup(),
            None,
            &ProgressReporter::new(),
        )
        .unwrap();

        let ran: Vec<_> = summary.stages.iter().map(|s| s.stage).collect();
        assert_eq!(ran.first(), Some(&Stage::CanonicalizeResidueNames));
        assert_eq!(ran.last(), Some(&Stage::RenumberAtoms));
        assert_eq!(
            summary.classification.and_then(|c| c.kind()),
            Some(MoleculeKind::Nucleic)
        );
        assert!(summary.report.contains("This is amber-like format"));
        assert!(fs::read_to_string(&output).unwrap().ends_with("END\n"));
    }

    #[test]
    fn multi_model_input_is_rejected_and_nothing_is_written() {
        let dir = tempdir().unwrap();
        let input = write_input(
            dir.path(),
            "nmr.pdb",
            &format!(
                "MODEL        1\n{}\nENDMDL\nMODEL        2\n{}\nENDMDL\nEND\n",
                atom(1, "P", "G", 1, "P"),
                atom(1, "P", "G", 1, "P")
            ),
        );
        let output = dir.path().join("out.pdb");

        let err = run(
            &input,
            &output,
            &PipelineConfig::rna_cleanup(),
            None,
            &ProgressReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::Pdb(PdbError::MultiFrame { line: 4 })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn no_stages_round_trips_the_records() {
        let dir = tempdir().unwrap();
        let text = document_text(&[atom(1, "P", "G", 1, "P"), hetatm(2, "MG", "MG", 2, "MG")]);
        let input = write_input(dir.path(), "in.pdb", &text);
        let output = dir.path().join("out.pdb");

        run(&input, &output, &PipelineConfig::none(), None, &ProgressReporter::new()).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), format!("{text}END\n"));
    }

    struct FailingConverter;

    impl FormatConverter for FailingConverter {
        fn convert(&self, _source: &Path, _destination: &Path) -> Result<PathBuf, ConvertError> {
            Err(ConvertError::Failed {
                status: "exit status: 1".into(),
                stderr: "0 molecules converted".into(),
            })
        }
    }

    #[test]
    fn failing_conversion_surfaces_as_an_error() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "lig.mol2", "@<TRIPOS>MOLECULE\nlig\n");
        let output = dir.path().join("out.pdb");

        let err = run(
            &input,
            &output,
            &PipelineConfig::rna_cleanup(),
            Some(&FailingConverter),
            &ProgressReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::Pdb(PdbError::Conversion(ConvertError::Failed { .. }))
        ));
        assert!(!output.exists());
    }

    struct WritingConverter(String);

    impl FormatConverter for WritingConverter {
        fn convert(&self, _source: &Path, destination: &Path) -> Result<PathBuf, ConvertError> {
            fs::write(destination, &self.0)?;
            Ok(destination.to_path_buf())
        }
    }

    #[test]
    fn conversion_leaves_an_existing_sibling_pdb_untouched() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "lig.mol2", "@<TRIPOS>MOLECULE\nlig\n");
        let sibling = write_input(dir.path(), "lig.pdb", "USER DATA THAT MUST SURVIVE\n");
        let output = dir.path().join("out.pdb");
        let converter = WritingConverter(document_text(&[atom(1, "P", "G", 1, "P")]));

        let summary = run(
            &input,
            &output,
            &PipelineConfig::none(),
            Some(&converter),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(summary.records_out, 1);
        assert_eq!(
            fs::read_to_string(&sibling).unwrap(),
            "USER DATA THAT MUST SURVIVE\n"
        );
        assert!(fs::read_to_string(&output).unwrap().starts_with("ATOM      1  P     G A   1"));
    }

    #[test]
    fn missing_input_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("absent.pdb");

        let err = run(
            &input,
            &dir.path().join("out.pdb"),
            &PipelineConfig::none(),
            None,
            &ProgressReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::Pdb(PdbError::MissingFile { path, .. }) if path == input
        ));
    }
}
