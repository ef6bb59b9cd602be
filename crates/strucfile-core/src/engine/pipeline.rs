use super::config::PipelineConfig;
use super::error::EngineError;
use super::passes::{self, Stage, StageOutcome};
use super::progress::{Progress, ProgressReporter};
use crate::core::models::document::Document;
use crate::core::utils::vocabulary::canonical_residue_name;
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

/// An ordered set of named stages.
///
/// However the stages were chosen, they run in [`Stage`] declaration order, which places every
/// pass after the passes it depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    stages: BTreeSet<Stage>,
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> Self {
        Self::from_stages(config.stages())
    }

    pub fn from_stages(stages: impl IntoIterator<Item = Stage>) -> Self {
        Self {
            stages: stages.into_iter().collect(),
        }
    }

    /// The stages in the order [`run`](Self::run) applies them.
    pub fn stages(&self) -> Vec<Stage> {
        self.stages.iter().copied().collect()
    }

    /// Applies every stage to the document in order.
    ///
    /// Stops at the first failing stage; stages before it stay applied and the failing stage
    /// leaves the document as it found it.
    #[instrument(skip_all, name = "pipeline")]
    pub fn run(
        &self,
        document: &mut Document,
        reporter: &ProgressReporter,
    ) -> Result<Vec<StageOutcome>, EngineError> {
        self.warn_on_missing_prerequisites(document);

        let mut outcomes = Vec::with_capacity(self.stages.len());
        for &stage in &self.stages {
            reporter.report(Progress::StageStart { stage });
            info!(stage = stage.name(), "Running stage.");

            let outcome = passes::apply(document, stage)?;

            reporter.report(Progress::StageFinish {
                stage,
                records_before: outcome.records_before,
                records_after: outcome.records_after,
            });
            info!(
                stage = stage.name(),
                removed = outcome.removed(),
                "Stage finished."
            );
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    fn warn_on_missing_prerequisites(&self, document: &Document) {
        let fixes_oxygen = self.stages.contains(&Stage::FixPyrimidineOxygen);
        let canonicalizes = self.stages.contains(&Stage::CanonicalizeResidueNames);
        if !fixes_oxygen || canonicalizes {
            return;
        }
        let legacy: Vec<&str> = document
            .residue_names()
            .iter()
            .map(String::as_str)
            .filter(|name| canonical_residue_name(name).is_some())
            .collect();
        if !legacy.is_empty() {
            warn!(
                "The pyrimidine oxygen fix only matches canonical residue names; {:?} will be skipped unless residue names are canonicalized.",
                legacy
            );
        }
    }
}
