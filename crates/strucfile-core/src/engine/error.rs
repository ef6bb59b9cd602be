use super::passes::Stage;
use crate::core::models::record::RecordError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Stage '{stage}' failed: {source}")]
    Record {
        stage: Stage,
        #[source]
        source: RecordError,
    },

    #[error("Unknown stage name: '{0}'")]
    UnknownStage(String),
}
