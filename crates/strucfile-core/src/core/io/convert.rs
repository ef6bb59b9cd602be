use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to launch converter '{program}': {source}", program = program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Converter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("Converter reported success but produced no file at '{path}'", path = path.display())]
    MissingOutput { path: PathBuf },
    #[error("I/O error during conversion: {0}")]
    Io(#[from] io::Error),
}

/// Converts an alternate-dialect structure file into the primary fixed-column dialect.
///
/// The library treats conversion as a black box: a source path goes in, the path of an
/// equivalent structure file comes out, and the caller reloads it.
pub trait FormatConverter {
    fn convert(&self, source: &Path, destination: &Path) -> Result<PathBuf, ConvertError>;
}

/// Converts mol2 files by running Open Babel's `obabel` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObabelConverter {
    program: PathBuf,
}

impl ObabelConverter {
    pub const DEFAULT_PROGRAM: &'static str = "obabel";

    pub fn new() -> Self {
        Self::with_program(Self::DEFAULT_PROGRAM)
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for ObabelConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatConverter for ObabelConverter {
    fn convert(&self, source: &Path, destination: &Path) -> Result<PathBuf, ConvertError> {
        debug!(
            "Running {:?} -imol2 {:?} -opdb -O {:?}",
            self.program, source, destination
        );
        let output = Command::new(&self.program)
            .arg("-imol2")
            .arg(source)
            .arg("-opdb")
            .arg("-O")
            .arg(destination)
            .output()
            .map_err(|e| ConvertError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if !destination.exists() {
            return Err(ConvertError::MissingOutput {
                path: destination.to_path_buf(),
            });
        }
        info!("Converted {:?} to {:?}.", source, destination);
        Ok(destination.to_path_buf())
    }
}

/// The file name a converted copy of `source` is written under: its stem with a `.pdb`
/// extension.
pub fn converted_file_name(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "converted".to_string());
    PathBuf::from(format!("{stem}.pdb"))
}
