//! Error kinds for the bus count pipeline.
//!
//! All three kinds are terminal: any failure aborts the run, and no output
//! is produced for a run that failed partway.

use std::path::{Path, PathBuf};

use thiserror::Error;

type Source = Box<dyn std::error::Error + Send + Sync>;

/// A failure in one of the pipeline stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input file is missing, unreadable, not valid Parquet, or a
    /// required column is absent or not binary-typed.
    #[error("failed to load registration data from {path:?}")]
    DataLoad {
        path: PathBuf,
        #[source]
        source: Source,
    },

    /// A stored text cell is not valid UTF-8.
    #[error("{column} value at row {row} is not valid UTF-8")]
    Encoding {
        column: &'static str,
        row: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The output file cannot be created or written.
    #[error("failed to write bus counts to {path:?}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: Source,
    },
}

impl PipelineError {
    pub(crate) fn data_load(path: &Path, source: impl Into<Source>) -> Self {
        PipelineError::DataLoad {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub(crate) fn output_write(path: &Path, source: impl Into<Source>) -> Self {
        PipelineError::OutputWrite {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}
