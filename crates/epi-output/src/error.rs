use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when writing or re-reading output files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Filesystem failure.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A shard could not be parsed back.
    #[error("failed to read output {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A shard does not start with the expected header line.
    #[error("unexpected header in {path}: '{found}'")]
    UnexpectedHeader { path: PathBuf, found: String },

    /// Output needs at least one shard.
    #[error("shard count must be at least 1")]
    InvalidShardCount,
}

impl OutputError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
