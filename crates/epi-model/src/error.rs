use thiserror::Error;

use crate::records::Dataset;

/// Problems found while turning a single raw record into a keyed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("date '{date}' has fewer than 2 '-' separated components")]
    ShortDate { date: String },

    #[error("invalid year-month '{value}'")]
    InvalidYearMonth { value: String },

    #[error("invalid region code '{state}'")]
    InvalidState { state: String },

    #[error("{field} value '{value}' is not a number")]
    MalformedNumber { field: &'static str, value: String },

    #[error("key '{key}' does not split into state, year and month")]
    KeyParts { key: String },
}

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("malformed {dataset} record at line {line}: {source}")]
    MalformedRecord {
        dataset: Dataset,
        line: usize,
        #[source]
        source: RecordError,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
