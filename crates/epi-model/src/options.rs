//! Configuration options for a join run.

use serde::{Deserialize, Serialize};

/// How much of a derived key is checked before it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyValidation {
    /// Only the checks needed for a key to split back into three parts.
    Lenient,
    /// Four-digit year, month `01`..`12`, and a two-letter uppercase region code.
    #[default]
    Strict,
}

/// What to do with a record whose key or value cannot be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedRecordPolicy {
    /// Abort the run on the first malformed record.
    #[default]
    Fail,
    /// Drop the record, log a warning and keep going.
    Skip,
}

/// Options controlling key derivation and malformed input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub key_validation: KeyValidation,
    pub malformed_records: MalformedRecordPolicy,
}

impl PipelineOptions {
    /// Accepts any key that still splits into three parts and skips the rest.
    pub fn lenient() -> Self {
        Self {
            key_validation: KeyValidation::Lenient,
            malformed_records: MalformedRecordPolicy::Skip,
        }
    }

    pub fn with_key_validation(mut self, validation: KeyValidation) -> Self {
        self.key_validation = validation;
        self
    }

    pub fn with_malformed_records(mut self, policy: MalformedRecordPolicy) -> Self {
        self.malformed_records = policy;
        self
    }
}
