use std::path::PathBuf;

use serde::Serialize;

/// Counts for one input dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchSummary {
    pub path: PathBuf,
    pub records: usize,
    pub rejected: usize,
    pub keys: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSummary {
    pub path: PathBuf,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub cases: BranchSummary,
    pub rainfall: BranchSummary,
    pub joined: usize,
    pub unmatched_cases: usize,
    pub unmatched_rainfall: usize,
    pub outputs: Vec<OutputSummary>,
    pub dry_run: bool,
    /// Records read back from the written shards, when verification ran.
    pub verified: Option<usize>,
}
