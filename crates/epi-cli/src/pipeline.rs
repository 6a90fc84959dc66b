//! Join pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: read and parse both input files
//! 2. **Aggregate**: key every record and reduce each dataset per region-month
//! 3. **Join**: co-group the totals and keep keys present in both datasets
//! 4. **Output**: format the joined records and write the shards
//! 5. **Verify** (optional): read the shards back and compare
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use epi_ingest::{read_case_records, read_rainfall_records};
use epi_model::{JoinedRecord, PipelineOptions, RawCaseRecord, RawRainfallRecord, SourceRecord};
use epi_output::{OutputFile, OutputSpec, format_record, read_output, write_output};
use epi_transform::{AggregateOutcome, JoinOutcome, aggregate_cases, aggregate_rainfall, join};

use crate::config::RunConfig;
use crate::types::{BranchSummary, OutputSummary, RunResult};

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Parsed records of both datasets.
#[derive(Debug)]
pub struct IngestResult {
    pub cases: Vec<SourceRecord<RawCaseRecord>>,
    pub rainfall: Vec<SourceRecord<RawRainfallRecord>>,
}

/// Reads both input files.
pub fn ingest(cases: &Path, rainfall: &Path) -> Result<IngestResult> {
    let cases = read_case_records(cases).context("read case dataset")?;
    let rainfall = read_rainfall_records(rainfall).context("read rainfall dataset")?;
    Ok(IngestResult { cases, rainfall })
}

// ============================================================================
// Stage 2: Aggregate
// ============================================================================

/// Per-key totals of both datasets.
#[derive(Debug)]
pub struct AggregateResult {
    pub cases: AggregateOutcome,
    pub rainfall: AggregateOutcome,
}

pub fn aggregate(ingested: &IngestResult, options: &PipelineOptions) -> Result<AggregateResult> {
    let cases = aggregate_cases(&ingested.cases, options).context("aggregate case counts")?;
    let rainfall =
        aggregate_rainfall(&ingested.rainfall, options).context("aggregate rainfall")?;
    Ok(AggregateResult { cases, rainfall })
}

// ============================================================================
// Stage 3: Join
// ============================================================================

pub fn join_totals(aggregated: &AggregateResult) -> JoinOutcome {
    join(&aggregated.rainfall.totals, &aggregated.cases.totals)
}

// ============================================================================
// Stage 4: Output
// ============================================================================

/// Formats joined records as output lines.
pub fn render(records: &[JoinedRecord]) -> Vec<String> {
    records.iter().map(format_record).collect()
}

pub fn output(spec: &OutputSpec, lines: &[String]) -> Result<Vec<OutputFile>> {
    write_output(spec, lines).with_context(|| format!("write output {}", spec.prefix.display()))
}

// ============================================================================
// Stage 5: Verify
// ============================================================================

/// Reads every shard back and checks it holds exactly `expected`.
pub fn verify(files: &[OutputFile], expected: &[JoinedRecord]) -> Result<usize> {
    let mut read_back = Vec::new();
    for file in files {
        let records = read_output(&file.path)
            .with_context(|| format!("read back {}", file.path.display()))?;
        if records.len() != file.records {
            bail!(
                "{} holds {} records, expected {}",
                file.path.display(),
                records.len(),
                file.records
            );
        }
        read_back.extend(records);
    }
    let mut expected = expected.to_vec();
    expected.sort_by(|a, b| a.fields().cmp(&b.fields()));
    read_back.sort_by(|a, b| a.fields().cmp(&b.fields()));
    if read_back != expected {
        bail!(
            "output does not match joined records ({} written, {} read back)",
            expected.len(),
            read_back.len()
        );
    }
    Ok(read_back.len())
}

/// Runs every stage for `config`.
pub fn run_pipeline(config: &RunConfig) -> Result<RunResult> {
    let run_span = info_span!(
        "run",
        cases = %config.cases.display(),
        rainfall = %config.rainfall.display()
    );
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let ingested = info_span!("ingest").in_scope(|| ingest(&config.cases, &config.rainfall))?;
    info!(
        cases = ingested.cases.len(),
        rainfall = ingested.rainfall.len(),
        "ingest complete"
    );

    let aggregated = aggregate(&ingested, &config.options)?;
    let joined = info_span!("join").in_scope(|| join_totals(&aggregated));
    let lines = render(&joined.records);

    let mut outputs = Vec::new();
    let mut verified = None;
    if config.dry_run {
        info!(records = lines.len(), "dry run, skipping output");
    } else {
        let files = info_span!("output").in_scope(|| output(&config.output, &lines))?;
        if config.verify {
            verified = Some(info_span!("verify").in_scope(|| verify(&files, &joined.records))?);
        }
        outputs = files
            .into_iter()
            .map(|file| OutputSummary {
                path: file.path,
                records: file.records,
            })
            .collect();
    }

    info!(
        joined = joined.records.len(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );

    Ok(RunResult {
        cases: branch_summary(&config.cases, &aggregated.cases),
        rainfall: branch_summary(&config.rainfall, &aggregated.rainfall),
        joined: joined.records.len(),
        unmatched_cases: joined.unmatched_cases,
        unmatched_rainfall: joined.unmatched_rainfall,
        outputs,
        dry_run: config.dry_run,
        verified,
    })
}

fn branch_summary(path: &Path, outcome: &AggregateOutcome) -> BranchSummary {
    BranchSummary {
        path: path.to_path_buf(),
        records: outcome.records_seen,
        rejected: outcome.records_rejected,
        keys: outcome.totals.len(),
    }
}
