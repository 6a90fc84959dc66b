//! Per-key aggregation of the case and rainfall datasets.
//!
//! Each record is keyed and normalized on its own, then values sharing a key
//! are summed. Case totals are left as summed; rainfall totals are rounded
//! to one decimal place after summation.

use std::collections::BTreeMap;
use std::time::Instant;

use epi_model::{
    Dataset, MalformedRecordPolicy, PipelineError, PipelineOptions, RawCaseRecord,
    RawRainfallRecord, RecordError, RegionMonthKey, Result, SourceRecord,
};
use tracing::{info, info_span, warn};

use crate::keys::{derive_case_key_and_value, derive_rainfall_record};
use crate::operators::{combine_per_key, sum_values};

/// Totals per key plus the counts reported in the run summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateOutcome {
    pub totals: BTreeMap<RegionMonthKey, f64>,
    pub records_seen: usize,
    pub records_rejected: usize,
}

/// Rounds to one decimal place using the exact decimal value of `value`.
pub fn round_to_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

fn key_records<T, F>(
    records: &[SourceRecord<T>],
    dataset: Dataset,
    options: &PipelineOptions,
    derive: F,
) -> Result<(Vec<(RegionMonthKey, f64)>, usize)>
where
    F: Fn(&T) -> std::result::Result<(RegionMonthKey, f64), RecordError>,
{
    let mut pairs = Vec::with_capacity(records.len());
    let mut rejected = 0usize;
    for source in records {
        match derive(&source.record) {
            Ok(pair) => pairs.push(pair),
            Err(error) => match options.malformed_records {
                MalformedRecordPolicy::Fail => {
                    return Err(PipelineError::MalformedRecord {
                        dataset,
                        line: source.line,
                        source: error,
                    });
                }
                MalformedRecordPolicy::Skip => {
                    warn!(%dataset, line = source.line, %error, "skipping malformed record");
                    rejected += 1;
                }
            },
        }
    }
    Ok((pairs, rejected))
}

/// Sums case counts per region-month.
pub fn aggregate_cases(
    records: &[SourceRecord<RawCaseRecord>],
    options: &PipelineOptions,
) -> Result<AggregateOutcome> {
    let dataset = Dataset::Cases;
    let span = info_span!("aggregate", %dataset);
    let _guard = span.enter();
    let start = Instant::now();
    let validation = options.key_validation;
    let (pairs, rejected) = key_records(records, dataset, options, |record| {
        derive_case_key_and_value(record, validation)
    })?;
    let totals = combine_per_key(pairs, sum_values);
    info!(
        %dataset,
        records = records.len(),
        rejected,
        keys = totals.len(),
        duration_ms = start.elapsed().as_millis(),
        "aggregation complete"
    );
    Ok(AggregateOutcome {
        totals,
        records_seen: records.len(),
        records_rejected: rejected,
    })
}

/// Sums clamped rainfall per region-month and rounds each total.
pub fn aggregate_rainfall(
    records: &[SourceRecord<RawRainfallRecord>],
    options: &PipelineOptions,
) -> Result<AggregateOutcome> {
    let dataset = Dataset::Rainfall;
    let span = info_span!("aggregate", %dataset);
    let _guard = span.enter();
    let start = Instant::now();
    let validation = options.key_validation;
    let (pairs, rejected) = key_records(records, dataset, options, |record| {
        derive_rainfall_record(record, validation)
    })?;
    let totals = combine_per_key(pairs, |values| round_to_one_decimal(sum_values(values)));
    info!(
        %dataset,
        records = records.len(),
        rejected,
        keys = totals.len(),
        duration_ms = start.elapsed().as_millis(),
        "aggregation complete"
    );
    Ok(AggregateOutcome {
        totals,
        records_seen: records.len(),
        records_rejected: rejected,
    })
}
