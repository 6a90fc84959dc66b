//! Tests for per-key aggregation of both datasets.

use epi_ingest::{parse_case_line, parse_rainfall_line};
use epi_model::{
    Dataset, MalformedRecordPolicy, PipelineError, PipelineOptions, RawCaseRecord,
    RawRainfallRecord, RecordError, RegionMonthKey, SourceRecord,
};
use epi_transform::{aggregate_cases, aggregate_rainfall};
use proptest::prelude::*;

fn cases(lines: &[&str]) -> Vec<SourceRecord<RawCaseRecord>> {
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| SourceRecord::new(index + 2, parse_case_line(line)))
        .collect()
}

fn rainfall(lines: &[&str]) -> Vec<SourceRecord<RawRainfallRecord>> {
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| SourceRecord::new(index + 2, parse_rainfall_line(line)))
        .collect()
}

fn key(text: &str) -> RegionMonthKey {
    text.parse().unwrap()
}

#[test]
fn sums_case_counts_per_region_month() {
    let records = cases(&[
        "1|2015-01-15|10|3550308|City|RS|00000|-30.0|-51.0",
        "2|2015-01-22|4|3550308|City|RS|00000|-30.0|-51.0",
        "3|2015-02-01|1|3550308|City|RS|00000|-30.0|-51.0",
        "4|2015-01-15|2|3550308|City|SP|00000|-30.0|-51.0",
    ]);
    let outcome = aggregate_cases(&records, &PipelineOptions::default()).unwrap();
    assert_eq!(outcome.records_seen, 4);
    assert_eq!(outcome.records_rejected, 0);
    assert_eq!(outcome.totals.len(), 3);
    assert_eq!(outcome.totals[&key("RS-2015-01")], 14.0);
    assert_eq!(outcome.totals[&key("RS-2015-02")], 1.0);
    assert_eq!(outcome.totals[&key("SP-2015-01")], 2.0);
}

#[test]
fn non_numeric_counts_keep_their_key() {
    let records = cases(&["1|2014-03-02||3550308|City|SP|00000|-23.0|-46.0"]);
    let outcome = aggregate_cases(&records, &PipelineOptions::default()).unwrap();
    assert_eq!(outcome.totals[&key("SP-2014-03")], 0.0);
}

#[test]
fn case_totals_are_not_rounded() {
    let records = cases(&[
        "1|2015-01-15|1.25|3550308|City|RS|00000|-30.0|-51.0",
        "2|2015-01-16|2|3550308|City|RS|00000|-30.0|-51.0",
    ]);
    let outcome = aggregate_cases(&records, &PipelineOptions::default()).unwrap();
    assert_eq!(outcome.totals[&key("RS-2015-01")], 3.25);
}

#[test]
fn rainfall_total_rounded_after_summing() {
    // Rounding each record first would give 0.0 + 0.0 + 0.0 = 0.0.
    let records = rainfall(&["2015-01-01,0.04,RS", "2015-01-02,0.04,RS", "2015-01-03,0.04,RS"]);
    let outcome = aggregate_rainfall(&records, &PipelineOptions::default()).unwrap();
    assert_eq!(outcome.totals[&key("RS-2015-01")], 0.1);
}

#[test]
fn rainfall_rounds_to_one_decimal() {
    let records = rainfall(&["2015-01-01,1.24,RS", "2015-01-02,2.0,RS", "2015-01-03,-7.5,RS"]);
    let outcome = aggregate_rainfall(&records, &PipelineOptions::default()).unwrap();
    assert_eq!(outcome.totals[&key("RS-2015-01")], 3.2);
}

#[test]
fn malformed_record_fails_run_by_default() {
    let records = rainfall(&["2015-01-01,1.0,RS", "20150102,2.0,RS"]);
    let error = aggregate_rainfall(&records, &PipelineOptions::default()).unwrap_err();
    let PipelineError::MalformedRecord {
        dataset,
        line,
        source,
    } = error;
    assert_eq!(dataset, Dataset::Rainfall);
    assert_eq!(line, 3);
    assert_eq!(
        source,
        RecordError::ShortDate {
            date: "20150102".to_string()
        }
    );
}

#[test]
fn malformed_records_skipped_when_configured() {
    let records = cases(&[
        "1|2015-01-15|10|3550308|City|RS|00000|-30.0|-51.0",
        "2|2015-01-15|abc1|3550308|City|RS|00000|-30.0|-51.0",
        "3|2015-01-15|5|3550308|City|RSX|00000|-30.0|-51.0",
    ]);
    let options = PipelineOptions::default().with_malformed_records(MalformedRecordPolicy::Skip);
    let outcome = aggregate_cases(&records, &options).unwrap();
    assert_eq!(outcome.records_seen, 3);
    assert_eq!(outcome.records_rejected, 2);
    assert_eq!(outcome.totals.len(), 1);
    assert_eq!(outcome.totals[&key("RS-2015-01")], 10.0);
}

#[test]
fn lenient_keys_accept_long_region_codes() {
    let records = cases(&["1|2015-01-15|5|3550308|City|RSX|00000|-30.0|-51.0"]);
    let outcome = aggregate_cases(&records, &PipelineOptions::lenient()).unwrap();
    assert_eq!(outcome.totals[&key("RSX-2015-01")], 5.0);
}

#[test]
fn empty_input_has_no_keys() {
    let outcome = aggregate_cases(&[], &PipelineOptions::default()).unwrap();
    assert!(outcome.totals.is_empty());
    assert_eq!(outcome.records_seen, 0);
}

const STATES: [&str; 3] = ["RS", "SP", "MG"];
const MONTHS: [&str; 3] = ["01", "02", "12"];

type Row = (usize, usize, i32);

fn rows_and_permutation() -> impl Strategy<Value = (Vec<Row>, Vec<Row>)> {
    prop::collection::vec((0..STATES.len(), 0..MONTHS.len(), -500i32..5000), 0..40).prop_flat_map(
        |rows| {
            let shuffled = Just(rows.clone()).prop_shuffle();
            (Just(rows), shuffled)
        },
    )
}

fn case_records(rows: &[Row]) -> Vec<SourceRecord<RawCaseRecord>> {
    rows.iter()
        .enumerate()
        .map(|(index, (state, month, tenths))| {
            let line = format!(
                "{index}|2015-{}-10|{:.1}|0|City|{}|0|0|0",
                MONTHS[*month],
                f64::from(*tenths) / 10.0,
                STATES[*state]
            );
            SourceRecord::new(index + 2, parse_case_line(&line))
        })
        .collect()
}

fn rainfall_records(rows: &[Row]) -> Vec<SourceRecord<RawRainfallRecord>> {
    rows.iter()
        .enumerate()
        .map(|(index, (state, month, tenths))| {
            let line = format!(
                "2015-{}-10,{:.1},{}",
                MONTHS[*month],
                f64::from(*tenths) / 10.0,
                STATES[*state]
            );
            SourceRecord::new(index + 2, parse_rainfall_line(&line))
        })
        .collect()
}

proptest! {
    #[test]
    fn case_totals_ignore_record_order((rows, shuffled) in rows_and_permutation()) {
        let options = PipelineOptions::default();
        let original = aggregate_cases(&case_records(&rows), &options).unwrap();
        let permuted = aggregate_cases(&case_records(&shuffled), &options).unwrap();
        prop_assert_eq!(original.totals, permuted.totals);
    }

    #[test]
    fn rainfall_totals_ignore_record_order((rows, shuffled) in rows_and_permutation()) {
        let options = PipelineOptions::default();
        let original = aggregate_rainfall(&rainfall_records(&rows), &options).unwrap();
        let permuted = aggregate_rainfall(&rainfall_records(&shuffled), &options).unwrap();
        prop_assert_eq!(original.totals, permuted.totals);
    }

    #[test]
    fn rainfall_totals_have_one_decimal((rows, _) in rows_and_permutation()) {
        let outcome = aggregate_rainfall(&rainfall_records(&rows), &PipelineOptions::default()).unwrap();
        for total in outcome.totals.values() {
            prop_assert!(*total >= 0.0);
            let text = format!("{total:?}");
            let decimals = text.split('.').nth(1).map_or(0, str::len);
            prop_assert!(decimals <= 1, "{} has more than one decimal", text);
        }
    }
}
