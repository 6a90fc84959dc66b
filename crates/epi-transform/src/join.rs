//! Region-month join of the aggregated rainfall and case totals.

use std::collections::BTreeMap;

use epi_model::{JoinedRecord, RegionMonthKey};
use tracing::{debug, info};

use crate::operators::co_group;

/// Values each dataset contributed for one key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoGrouped {
    pub rainfall: Vec<f64>,
    pub cases: Vec<f64>,
}

impl CoGrouped {
    /// True when both datasets contributed. A `0.0` value counts as present.
    pub fn is_complete(&self) -> bool {
        !self.rainfall.is_empty() && !self.cases.is_empty()
    }
}

/// Result of joining the two aggregated datasets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinOutcome {
    pub records: Vec<JoinedRecord>,
    /// Keys with case totals but no rainfall.
    pub unmatched_cases: usize,
    /// Keys with rainfall but no case totals.
    pub unmatched_rainfall: usize,
}

/// Renders a value as shortest round-trip decimal text, always with a
/// fractional part (`10.0`, `5.5`).
pub fn format_decimal(value: f64) -> String {
    format!("{value:?}")
}

/// Co-groups the aggregated totals by key.
pub fn co_group_totals(
    rainfall: &BTreeMap<RegionMonthKey, f64>,
    cases: &BTreeMap<RegionMonthKey, f64>,
) -> BTreeMap<RegionMonthKey, CoGrouped> {
    co_group(
        rainfall.iter().map(|(key, value)| (key.clone(), *value)),
        cases.iter().map(|(key, value)| (key.clone(), *value)),
    )
    .into_iter()
    .map(|(key, (rainfall, cases))| (key, CoGrouped { rainfall, cases }))
    .collect()
}

/// Splits a complete group into its output record, taking the first value
/// from each side. Returns `None` for incomplete groups.
pub fn decompose(key: &RegionMonthKey, grouped: &CoGrouped) -> Option<JoinedRecord> {
    let rainfall = grouped.rainfall.first()?;
    let cases = grouped.cases.first()?;
    Some(JoinedRecord {
        state: key.state.clone(),
        year: key.year.clone(),
        month: key.month.clone(),
        rainfall: format_decimal(*rainfall),
        case_count: format_decimal(*cases),
    })
}

/// Joins rainfall and case totals, keeping only keys present in both.
pub fn join(
    rainfall: &BTreeMap<RegionMonthKey, f64>,
    cases: &BTreeMap<RegionMonthKey, f64>,
) -> JoinOutcome {
    let mut outcome = JoinOutcome::default();
    for (key, grouped) in co_group_totals(rainfall, cases) {
        if !grouped.is_complete() {
            if grouped.rainfall.is_empty() {
                outcome.unmatched_cases += 1;
            } else {
                outcome.unmatched_rainfall += 1;
            }
            debug!(%key, "dropping incomplete key");
            continue;
        }
        if let Some(record) = decompose(&key, &grouped) {
            outcome.records.push(record);
        }
    }
    info!(
        joined = outcome.records.len(),
        unmatched_cases = outcome.unmatched_cases,
        unmatched_rainfall = outcome.unmatched_rainfall,
        "join complete"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_text_keeps_fraction() {
        assert_eq!(format_decimal(10.0), "10.0");
        assert_eq!(format_decimal(5.5), "5.5");
        assert_eq!(format_decimal(0.0), "0.0");
        assert_eq!(format_decimal(1234.5), "1234.5");
    }

    #[test]
    fn zero_values_still_complete() {
        let grouped = CoGrouped {
            rainfall: vec![0.0],
            cases: vec![0.0],
        };
        assert!(grouped.is_complete());
        assert!(!CoGrouped::default().is_complete());
    }

    #[test]
    fn decompose_takes_first_value_of_each_side() {
        let key: RegionMonthKey = "RS-2015-01".parse().unwrap();
        let grouped = CoGrouped {
            rainfall: vec![5.5, 9.0],
            cases: vec![10.0, 1.0],
        };
        let record = decompose(&key, &grouped).unwrap();
        assert_eq!(record.fields(), ["RS", "2015", "01", "5.5", "10.0"]);
    }
}
