//! Region-month key derivation and value normalization.
//!
//! Both datasets key their records as `<state>-<year>-<month>`, where year
//! and month are the first two `-` separated components of the record's date
//! field. Case counts without any digit count as zero; rainfall below zero is
//! clamped to zero.

use chrono::NaiveDate;
use epi_model::{
    KeyValidation, RawCaseRecord, RawRainfallRecord, RecordError, RegionMonthKey, YearMonth,
};

/// Returns true if `value` contains at least one ASCII digit anywhere.
///
/// This is a presence test, not a number format check: `"abc1"` passes.
pub fn is_numeric(value: &str) -> bool {
    value.chars().any(|ch| ch.is_ascii_digit())
}

/// Takes the first two `-` separated components of a date field.
pub fn derive_year_month(date: &str) -> Result<YearMonth, RecordError> {
    let mut parts = date.split('-');
    match (parts.next(), parts.next()) {
        (Some(year), Some(month)) => Ok(YearMonth::new(year, month)),
        _ => Err(RecordError::ShortDate {
            date: date.to_string(),
        }),
    }
}

/// Builds the `<state>-<year>-<month>` key, checking it per `validation`.
pub fn derive_case_key(
    state: &str,
    year_month: YearMonth,
    validation: KeyValidation,
) -> Result<RegionMonthKey, RecordError> {
    if state.contains('-') {
        return Err(RecordError::InvalidState {
            state: state.to_string(),
        });
    }
    if validation == KeyValidation::Strict {
        if !is_region_code(state) {
            return Err(RecordError::InvalidState {
                state: state.to_string(),
            });
        }
        if !is_calendar_month(&year_month) {
            return Err(RecordError::InvalidYearMonth {
                value: year_month.to_string(),
            });
        }
    }
    Ok(RegionMonthKey::new(state, year_month))
}

fn is_region_code(state: &str) -> bool {
    state.len() == 2 && state.chars().all(|ch| ch.is_ascii_uppercase())
}

fn is_calendar_month(year_month: &YearMonth) -> bool {
    let digits = |value: &str, len: usize| {
        value.len() == len && value.chars().all(|ch| ch.is_ascii_digit())
    };
    if !digits(&year_month.year, 4) || !digits(&year_month.month, 2) {
        return false;
    }
    match (year_month.year.parse::<i32>(), year_month.month.parse::<u32>()) {
        (Ok(year), Ok(month)) => NaiveDate::from_ymd_opt(year, month, 1).is_some(),
        _ => false,
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, RecordError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| RecordError::MalformedNumber {
            field,
            value: value.to_string(),
        })
}

/// Value a case count contributes to its key's total.
///
/// Counts without any digit contribute `0.0`. Counts with a digit that still
/// do not parse as a number are malformed.
pub fn case_contribution(case_count: &str) -> Result<f64, RecordError> {
    if is_numeric(case_count) {
        parse_number("case count", case_count)
    } else {
        Ok(0.0)
    }
}

/// Clamps negative rainfall to zero.
pub fn clamp_rainfall(millimeters: f64) -> f64 {
    if millimeters < 0.0 { 0.0 } else { millimeters }
}

/// Key and contribution of one case record.
pub fn derive_case_key_and_value(
    record: &RawCaseRecord,
    validation: KeyValidation,
) -> Result<(RegionMonthKey, f64), RecordError> {
    let year_month = derive_year_month(&record.report_date)?;
    let key = derive_case_key(&record.state, year_month, validation)?;
    let value = case_contribution(&record.case_count)?;
    Ok((key, value))
}

/// Key and clamped millimeters of one rainfall measurement.
pub fn derive_rainfall_key_and_value(
    date: &str,
    millimeters: &str,
    state: &str,
    validation: KeyValidation,
) -> Result<(RegionMonthKey, f64), RecordError> {
    let year_month = derive_year_month(date)?;
    let key = derive_case_key(state, year_month, validation)?;
    let value = clamp_rainfall(parse_number("rainfall", millimeters)?);
    Ok((key, value))
}

/// [`derive_rainfall_key_and_value`] for a parsed rainfall record.
pub fn derive_rainfall_record(
    record: &RawRainfallRecord,
    validation: KeyValidation,
) -> Result<(RegionMonthKey, f64), RecordError> {
    derive_rainfall_key_and_value(&record.date, &record.millimeters, &record.state, validation)
}
