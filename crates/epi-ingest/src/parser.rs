//! Fixed-schema parsing of delimited lines.
//!
//! Lines are split with plain delimiter semantics: no quoting, no escaping,
//! no trimming. Short lines leave trailing fields empty and long lines drop
//! the extras; nothing here fails.

use std::collections::BTreeMap;

use epi_model::{RawCaseRecord, RawRainfallRecord};

/// Delimiter of the case dataset.
pub const CASE_DELIMITER: char = '|';

/// Delimiter of the rainfall dataset.
pub const RAINFALL_DELIMITER: char = ',';

/// Column names of the case dataset, in file order.
pub const CASE_FIELDS: [&str; 9] = [
    "id",
    "report_date",
    "case_count",
    "region_code",
    "city",
    "state",
    "postal_code",
    "latitude",
    "longitude",
];

/// Column names of the rainfall dataset, in file order.
pub const RAINFALL_FIELDS: [&str; 3] = ["date", "millimeters", "state"];

/// Splits a line on `delimiter`. An empty line yields a single empty field.
pub fn split(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(str::to_string).collect()
}

/// Pairs values with field names by position.
///
/// Names without a value are absent from the result; values without a name
/// are discarded.
pub fn zip_to_fields<S: AsRef<str>>(
    values: &[String],
    field_names: &[S],
) -> BTreeMap<String, String> {
    field_names
        .iter()
        .zip(values)
        .map(|(name, value)| (name.as_ref().to_string(), value.clone()))
        .collect()
}

fn take(fields: &mut BTreeMap<String, String>, name: &str) -> String {
    fields.remove(name).unwrap_or_default()
}

/// Parses one line of the case dataset.
pub fn parse_case_line(line: &str) -> RawCaseRecord {
    let values = split(line, CASE_DELIMITER);
    let mut fields = zip_to_fields(&values, &CASE_FIELDS);
    RawCaseRecord {
        id: take(&mut fields, "id"),
        report_date: take(&mut fields, "report_date"),
        case_count: take(&mut fields, "case_count"),
        region_code: take(&mut fields, "region_code"),
        city: take(&mut fields, "city"),
        state: take(&mut fields, "state"),
        postal_code: take(&mut fields, "postal_code"),
        latitude: take(&mut fields, "latitude"),
        longitude: take(&mut fields, "longitude"),
    }
}

/// Parses one line of the rainfall dataset.
pub fn parse_rainfall_line(line: &str) -> RawRainfallRecord {
    let values = split(line, RAINFALL_DELIMITER);
    let mut fields = zip_to_fields(&values, &RAINFALL_FIELDS);
    RawRainfallRecord {
        date: take(&mut fields, "date"),
        millimeters: take(&mut fields, "millimeters"),
        state: take(&mut fields, "state"),
    }
}
