use epi_model::JoinedRecord;

/// Separator between fields of an output record.
pub const RECORD_DELIMITER: &str = ";";

/// Header line of every output file. Its separator differs from
/// [`RECORD_DELIMITER`] and it is written as-is.
pub const HEADER: &str = "UF; ANO; MES; CHUVA; DENGUE";

/// Joins fields with `delimiter`. Nothing is quoted or escaped.
pub fn format_fields<S: AsRef<str>>(fields: &[S], delimiter: &str) -> String {
    let mut line = String::new();
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            line.push_str(delimiter);
        }
        line.push_str(field.as_ref());
    }
    line
}

/// Renders a joined record as `state;year;month;rainfall;caseCount`.
pub fn format_record(record: &JoinedRecord) -> String {
    format_fields(&record.fields(), RECORD_DELIMITER)
}
