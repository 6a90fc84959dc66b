//! Tests for reading the input datasets from disk.

use std::fs;

use epi_ingest::{IngestError, read_case_records, read_lines, read_rainfall_records};

#[test]
fn skips_header_and_blank_lines() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("chuvas.csv");
    fs::write(&path, "data,mm,uf\r\n2015-01-20,5.5,RS\r\n\r\n2015-01-21,1.0,RS\n").unwrap();

    let lines = read_lines(&path, 1).expect("read lines");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].number, 2);
    assert_eq!(lines[0].text, "2015-01-20,5.5,RS");
    assert_eq!(lines[1].number, 4);
}

#[test]
fn reads_case_records_with_line_numbers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("casos_dengue.txt");
    fs::write(
        &path,
        "id|data_iniSE|casos|ibge_code|cidade|uf|cep|latitude|longitude\n\
         1|2015-01-15|10|3550308|City|RS|00000|-30.0|-51.0\n\
         2|2015-01-22||3550308|City|RS|00000|-30.0|-51.0\n",
    )
    .unwrap();

    let records = read_case_records(&path).expect("read cases");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].line, 2);
    assert_eq!(records[0].record.case_count, "10");
    assert_eq!(records[1].line, 3);
    assert_eq!(records[1].record.case_count, "");
    assert_eq!(records[1].record.state, "RS");
}

#[test]
fn reads_rainfall_records() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("chuvas.csv");
    fs::write(&path, "data,mm,uf\n2015-01-20,5.5,RS\n2014-03-01,-2.0,SP\n").unwrap();

    let records = read_rainfall_records(&path).expect("read rainfall");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].record.millimeters, "-2.0");
    assert_eq!(records[1].record.state, "SP");
}

#[test]
fn header_only_file_has_no_records() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("chuvas.csv");
    fs::write(&path, "data,mm,uf\n").unwrap();
    assert!(read_rainfall_records(&path).unwrap().is_empty());
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing.csv");
    let error = read_lines(&path, 1).unwrap_err();
    let IngestError::Io { path: reported, .. } = &error;
    assert_eq!(reported, &path);
    assert!(error.to_string().contains("missing.csv"));
}
