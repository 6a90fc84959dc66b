//! Tests for sharded output files.

use std::fs;

use epi_model::JoinedRecord;
use epi_output::{OutputError, OutputSpec, format_record, read_output, shard_path, write_output};

fn record(state: &str, year: &str, month: &str, rainfall: &str, cases: &str) -> JoinedRecord {
    JoinedRecord {
        state: state.to_string(),
        year: year.to_string(),
        month: month.to_string(),
        rainfall: rainfall.to_string(),
        case_count: cases.to_string(),
    }
}

fn sample() -> Vec<JoinedRecord> {
    vec![
        record("RS", "2015", "01", "5.5", "10.0"),
        record("SP", "2014", "03", "0.0", "0.0"),
        record("MG", "2016", "12", "120.3", "4.0"),
    ]
}

#[test]
fn shard_names_follow_numbering_scheme() {
    let spec = OutputSpec::new("out/resultado").with_shards(3);
    assert_eq!(
        shard_path(&spec, 1),
        std::path::PathBuf::from("out/resultado-00001-of-00003.csv")
    );
}

#[test]
fn single_shard_has_header_and_every_line() {
    let dir = tempfile::tempdir().expect("temp dir");
    let spec = OutputSpec::new(dir.path().join("resultado"));
    let lines: Vec<String> = sample().iter().map(format_record).collect();

    let files = write_output(&spec, &lines).expect("write output");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].records, 3);
    assert!(files[0].path.ends_with("resultado-00000-of-00001.csv"));

    let contents = fs::read_to_string(&files[0].path).unwrap();
    insta::assert_snapshot!(contents.trim_end(), @r"
    UF; ANO; MES; CHUVA; DENGUE
    RS;2015;01;5.5;10.0
    SP;2014;03;0.0;0.0
    MG;2016;12;120.3;4.0
    ");
}

#[test]
fn lines_are_spread_over_shards() {
    let dir = tempfile::tempdir().expect("temp dir");
    let spec = OutputSpec::new(dir.path().join("nested").join("resultado"))
        .with_suffix(".txt")
        .with_shards(2);
    let lines: Vec<String> = sample().iter().map(format_record).collect();

    let files = write_output(&spec, &lines).expect("write output");
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].records, 2);
    assert_eq!(files[1].records, 1);
    assert!(files[1].path.ends_with("resultado-00001-of-00002.txt"));

    let mut read_back = Vec::new();
    for file in &files {
        read_back.extend(read_output(&file.path).expect("read shard"));
    }
    read_back.sort_by(|a, b| a.state.cmp(&b.state));
    let mut expected = sample();
    expected.sort_by(|a, b| a.state.cmp(&b.state));
    assert_eq!(read_back, expected);
}

#[test]
fn empty_output_still_writes_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let spec = OutputSpec::new(dir.path().join("resultado"));
    let files = write_output(&spec, &[]).expect("write output");
    let contents = fs::read_to_string(&files[0].path).unwrap();
    assert_eq!(contents, "UF; ANO; MES; CHUVA; DENGUE\n");
    assert!(read_output(&files[0].path).unwrap().is_empty());
}

#[test]
fn zero_shards_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let spec = OutputSpec::new(dir.path().join("resultado")).with_shards(0);
    assert!(matches!(
        write_output(&spec, &[]),
        Err(OutputError::InvalidShardCount)
    ));
}

#[test]
fn read_rejects_foreign_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("other.csv");
    fs::write(&path, "a;b;c;d;e\nRS;2015;01;5.5;10.0\n").unwrap();
    let error = read_output(&path).unwrap_err();
    assert!(matches!(error, OutputError::UnexpectedHeader { ref found, .. } if found == "a;b;c;d;e"));
}

#[test]
fn read_rejects_short_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("short.csv");
    fs::write(&path, "UF; ANO; MES; CHUVA; DENGUE\nRS;2015;01\n").unwrap();
    assert!(matches!(read_output(&path), Err(OutputError::Csv { .. })));
}
