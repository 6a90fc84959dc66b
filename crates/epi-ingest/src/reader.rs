//! Line-oriented reading of the two input datasets.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use epi_model::{Dataset, RawCaseRecord, RawRainfallRecord, SourceRecord};
use tracing::debug;

use crate::error::IngestError;
use crate::parser::{parse_case_line, parse_rainfall_line};

/// Number of header lines at the top of each input file.
pub const HEADER_LINES: usize = 1;

/// A raw line with its 1-based position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

/// Reads `path` line by line, dropping the first `skip_header_lines` lines.
///
/// Blank lines are skipped and a trailing `\r` is removed from every line.
pub fn read_lines(path: &Path, skip_header_lines: usize) -> Result<Vec<SourceLine>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::io(path, source))?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| IngestError::io(path, source))?;
        if index < skip_header_lines {
            continue;
        }
        let text = line.strip_suffix('\r').unwrap_or(&line);
        if text.trim().is_empty() {
            continue;
        }
        lines.push(SourceLine {
            number: index + 1,
            text: text.to_string(),
        });
    }
    debug!(path = %path.display(), lines = lines.len(), "read input lines");
    Ok(lines)
}

fn read_records<T>(
    path: &Path,
    dataset: Dataset,
    parse: fn(&str) -> T,
) -> Result<Vec<SourceRecord<T>>, IngestError> {
    let records: Vec<SourceRecord<T>> = read_lines(path, HEADER_LINES)?
        .into_iter()
        .map(|line| SourceRecord::new(line.number, parse(&line.text)))
        .collect();
    debug!(%dataset, records = records.len(), "parsed records");
    Ok(records)
}

/// Reads and parses the `|`-delimited case dataset.
pub fn read_case_records(path: &Path) -> Result<Vec<SourceRecord<RawCaseRecord>>, IngestError> {
    read_records(path, Dataset::Cases, parse_case_line)
}

/// Reads and parses the `,`-delimited rainfall dataset.
pub fn read_rainfall_records(
    path: &Path,
) -> Result<Vec<SourceRecord<RawRainfallRecord>>, IngestError> {
    read_records(path, Dataset::Rainfall, parse_rainfall_line)
}
