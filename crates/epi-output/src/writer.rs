//! Sharded output files.
//!
//! Formatted lines are spread round-robin over `shards` files named
//! `<prefix>-00000-of-00002.csv`, `<prefix>-00001-of-00002.csv`, ...
//! Every shard starts with [`HEADER`] and ends each line with `\n`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use epi_model::JoinedRecord;
use tracing::{debug, info};

use crate::error::OutputError;
use crate::format::{HEADER, RECORD_DELIMITER, format_fields};

/// Where and how output is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    /// Path prefix shared by every shard.
    pub prefix: PathBuf,
    /// Appended after the shard numbering, usually `.csv`.
    pub suffix: String,
    /// Number of files to spread records over; at least 1.
    pub shards: usize,
}

impl OutputSpec {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: ".csv".to_string(),
            shards: 1,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }
}

/// A written shard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub records: usize,
}

/// Path of shard `index` out of `spec.shards`.
pub fn shard_path(spec: &OutputSpec, index: usize) -> PathBuf {
    let mut name = spec.prefix.clone().into_os_string();
    name.push(format!("-{index:05}-of-{:05}{}", spec.shards, spec.suffix));
    PathBuf::from(name)
}

/// Writes `lines` to the shards described by `spec`.
pub fn write_output(spec: &OutputSpec, lines: &[String]) -> Result<Vec<OutputFile>, OutputError> {
    if spec.shards == 0 {
        return Err(OutputError::InvalidShardCount);
    }
    if let Some(parent) = spec.prefix.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::io(parent, source))?;
    }
    let mut files = Vec::with_capacity(spec.shards);
    for index in 0..spec.shards {
        let path = shard_path(spec, index);
        let shard_lines = lines.iter().skip(index).step_by(spec.shards);
        let records = write_shard(&path, shard_lines)?;
        debug!(path = %path.display(), records, "wrote shard");
        files.push(OutputFile { path, records });
    }
    info!(
        files = files.len(),
        records = lines.len(),
        prefix = %spec.prefix.display(),
        "output written"
    );
    Ok(files)
}

fn write_shard<'a>(
    path: &Path,
    lines: impl Iterator<Item = &'a String>,
) -> Result<usize, OutputError> {
    let file = File::create(path).map_err(|source| OutputError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    let mut count = 0usize;
    writeln!(writer, "{HEADER}").map_err(|source| OutputError::io(path, source))?;
    for line in lines {
        writeln!(writer, "{line}").map_err(|source| OutputError::io(path, source))?;
        count += 1;
    }
    writer.flush().map_err(|source| OutputError::io(path, source))?;
    Ok(count)
}

/// Reads a shard back into joined records, checking its header.
pub fn read_output(path: &Path) -> Result<Vec<JoinedRecord>, OutputError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(RECORD_DELIMITER.as_bytes()[0])
        .has_headers(true)
        .quoting(false)
        .from_path(path)
        .map_err(|source| OutputError::csv(path, source))?;
    let header = reader
        .headers()
        .map_err(|source| OutputError::csv(path, source))?;
    let found = format_fields(&header.iter().collect::<Vec<_>>(), RECORD_DELIMITER);
    if found != HEADER {
        return Err(OutputError::UnexpectedHeader {
            path: path.to_path_buf(),
            found,
        });
    }
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| OutputError::csv(path, source))?;
        records.push(JoinedRecord {
            state: row[0].to_string(),
            year: row[1].to_string(),
            month: row[2].to_string(),
            rainfall: row[3].to_string(),
            case_count: row[4].to_string(),
        });
    }
    Ok(records)
}
