//! Run configuration: an optional TOML file merged with command-line flags.
//!
//! ```toml
//! [input]
//! cases = "casos_dengue.txt"
//! rainfall = "chuvas.csv"
//!
//! [output]
//! prefix = "out/resultado"
//! suffix = ".csv"
//! shards = 1
//!
//! [options]
//! key_validation = "strict"      # or "lenient"
//! malformed_records = "fail"     # or "skip"
//! ```
//!
//! Relative paths in the file are resolved against the file's directory.
//! Flags given on the command line win over file values.

use std::fs;
use std::path::{Path, PathBuf};

use epi_model::{KeyValidation, MalformedRecordPolicy, PipelineOptions};
use epi_output::OutputSpec;
use serde::{Deserialize, Serialize};

/// Output prefix used when neither the file nor the flags name one.
pub const DEFAULT_OUTPUT_PREFIX: &str = "resultado";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no {name} input given (use --{name} or [input].{name})")]
    MissingInput { name: &'static str },

    #[error("shard count must be at least 1")]
    InvalidShards,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSection {
    pub cases: Option<PathBuf>,
    pub rainfall: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub prefix: Option<PathBuf>,
    pub suffix: Option<String>,
    pub shards: Option<usize>,
}

/// Contents of a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub input: InputSection,
    pub output: OutputSection,
    pub options: PipelineOptions,
}

/// Values supplied on the command line; `None` leaves the file value alone.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub cases: Option<PathBuf>,
    pub rainfall: Option<PathBuf>,
    pub prefix: Option<PathBuf>,
    pub suffix: Option<String>,
    pub shards: Option<usize>,
    pub key_validation: Option<KeyValidation>,
    pub malformed_records: Option<MalformedRecordPolicy>,
    pub dry_run: bool,
    pub verify: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub cases: PathBuf,
    pub rainfall: PathBuf,
    pub output: OutputSpec,
    pub options: PipelineOptions,
    /// Run every stage but write nothing.
    pub dry_run: bool,
    /// Re-read written shards and compare them with the joined records.
    pub verify: bool,
}

/// Loads a config file, resolving relative paths against its directory.
pub fn load_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: ConfigFile = toml::from_str(&text).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let resolve = |value: &mut Option<PathBuf>| {
        if let Some(path) = value.as_mut().filter(|p| p.is_relative()) {
            *path = base.join(&*path);
        }
    };
    resolve(&mut config.input.cases);
    resolve(&mut config.input.rainfall);
    resolve(&mut config.output.prefix);
    Ok(config)
}

impl ConfigFile {
    /// Applies command-line overrides and fills in defaults.
    pub fn resolve(self, overrides: RunOverrides) -> Result<RunConfig, ConfigError> {
        let cases = overrides
            .cases
            .or(self.input.cases)
            .ok_or(ConfigError::MissingInput { name: "cases" })?;
        let rainfall = overrides
            .rainfall
            .or(self.input.rainfall)
            .ok_or(ConfigError::MissingInput { name: "rainfall" })?;

        let prefix = overrides
            .prefix
            .or(self.output.prefix)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PREFIX));
        let mut output = OutputSpec::new(prefix);
        if let Some(suffix) = overrides.suffix.or(self.output.suffix) {
            output = output.with_suffix(suffix);
        }
        if let Some(shards) = overrides.shards.or(self.output.shards) {
            if shards == 0 {
                return Err(ConfigError::InvalidShards);
            }
            output = output.with_shards(shards);
        }

        let mut options = self.options;
        if let Some(validation) = overrides.key_validation {
            options = options.with_key_validation(validation);
        }
        if let Some(policy) = overrides.malformed_records {
            options = options.with_malformed_records(policy);
        }

        Ok(RunConfig {
            cases,
            rainfall,
            output,
            options,
            dry_run: overrides.dry_run,
            verify: overrides.verify,
        })
    }
}
