use anyhow::{Context, Result};
use tracing::debug;

use epi_cli::config::{ConfigFile, RunOverrides, load_config};
use epi_cli::pipeline::run_pipeline;
use epi_cli::summary::write_summary_json;
use epi_cli::types::RunResult;
use epi_model::{KeyValidation, MalformedRecordPolicy};
use epi_output::HEADER;

use crate::cli::RunArgs;

pub fn run_header() -> Result<()> {
    println!("{HEADER}");
    Ok(())
}

pub fn run_join(args: &RunArgs) -> Result<RunResult> {
    let file = match &args.config {
        Some(path) => load_config(path).context("load config")?,
        None => ConfigFile::default(),
    };
    let config = file.resolve(overrides_from_args(args))?;
    debug!(?config, "resolved run configuration");

    let result = run_pipeline(&config)?;
    if let Some(path) = &args.summary_json {
        write_summary_json(path, &result)?;
    }
    Ok(result)
}

fn overrides_from_args(args: &RunArgs) -> RunOverrides {
    let key_validation = if args.strict_keys {
        Some(KeyValidation::Strict)
    } else if args.lenient_keys {
        Some(KeyValidation::Lenient)
    } else {
        None
    };
    RunOverrides {
        cases: args.cases.clone(),
        rainfall: args.rainfall.clone(),
        prefix: args.output.clone(),
        suffix: args.suffix.clone(),
        shards: args.shards,
        key_validation,
        malformed_records: args.skip_malformed.then_some(MalformedRecordPolicy::Skip),
        dry_run: args.dry_run,
        verify: args.verify,
    }
}
