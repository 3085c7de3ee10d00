//! Command entry points wired to the CLI arguments.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use attr_report::{profile_directory, write_data_dictionary, write_profile_csv};

use crate::cli::{DictionaryArgs, ProfileArgs, ReportArgs};
use crate::pipeline::{self, OutputConfig};
use crate::types::ReportResult;

/// Run the full join-and-validate pipeline.
pub fn run_report(args: &ReportArgs) -> Result<ReportResult> {
    let data_dir = &args.data_dir;
    let report_span = info_span!("report", data_dir = %data_dir.display());
    let _report_guard = report_span.enter();
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| data_dir.join("output"));

    let mut tables = pipeline::ingest(data_dir)?;
    pipeline::coerce(&mut tables)?;
    let mut enriched = pipeline::enrich_referrals(&tables)?;
    let counts = pipeline::validate(&mut enriched)?;
    let outputs = pipeline::output(
        &enriched,
        &tables,
        &counts,
        &OutputConfig {
            output_dir: &output_dir,
            dry_run: args.dry_run,
            write_summary: !args.no_summary_json,
        },
    )?;

    Ok(ReportResult {
        data_dir: data_dir.clone(),
        output_dir,
        dry_run: args.dry_run,
        report_path: outputs.report_path,
        summary_path: outputs.summary_path,
        inputs: tables.inputs,
        output_rows: outputs.output_rows,
        counts,
    })
}

/// Profile every CSV file in the data directory.
pub fn run_profile(args: &ProfileArgs) -> Result<PathBuf> {
    let profile_span = info_span!("profile", data_dir = %args.data_dir.display());
    let _profile_guard = profile_span.enter();
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.data_dir.join("docs"));

    let profiles = profile_directory(&args.data_dir).context("profile data directory")?;
    let path = write_profile_csv(&output_dir, &profiles).context("write profile artifact")?;
    info!(
        columns = profiles.len(),
        path = %path.display(),
        "profile complete"
    );
    Ok(path)
}

/// Write the static report schema dictionary.
pub fn run_dictionary(args: &DictionaryArgs) -> Result<PathBuf> {
    let path = write_data_dictionary(&args.output_dir).context("write data dictionary")?;
    info!(path = %path.display(), "dictionary written");
    Ok(path)
}
