//! Machine-readable run summary artifact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::engine::ValidationCounts;

const SUMMARY_SCHEMA: &str = "referral-attribution/validation-summary";
const SUMMARY_SCHEMA_VERSION: u32 = 1;

/// Inputs to the summary artifact, gathered across the pipeline stages.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Rows per input table, keyed by table name.
    pub input_rows: BTreeMap<String, usize>,
    /// Input tables that were absent and substituted by empty frames.
    pub missing_inputs: Vec<String>,
    /// Rows written to the report.
    pub output_rows: usize,
    pub counts: ValidationCounts,
}

#[derive(Serialize)]
struct RunSummaryPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    input_rows: &'a BTreeMap<String, usize>,
    missing_inputs: &'a [String],
    output_rows: usize,
    valid: usize,
    invalid: usize,
    reasons: &'a BTreeMap<String, usize>,
}

/// Write `validation_summary.json` into the output directory.
pub fn write_validation_summary_json(output_dir: &Path, summary: &RunSummary) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let path = output_dir.join("validation_summary.json");
    let payload = RunSummaryPayload {
        schema: SUMMARY_SCHEMA,
        schema_version: SUMMARY_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        input_rows: &summary.input_rows,
        missing_inputs: &summary.missing_inputs,
        output_rows: summary.output_rows,
        valid: summary.counts.valid,
        invalid: summary.counts.invalid,
        reasons: &summary.counts.reasons,
    };
    let json = serde_json::to_string_pretty(&payload).context("serialize run summary")?;
    std::fs::write(&path, json)
        .with_context(|| format!("write run summary {}", path.display()))?;
    Ok(path)
}
