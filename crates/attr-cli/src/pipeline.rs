//! Attribution pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Load the fixed input tables (referrals fatal, secondaries
//!    lenient)
//! 2. **Coerce**: Force identifier columns to a nullable numeric type
//! 3. **Enrich**: Four left joins onto the referral table
//! 4. **Validate**: Run the ordered business rules
//! 5. **Output**: Project the report columns and write the artifacts
//!
//! Each stage takes the output of the previous stage and returns typed
//! results.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use attr_ingest::{load_referrals, load_secondary};
use attr_model::{REFERRALS, REWARDS, TRANSACTIONS, USER_LOGS};
use attr_report::{project_report, write_report_csv};
use attr_transform::{EnrichInput, coerce_id_columns, enrich};
use attr_validate::{
    RunSummary, ValidationCounts, ValidationEngine, write_validation_summary_json,
};

use crate::types::TableCount;

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Result of the ingest stage.
#[derive(Debug)]
pub struct IngestResult {
    pub referrals: DataFrame,
    pub user_logs: DataFrame,
    pub transactions: DataFrame,
    pub rewards: DataFrame,
    /// Row counts per table, in pipeline order.
    pub inputs: Vec<TableCount>,
}

impl IngestResult {
    /// Names of the tables substituted by empty frames.
    pub fn missing_inputs(&self) -> Vec<String> {
        self.inputs
            .iter()
            .filter(|table| !table.present)
            .map(|table| table.name.to_string())
            .collect()
    }

    fn input_rows(&self) -> BTreeMap<String, usize> {
        self.inputs
            .iter()
            .map(|table| (table.name.to_string(), table.rows))
            .collect()
    }
}

/// Load the four input tables. The referral table is the fatal
/// precondition; each secondary table degrades to an empty frame when
/// absent.
pub fn ingest(data_dir: &Path) -> Result<IngestResult> {
    let ingest_span = info_span!("ingest", data_dir = %data_dir.display());
    let _ingest_guard = ingest_span.enter();
    let ingest_start = Instant::now();

    let referrals = load_referrals(data_dir, &REFERRALS).context("load referral table")?;
    let mut inputs = vec![TableCount {
        name: REFERRALS.name,
        file_name: REFERRALS.file_name,
        rows: referrals.height(),
        present: true,
    }];

    let user_logs = load_secondary(data_dir, &USER_LOGS).context("load user log table")?;
    let transactions =
        load_secondary(data_dir, &TRANSACTIONS).context("load transaction table")?;
    let rewards = load_secondary(data_dir, &REWARDS).context("load reward table")?;
    for (spec, loaded) in [
        (USER_LOGS, &user_logs),
        (TRANSACTIONS, &transactions),
        (REWARDS, &rewards),
    ] {
        inputs.push(TableCount {
            name: spec.name,
            file_name: spec.file_name,
            rows: loaded.data.height(),
            present: loaded.present,
        });
    }
    let (user_logs, transactions, rewards) = (user_logs.data, transactions.data, rewards.data);

    info!(
        referral_rows = referrals.height(),
        user_log_rows = user_logs.height(),
        transaction_rows = transactions.height(),
        reward_rows = rewards.height(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    Ok(IngestResult {
        referrals,
        user_logs,
        transactions,
        rewards,
        inputs,
    })
}

// ============================================================================
// Stage 2: Coerce
// ============================================================================

/// Coerce the identifier columns of every table to nullable Float64.
pub fn coerce(tables: &mut IngestResult) -> Result<()> {
    let coerce_span = info_span!("coerce");
    let _coerce_guard = coerce_span.enter();
    let coerce_start = Instant::now();

    coerce_id_columns(&mut tables.referrals, REFERRALS.id_columns)
        .context("coerce referral identifiers")?;
    coerce_id_columns(&mut tables.user_logs, USER_LOGS.id_columns)
        .context("coerce user log identifiers")?;
    coerce_id_columns(&mut tables.transactions, TRANSACTIONS.id_columns)
        .context("coerce transaction identifiers")?;
    coerce_id_columns(&mut tables.rewards, REWARDS.id_columns)
        .context("coerce reward identifiers")?;

    info!(
        duration_ms = coerce_start.elapsed().as_millis(),
        "identifier coercion complete"
    );
    Ok(())
}

// ============================================================================
// Stage 3: Enrich
// ============================================================================

/// Run the four left joins, producing one enriched row per referral.
pub fn enrich_referrals(tables: &IngestResult) -> Result<DataFrame> {
    let enrich_span = info_span!("enrich");
    let _enrich_guard = enrich_span.enter();
    let enrich_start = Instant::now();

    let enriched = enrich(EnrichInput {
        referrals: &tables.referrals,
        user_logs: &tables.user_logs,
        transactions: &tables.transactions,
        rewards: &tables.rewards,
    })
    .context("enrichment joins")?;

    info!(
        rows = enriched.height(),
        columns = enriched.width(),
        duration_ms = enrich_start.elapsed().as_millis(),
        "enrichment complete"
    );
    Ok(enriched)
}

// ============================================================================
// Stage 4: Validate
// ============================================================================

/// Append the validity columns and return the outcome tallies.
pub fn validate(enriched: &mut DataFrame) -> Result<ValidationCounts> {
    let validate_span = info_span!("validate");
    let _validate_guard = validate_span.enter();
    let validate_start = Instant::now();

    let counts = ValidationEngine::new()
        .validate_frame(enriched)
        .context("validate enriched referrals")?;

    info!(
        rows = counts.rows,
        valid = counts.valid,
        invalid = counts.invalid,
        duration_ms = validate_start.elapsed().as_millis(),
        "validation complete"
    );
    Ok(counts)
}

// ============================================================================
// Stage 5: Output
// ============================================================================

/// Output configuration.
pub struct OutputConfig<'a> {
    pub output_dir: &'a Path,
    pub dry_run: bool,
    /// Write the validation_summary.json artifact alongside the report.
    pub write_summary: bool,
}

/// Result of the output stage.
#[derive(Debug)]
pub struct OutputResult {
    pub report_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
    pub output_rows: usize,
}

/// Project the report columns and write the artifacts.
pub fn output(
    validated: &DataFrame,
    tables: &IngestResult,
    counts: &ValidationCounts,
    config: &OutputConfig<'_>,
) -> Result<OutputResult> {
    let output_span = info_span!("output", output_dir = %config.output_dir.display());
    let _output_guard = output_span.enter();
    let output_start = Instant::now();

    let mut projected = project_report(validated).context("project report")?;
    let output_rows = projected.height();

    if config.dry_run {
        info!(
            rows = output_rows,
            duration_ms = output_start.elapsed().as_millis(),
            "output skipped (dry run)"
        );
        return Ok(OutputResult {
            report_path: None,
            summary_path: None,
            output_rows,
        });
    }

    let report_path = write_report_csv(config.output_dir, &mut projected)?;

    let summary_path = if config.write_summary {
        let summary = RunSummary {
            input_rows: tables.input_rows(),
            missing_inputs: tables.missing_inputs(),
            output_rows,
            counts: counts.clone(),
        };
        Some(write_validation_summary_json(config.output_dir, &summary)?)
    } else {
        None
    };

    info!(
        rows = output_rows,
        report = %report_path.display(),
        duration_ms = output_start.elapsed().as_millis(),
        "output complete"
    );

    Ok(OutputResult {
        report_path: Some(report_path),
        summary_path,
        output_rows,
    })
}
