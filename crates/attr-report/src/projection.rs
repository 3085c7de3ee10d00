//! Final report projection.
//!
//! Canonicalizes the reward column name, then selects the report columns in
//! their fixed order. Columns absent from the validated frame are omitted
//! silently; partial input sets still produce a report.

use std::collections::HashSet;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::debug;

use attr_model::REPORT_COLUMNS;

/// Project the validated frame down to the report columns.
pub fn project_report(df: &DataFrame) -> Result<DataFrame> {
    let mut frame = df.clone();

    let names: HashSet<String> = frame
        .get_column_names_owned()
        .iter()
        .map(|name| name.to_string())
        .collect();
    if names.contains("reward_value") && !names.contains("reward_amount") {
        frame
            .rename("reward_value", "reward_amount".into())
            .context("canonicalize reward column")?;
    }

    let present: HashSet<String> = frame
        .get_column_names_owned()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let selection: Vec<&str> = REPORT_COLUMNS
        .iter()
        .map(|column| column.name)
        .filter(|name| present.contains(*name))
        .collect();
    debug!(columns = selection.len(), "projected report columns");
    frame.select(selection).context("project report columns")
}
