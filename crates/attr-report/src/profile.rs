//! Column-level profiling of the raw input tables.
//!
//! Decoupled from the pipeline: the sweep reads whatever CSV files sit in
//! the data directory with native dtype inference, and a table that fails
//! to load is logged and skipped rather than aborting the sweep.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, Column, DataFrame, DataType};
use tracing::{debug, warn};

use attr_ingest::{any_to_f64, any_to_string, format_numeric, list_csv_files, read_table_inferred};

/// File name of the profile artifact.
pub const PROFILE_FILE_NAME: &str = "data_profile.csv";

/// Stringified min/max values are truncated to this length.
const VALUE_TRUNCATE_LEN: usize = 50;

/// Summary statistics for one column of one table.
#[derive(Debug, Clone)]
pub struct ColumnProfile {
    pub table: String,
    pub column: String,
    pub data_type: String,
    pub total_rows: usize,
    pub null_count: usize,
    pub pct_populated: f64,
    pub distinct_count: usize,
    pub min_value: String,
    pub max_value: String,
}

/// Profile every CSV file in the data directory.
pub fn profile_directory(data_dir: &Path) -> Result<Vec<ColumnProfile>> {
    let files = list_csv_files(data_dir).context("list csv files")?;
    let mut profiles = Vec::new();
    for path in files {
        let table_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match read_table_inferred(&path) {
            Ok(df) => {
                debug!(table = %table_name, rows = df.height(), "profiling table");
                profiles.extend(profile_table(&table_name, &df));
            }
            Err(error) => {
                warn!(table = %table_name, %error, "profiling skipped unreadable table");
            }
        }
    }
    Ok(profiles)
}

/// Profile every column of one frame.
pub fn profile_table(table_name: &str, df: &DataFrame) -> Vec<ColumnProfile> {
    let total_rows = df.height();
    df.get_columns()
        .iter()
        .map(|column| profile_column(table_name, column, total_rows))
        .collect()
}

fn profile_column(table_name: &str, column: &Column, total_rows: usize) -> ColumnProfile {
    let null_count = column.null_count();
    let populated = total_rows.saturating_sub(null_count);
    let pct_populated = if total_rows == 0 {
        0.0
    } else {
        let pct = 100.0 * populated as f64 / total_rows as f64;
        (pct * 100.0).round() / 100.0
    };
    let distinct_count = column.n_unique().unwrap_or(0);
    let (min_value, max_value) = min_max(column);

    ColumnProfile {
        table: table_name.to_string(),
        column: column.name().to_string(),
        data_type: column.dtype().to_string(),
        total_rows,
        null_count,
        pct_populated,
        distinct_count,
        min_value,
        max_value,
    }
}

/// Min/max over the column: numeric ordering for numeric dtypes,
/// lexicographic over non-blank strings otherwise.
fn min_max(column: &Column) -> (String, String) {
    let is_numeric = matches!(
        column.dtype(),
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    );

    if is_numeric {
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;
        for idx in 0..column.len() {
            let Some(value) = any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)) else {
                continue;
            };
            min = Some(min.map_or(value, |m| m.min(value)));
            max = Some(max.map_or(value, |m| m.max(value)));
        }
        (
            min.map(format_numeric).unwrap_or_default(),
            max.map(format_numeric).unwrap_or_default(),
        )
    } else {
        let mut min: Option<String> = None;
        let mut max: Option<String> = None;
        for idx in 0..column.len() {
            let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
            if value.trim().is_empty() {
                continue;
            }
            if min.as_ref().is_none_or(|m| value < *m) {
                min = Some(value.clone());
            }
            if max.as_ref().is_none_or(|m| value > *m) {
                max = Some(value);
            }
        }
        (
            truncate(min.unwrap_or_default()),
            truncate(max.unwrap_or_default()),
        )
    }
}

fn truncate(value: String) -> String {
    if value.chars().count() <= VALUE_TRUNCATE_LEN {
        value
    } else {
        value.chars().take(VALUE_TRUNCATE_LEN).collect()
    }
}

/// Write the profile artifact.
pub fn write_profile_csv(output_dir: &Path, profiles: &[ColumnProfile]) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let path = output_dir.join(PROFILE_FILE_NAME);
    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record([
            "Table Name",
            "Column Name",
            "Data Type",
            "Total Rows",
            "Null Count",
            "Pct Populated",
            "Distinct Values",
            "Min Value",
            "Max Value",
        ])
        .context("write profile header")?;
    for profile in profiles {
        writer
            .write_record([
                profile.table.as_str(),
                profile.column.as_str(),
                profile.data_type.as_str(),
                &profile.total_rows.to_string(),
                &profile.null_count.to_string(),
                &format!("{:.2}", profile.pct_populated),
                &profile.distinct_count.to_string(),
                profile.min_value.as_str(),
                profile.max_value.as_str(),
            ])
            .context("write profile row")?;
    }
    writer.flush().context("flush profile")?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_column_stats() {
        let df = DataFrame::new(vec![Column::new(
            "amount".into(),
            vec![Some(10.0f64), Some(30.0), None],
        )])
        .expect("frame");
        let profiles = profile_table("rewards.csv", &df);
        assert_eq!(profiles.len(), 1);
        let profile = &profiles[0];
        assert_eq!(profile.total_rows, 3);
        assert_eq!(profile.null_count, 1);
        assert_eq!(profile.pct_populated, 66.67);
        assert_eq!(profile.min_value, "10");
        assert_eq!(profile.max_value, "30");
    }

    #[test]
    fn string_column_stats() {
        let df = DataFrame::new(vec![Column::new(
            "status".into(),
            vec!["PAID", "PENDING", "PAID"],
        )])
        .expect("frame");
        let profiles = profile_table("transactions.csv", &df);
        let profile = &profiles[0];
        assert_eq!(profile.null_count, 0);
        assert_eq!(profile.distinct_count, 2);
        assert_eq!(profile.min_value, "PAID");
        assert_eq!(profile.max_value, "PENDING");
    }

    #[test]
    fn long_values_are_truncated() {
        let long = "x".repeat(80);
        let df = DataFrame::new(vec![Column::new("note".into(), vec![long.as_str()])])
            .expect("frame");
        let profiles = profile_table("notes.csv", &df);
        assert_eq!(profiles[0].max_value.chars().count(), 50);
    }

    #[test]
    fn empty_frame_profiles_without_rows() {
        let df = DataFrame::new(vec![Column::new("id".into(), Vec::<&str>::new())])
            .expect("frame");
        let profiles = profile_table("empty.csv", &df);
        assert_eq!(profiles[0].total_rows, 0);
        assert_eq!(profiles[0].pct_populated, 0.0);
        assert_eq!(profiles[0].min_value, "");
    }
}
