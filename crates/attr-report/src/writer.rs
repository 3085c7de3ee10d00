//! Report artifact writing.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::debug;

/// File name of the report artifact inside the output directory.
pub const REPORT_FILE_NAME: &str = "final_marketing_report.csv";

/// Write the projected report as comma-separated text, one row per referral,
/// no row-index column.
pub fn write_report_csv(output_dir: &Path, df: &mut DataFrame) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let path = output_dir.join(REPORT_FILE_NAME);
    let mut file =
        File::create(&path).with_context(|| format!("create report {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("write report {}", path.display()))?;
    debug!(path = %path.display(), rows = df.height(), "report written");
    Ok(path)
}
