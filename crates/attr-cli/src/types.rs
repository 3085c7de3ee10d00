//! Result types shared by the CLI commands and the summary printer.

use std::path::PathBuf;

use attr_validate::ValidationCounts;

/// Row count for one input table.
#[derive(Debug, Clone)]
pub struct TableCount {
    pub name: &'static str,
    pub file_name: &'static str,
    pub rows: usize,
    /// False when the source file was absent and an empty table was
    /// substituted.
    pub present: bool,
}

/// Outcome of one `report` run.
#[derive(Debug)]
pub struct ReportResult {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub report_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
    pub inputs: Vec<TableCount>,
    pub output_rows: usize,
    pub counts: ValidationCounts,
}
