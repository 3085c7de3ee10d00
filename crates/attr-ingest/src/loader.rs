//! CSV loading for the fixed report input tables.
//!
//! Pipeline tables are read with every column as text: cell interpretation
//! is the coercion stage's job, and a stray non-numeric identifier must
//! never fail the read itself. The profiler uses the schema-inferring
//! variant instead, since it reports on native column types.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, warn};

use attr_model::TableSpec;

use crate::error::{IngestError, Result};

/// Read a CSV file with every column typed as String.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    read_with_schema_length(path, Some(0))
}

/// Read a CSV file with native dtype inference.
pub fn read_table_inferred(path: &Path) -> Result<DataFrame> {
    read_with_schema_length(path, Some(100))
}

fn read_with_schema_length(path: &Path, infer_len: Option<usize>) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_len)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|error| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?
        .finish()
        .map_err(|error| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded csv table"
    );
    Ok(df)
}

/// Build the zero-row stand-in for an absent table. It carries the table's
/// minimum columns so downstream joins resolve and produce nulls.
pub fn empty_table(spec: &TableSpec) -> Result<DataFrame> {
    let columns: Vec<Column> = spec
        .required_columns
        .iter()
        .map(|name| Series::new_empty((*name).into(), &DataType::String).into_column())
        .collect();
    DataFrame::new(columns).map_err(|error| IngestError::EmptySchema {
        table: spec.name.to_string(),
        message: error.to_string(),
    })
}

/// A loaded input table, tracking whether the source file was present.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub data: DataFrame,
    pub path: PathBuf,
    pub present: bool,
}

/// Load the referral table. This is the one fatal precondition: the file
/// must exist and contain at least one row.
pub fn load_referrals(data_dir: &Path, spec: &TableSpec) -> Result<DataFrame> {
    let path = data_dir.join(spec.file_name);
    if !path.is_file() {
        return Err(IngestError::ReferralsMissing { path });
    }
    let df = read_table(&path)?;
    if df.height() == 0 {
        return Err(IngestError::ReferralsEmpty { path });
    }
    Ok(df)
}

/// Load a secondary table, substituting an empty frame when the file is
/// absent. The run proceeds and every column sourced from the table comes
/// out null.
pub fn load_secondary(data_dir: &Path, spec: &TableSpec) -> Result<LoadedTable> {
    let path = data_dir.join(spec.file_name);
    if path.is_file() {
        let data = read_table(&path)?;
        Ok(LoadedTable {
            data,
            path,
            present: true,
        })
    } else {
        warn!(
            table = spec.name,
            file = %path.display(),
            "input table missing, substituting empty table"
        );
        Ok(LoadedTable {
            data: empty_table(spec)?,
            path,
            present: false,
        })
    }
}
