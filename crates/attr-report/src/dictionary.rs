//! Static schema dictionary for the report artifact.
//!
//! Purely descriptive metadata about the seven report columns; takes no
//! input from the pipeline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use attr_model::REPORT_COLUMNS;

/// File name of the dictionary artifact.
pub const DICTIONARY_FILE_NAME: &str = "data_dictionary.csv";

/// Write the data dictionary into the given directory.
pub fn write_data_dictionary(output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let path = output_dir.join(DICTIONARY_FILE_NAME);
    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(["Column Name", "Data Type", "Description"])
        .context("write dictionary header")?;
    for column in REPORT_COLUMNS {
        writer
            .write_record([column.name, column.data_type, column.description])
            .context("write dictionary row")?;
    }
    writer.flush().context("flush dictionary")?;
    Ok(path)
}
