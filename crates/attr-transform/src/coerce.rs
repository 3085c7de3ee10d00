//! Identifier coercion: force join-key columns to a nullable numeric type.
//!
//! Source identifiers arrive as free text and are occasionally garbage. A
//! cell that does not parse becomes null, and a null key never matches in
//! the joins, so a bad identifier degrades into missing enrichment data
//! instead of failing the run.

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, Column, DataFrame};
use tracing::debug;

use attr_ingest::any_to_f64;

/// Replace `column` with a Float64 column; unparseable cells become null.
pub fn coerce_numeric_column(df: &mut DataFrame, column: &str) -> Result<()> {
    let values: Vec<Option<f64>> = {
        let source = df
            .column(column)
            .with_context(|| format!("coerce column {column}"))?;
        (0..df.height())
            .map(|idx| any_to_f64(source.get(idx).unwrap_or(AnyValue::Null)))
            .collect()
    };
    let nulls = values.iter().filter(|v| v.is_none()).count();
    df.with_column(Column::new(column.into(), values))
        .with_context(|| format!("replace column {column}"))?;
    debug!(column, nulls, "coerced identifier column");
    Ok(())
}

/// Coerce every identifier column the join engine relies on. Columns absent
/// from the frame are skipped; the empty-table substitution already supplies
/// the minimum schema for absent inputs.
pub fn coerce_id_columns(df: &mut DataFrame, columns: &[&str]) -> Result<()> {
    for column in columns {
        if df.column(column).is_err() {
            continue;
        }
        coerce_numeric_column(df, column)?;
    }
    Ok(())
}
