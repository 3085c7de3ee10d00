//! Human-readable run summary printed after a report run.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::ReportResult;

pub fn print_summary(result: &ReportResult) {
    println!("Data: {}", result.data_dir.display());
    println!("Output: {}", result.output_dir.display());
    if let Some(path) = &result.report_path {
        println!("Report: {}", path.display());
    }
    if let Some(path) = &result.summary_path {
        println!("Run summary: {}", path.display());
    }
    if result.dry_run {
        println!("Dry run: no artifacts written");
    }

    let mut inputs = Table::new();
    inputs.set_header(vec![
        header_cell("Table"),
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Loaded"),
    ]);
    apply_table_style(&mut inputs);
    align_column(&mut inputs, 2, CellAlignment::Right);
    align_column(&mut inputs, 3, CellAlignment::Center);
    for table in &result.inputs {
        inputs.add_row(vec![
            Cell::new(table.name),
            Cell::new(table.file_name),
            Cell::new(table.rows),
            if table.present {
                Cell::new("yes")
            } else {
                Cell::new("missing").fg(Color::Yellow)
            },
        ]);
    }
    println!("{inputs}");

    let mut outcomes = Table::new();
    outcomes.set_header(vec![header_cell("Outcome"), header_cell("Rows")]);
    apply_table_style(&mut outcomes);
    align_column(&mut outcomes, 1, CellAlignment::Right);
    // Valid first, then the rejection reasons in alphabetical order
    if let Some(count) = result.counts.reasons.get("Valid") {
        outcomes.add_row(vec![Cell::new("Valid").fg(Color::Green), Cell::new(count)]);
    }
    for (reason, count) in &result.counts.reasons {
        if reason == "Valid" {
            continue;
        }
        outcomes.add_row(vec![Cell::new(reason).fg(Color::Red), Cell::new(count)]);
    }
    outcomes.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.output_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{outcomes}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
