use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{BranchSummary, RunResult};

pub fn print_summary(result: &RunResult) {
    println!("{}", summary_table(result));
    if result.dry_run {
        println!("Dry run: no output written");
    } else {
        println!("{}", output_table(result));
    }
    if let Some(count) = result.verified {
        println!("Verified: {count} records read back");
    }
}

/// Per-dataset counts plus the join totals.
pub fn summary_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Source"),
        header_cell("Records"),
        header_cell("Rejected"),
        header_cell("Keys"),
        header_cell("Unmatched"),
    ]);
    apply_summary_table_style(&mut table);
    for column in 2..=5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    table.add_row(branch_row("Cases", &result.cases, result.unmatched_cases));
    table.add_row(branch_row(
        "Rainfall",
        &result.rainfall,
        result.unmatched_rainfall,
    ));
    table.add_row(vec![
        Cell::new("JOINED")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(result.joined).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

fn output_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Output"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for output in &result.outputs {
        table.add_row(vec![
            Cell::new(output.path.display()),
            Cell::new(output.records),
        ]);
    }
    table
}

/// Writes the run result as pretty JSON.
pub fn write_summary_json(path: &Path, result: &RunResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("serialize run summary")?;
    fs::write(path, json).with_context(|| format!("write summary {}", path.display()))
}

fn branch_row(label: &str, branch: &BranchSummary, unmatched: usize) -> Vec<Cell> {
    vec![
        Cell::new(label)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(branch.path.display()),
        Cell::new(branch.records),
        count_cell(branch.rejected, Color::Yellow),
        Cell::new(branch.keys),
        count_cell(unmatched, Color::DarkYellow),
    ]
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
