use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use seer_ingest::BuildReport;
use seer_transform::CohortReport;

/// Render the cohort attrition as a table: one row per filter step with
/// the rows remaining and the rows that step removed.
pub fn render_attrition(report: &CohortReport) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Remaining"),
        header_cell("Removed"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    table.add_row(vec![
        Cell::new("registry records"),
        Cell::new(report.initial_rows),
        Cell::new("-"),
    ]);
    let mut previous = report.initial_rows;
    for step in &report.steps {
        table.add_row(vec![
            Cell::new(&step.label),
            Cell::new(step.remaining),
            Cell::new(previous.saturating_sub(step.remaining)),
        ]);
        previous = step.remaining;
    }
    table.add_row(vec![
        Cell::new("cohort").add_attribute(Attribute::Bold),
        Cell::new(report.final_rows()).add_attribute(Attribute::Bold),
        Cell::new(report.initial_rows.saturating_sub(report.final_rows()))
            .add_attribute(Attribute::Bold),
    ]);
    table.to_string()
}

/// One-line description of how the registry table was built.
pub fn describe_build(report: &BuildReport) -> String {
    format!(
        "{} lines read, {} rows decoded, {} skipped, {} truncated in {} ms",
        report.lines_read,
        report.rows_decoded,
        report.rows_skipped,
        report.truncated_rows,
        report.elapsed.as_millis()
    )
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
