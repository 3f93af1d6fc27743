//! Human-readable rendering of a validation report.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use energy_model::{CheckName, ValidationReport};

/// Render the verdict: overall status, one row per check, then every error.
pub fn render_summary(report: &ValidationReport) -> String {
    let status = if report.is_valid { "PASSED" } else { "FAILED" };
    let mut out = format!("Overall Status: {status}\n");

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Status"),
        header_cell("Errors"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for name in CheckName::ALL {
        let Some(result) = report.check(name) else {
            continue;
        };
        table.add_row(vec![
            Cell::new(name.as_str()),
            status_cell(result.valid),
            count_cell(result.errors.len()),
        ]);
    }
    out.push_str(&table.to_string());
    out.push('\n');

    if report.error_count() > 0 {
        let mut issues = Table::new();
        issues.set_header(vec![header_cell("Check"), header_cell("Message")]);
        apply_table_style(&mut issues);
        for (name, result) in &report.checks {
            for error in &result.errors {
                issues.add_row(vec![Cell::new(name.as_str()), Cell::new(error)]);
            }
        }
        out.push_str("Errors:\n");
        out.push_str(&issues.to_string());
        out.push('\n');
    }
    out
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn status_cell(valid: bool) -> Cell {
    if valid {
        Cell::new("PASS").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new("FAIL").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red)
    } else {
        Cell::new(count).add_attribute(Attribute::Dim)
    }
}
