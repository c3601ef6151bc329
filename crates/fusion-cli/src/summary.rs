use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use fusion_common::head_rows;
use fusion_core::FusionOutcome;

pub fn print_preview(outcome: &FusionOutcome) {
    let preview = outcome.preview();
    match preview_table(&preview, preview.height()) {
        Ok(table) => {
            println!(
                "Preview (first {} of {} rows):",
                preview.height(),
                outcome.result.height()
            );
            println!("{table}");
        }
        Err(error) => tracing::warn!(%error, "failed to render preview"),
    }
}

pub fn print_summary(outcome: &FusionOutcome) {
    println!("{}", summary_table(outcome));
    println!("{}", outcome.success_message());
}

/// First `rows` rows as a table; missing values render as empty cells.
pub fn preview_table(df: &DataFrame, rows: usize) -> polars::prelude::PolarsResult<Table> {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(
        df.get_column_names_str()
            .into_iter()
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    for row in head_rows(df, rows)? {
        table.add_row(row);
    }
    Ok(table)
}

pub fn summary_table(outcome: &FusionOutcome) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Stage"), header_cell("Result")]);
    table.add_row(vec![
        Cell::new("Files discovered"),
        Cell::new(outcome.files_discovered),
    ]);
    table.add_row(vec![
        Cell::new("Files loaded"),
        Cell::new(outcome.files_loaded()),
    ]);
    table.add_row(vec![
        Cell::new("Files skipped"),
        count_cell(outcome.load_errors.len()),
    ]);
    table.add_row(vec![
        Cell::new("Rows x columns"),
        Cell::new(format!(
            "{} x {}",
            outcome.result.height(),
            outcome.result.width()
        )),
    ]);
    table.add_row(vec![
        Cell::new("Output"),
        Cell::new(format!(
            "{} ({})",
            outcome.output_path.display(),
            outcome.format
        )),
    ]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::DarkGrey)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_core::PREVIEW_ROWS;
    use polars::prelude::*;

    #[test]
    fn test_preview_table_limits_rows() {
        let df = df!(
            "id" => (0..30).collect::<Vec<i64>>(),
            "name" => (0..30).map(|i| format!("n{i}")).collect::<Vec<_>>()
        )
        .unwrap();

        let table = preview_table(&df, PREVIEW_ROWS).unwrap();
        assert_eq!(table.row_iter().count(), PREVIEW_ROWS);
        let rendered = table.to_string();
        assert!(rendered.contains("n19"));
        assert!(!rendered.contains("n20"));
    }

    #[test]
    fn test_preview_table_renders_missing_as_empty() {
        let df = df!("a" => [Some(1i64), None], "b" => [Some("x"), None]).unwrap();
        let table = preview_table(&df, PREVIEW_ROWS).unwrap();
        let rows: Vec<Vec<String>> = table
            .row_iter()
            .map(|row| row.cell_iter().map(Cell::content).collect())
            .collect();
        assert_eq!(rows, vec![vec!["1", "x"], vec!["", ""]]);
    }
}
