//! Terminal rendering of table models with `comfy-table`.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mediadive_table::Table as TableModel;

/// Columns whose values are right-aligned.
const NUMERIC_KEYS: &[&str] = &["g_l", "mmol_l", "mass", "volume", "media"];

/// Render the visible rows of a table model.
pub fn list_table(model: &TableModel) -> Table {
    let mut table = Table::new();
    table.set_header(
        model
            .columns()
            .iter()
            .map(|column| header_cell(&column.label))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);

    for (index, column) in model.columns().iter().enumerate() {
        if NUMERIC_KEYS.contains(&column.key.as_str()) {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }

    for row in model.visible_rows() {
        table.add_row(
            model
                .columns()
                .iter()
                .map(|column| match row.cell(&column.key) {
                    Some(cell) if cell.text.is_empty() => dim_cell("-"),
                    Some(cell) if cell.link.is_some() => {
                        Cell::new(&cell.text).add_attribute(Attribute::Underlined)
                    }
                    Some(cell) => Cell::new(&cell.text),
                    None => dim_cell("-"),
                })
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// Two-column field/value table for detail views.
pub fn detail_table<K: AsRef<str>>(fields: &[(K, String)]) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    for (label, value) in fields {
        let value_cell = if value.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(value)
        };
        table.add_row(vec![header_cell(label.as_ref()), value_cell]);
    }
    table
}

/// `"3 of 10 rows"` footer for filtered lists.
pub fn row_count_line(model: &TableModel) -> String {
    format!("{} of {} rows", model.visible_count(), model.len())
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
