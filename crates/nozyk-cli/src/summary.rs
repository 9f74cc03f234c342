//! Terminal tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use nozyk_geo::{AxisOrder, CoordinateSystem, ResolvedCoordinates};
use nozyk_ingest::Workbook;
use nozyk_model::{CellValue, Dataset, SummaryRow};

use nozyk_cli::pipeline::{Exploration, LoadedSheet};

/// Widest cell shown in dataset previews.
const MAX_PREVIEW_CHARS: usize = 40;

pub fn print_sheets(workbook: &Workbook) {
    println!("File: {}", workbook.path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for sheet in workbook.sheets() {
        table.add_row(vec![
            Cell::new(&sheet.name),
            Cell::new(sheet.dataset.row_count()),
            Cell::new(sheet.dataset.column_count()),
        ]);
    }
    println!("{table}");
}

/// Per-column normalization outcome.
pub fn print_report(loaded: &LoadedSheet) {
    println!(
        "Sheet: {} ({} rows, date column: {})",
        loaded.sheet,
        loaded.dataset.row_count(),
        loaded.date_column.as_deref().unwrap_or("none")
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Class"),
        header_cell("Text"),
        header_cell("Fallback"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for column in &loaded.report.columns {
        let class = match column.class {
            Some(class) => Cell::new(class),
            None => dim_cell("-"),
        };
        let text = if column.coerced_to_text {
            Cell::new("✓").fg(Color::Green)
        } else {
            dim_cell("-")
        };
        let fallback = match &column.fallback {
            Some(reason) => Cell::new(reason).fg(Color::Yellow),
            None => dim_cell("-"),
        };
        table.add_row(vec![Cell::new(&column.column), class, text, fallback]);
    }
    println!("{table}");
}

/// First `limit` rows of `dataset`.
pub fn print_preview(dataset: &Dataset, limit: usize) {
    if dataset.is_empty() {
        println!("No rows.");
        return;
    }
    let mut table = Table::new();
    table.set_header(dataset.columns().iter().map(|name| header_cell(name)));
    apply_table_style(&mut table);
    for row in dataset.head(limit).rows() {
        table.add_row(row.cells.iter().map(preview_cell));
    }
    println!("{table}");
    if dataset.row_count() > limit {
        println!("… {} more rows", dataset.row_count() - limit);
    }
}

/// Exception and address figures for the filtered rows.
pub fn print_overview(exploration: &Exploration, home_city: &str) {
    println!("Rows: {}", exploration.filtered.row_count());
    println!("Exceptions: {}", exploration.overview.total);
    match &exploration.overview.most_common {
        Some((status, count)) => println!("Most common: {status} ({count})"),
        None => println!("Most common: -"),
    }
    match &exploration.addresses {
        Some(counts) => {
            println!("Unique addresses: {}", counts.unique);
            println!("{home_city}: {}", counts.home_city);
            println!("Other cities: {}", counts.other);
        }
        None => println!("Unique addresses: - (no city column)"),
    }
}

/// The per-driver summary with a total row.
pub fn print_summary(rows: &[SummaryRow], home_city: &str) {
    if rows.is_empty() {
        println!("No drivers in the selection.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Driver"),
        header_cell("Exceptions"),
        header_cell(home_city),
        header_cell("Other cities"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut totals = [0usize; 4];
    for row in rows {
        totals[0] += row.exception_count;
        totals[1] += row.home_city_count;
        totals[2] += row.other_city_count;
        totals[3] += row.total_rows;
        table.add_row(vec![
            Cell::new(row.display_label()),
            count_cell(row.exception_count, Color::Yellow),
            Cell::new(row.home_city_count),
            Cell::new(row.other_city_count),
            Cell::new(row.total_rows),
        ]);
    }
    let mut total_row = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    total_row.extend(
        totals
            .iter()
            .map(|value| Cell::new(value).add_attribute(Attribute::Bold)),
    );
    table.add_row(total_row);
    println!("{table}");
}

pub fn print_geo(resolved: &ResolvedCoordinates, limit: usize) {
    let system = match resolved.system {
        CoordinateSystem::Projected => "projected",
        CoordinateSystem::Geographic => "geographic",
    };
    let order = match resolved.axis_order {
        Some(AxisOrder::LatLon) => "x=latitude, y=longitude",
        Some(AxisOrder::LonLat) => "x=longitude, y=latitude",
        Some(AxisOrder::Indeterminate) => "undetermined, x=longitude assumed",
        None => "-",
    };
    println!("Points: {}", resolved.points.len());
    println!("System: {system}");
    println!("Axis order: {order}");
    println!(
        "Center: {:.6}, {:.6}",
        resolved.center.latitude, resolved.center.longitude
    );
    for advisory in &resolved.advisories {
        println!("note: {advisory}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Latitude"),
        header_cell("Longitude"),
    ]);
    apply_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for point in resolved.points.iter().take(limit) {
        table.add_row(vec![
            dim_cell(point.row),
            Cell::new(format!("{:.6}", point.position.latitude)),
            Cell::new(format!("{:.6}", point.position.longitude)),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn preview_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Empty => dim_cell("-"),
        CellValue::Number(_) => Cell::new(value).set_alignment(CellAlignment::Right),
        _ => Cell::new(truncate(&value.to_text(), MAX_PREVIEW_CHARS)),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Wrocław", 10), "Wrocław");
        assert_eq!(truncate("ąęćłńóśźżx", 5), "ąęćł…");
    }
}
