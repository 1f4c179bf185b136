//! Rendering of count results for the terminal.

use std::path::Path;

use console::Style;
use patloclib::{CountResult, Tally};
use prettytable::{format, Cell, Row, Table};

/// Widest file name shown before it is shortened from the left.
const MAX_NAME_WIDTH: usize = 48;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_arg(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() > max_len {
        let tail: String = chars[chars.len() - (max_len - 2)..].iter().collect();
        format!("..{}", tail)
    } else {
        name.to_string()
    }
}

/// Convert a path to a relative path from the base directory.
fn make_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string_lossy().to_string())
}

/// Cells for a tally, in column order: code, one per category, total.
fn tally_cells(tally: &Tally, columns: &[String]) -> Vec<u64> {
    let mut cells = Vec::with_capacity(columns.len() + 2);
    cells.push(tally.code_lines);
    for name in columns {
        cells.push(tally.count(name).unwrap_or(0));
    }
    cells.push(tally.total_lines);
    cells
}

/// Render a count result.
pub fn render_count(
    result: &CountResult,
    by_file: bool,
    base_path: &Path,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(result).map(|s| s + "\n"),
        OutputFormat::Table => Ok(render_table(result, by_file, base_path)),
    }
}

/// Box-drawing layout: rules above and below the header and at the bottom.
fn table_format() -> format::TableFormat {
    format::FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separator(
            format::LinePosition::Top,
            format::LineSeparator::new('─', '┬', '┌', '┐'),
        )
        .separator(
            format::LinePosition::Title,
            format::LineSeparator::new('─', '┼', '├', '┤'),
        )
        .separator(
            format::LinePosition::Bottom,
            format::LineSeparator::new('─', '┴', '└', '┘'),
        )
        .padding(1, 1)
        .build()
}

fn count_row(label: &str, cells: &[u64], label_style: &Style) -> Row {
    let mut row = Row::new(vec![Cell::new(&label_style.apply_to(label).to_string())]);
    for value in cells {
        row.add_cell(Cell::new_align(&value.to_string(), format::Alignment::RIGHT));
    }
    row
}

fn render_table(result: &CountResult, by_file: bool, base_path: &Path) -> String {
    let header_style = Style::new().bold();
    let plain = Style::new();

    let categories: Vec<String> = result
        .total
        .categories
        .iter()
        .map(|c| c.name.clone())
        .collect();

    let mut table = Table::new();
    table.set_format(table_format());

    let mut titles = vec![if by_file { "File" } else { "" }, "Code"];
    titles.extend(categories.iter().map(String::as_str));
    titles.push("Total");
    table.set_titles(Row::new(
        titles
            .iter()
            .map(|title| {
                let text = header_style.apply_to(title).to_string();
                Cell::new_align(&text, format::Alignment::CENTER)
            })
            .collect(),
    ));

    if by_file {
        for file in &result.files {
            let name = truncate_name(&make_relative(&file.path, base_path), MAX_NAME_WIDTH);
            let cells = tally_cells(&file.tally, &categories);
            table.add_row(count_row(&name, &cells, &plain));
        }
    }

    let noun = if result.file_count == 1 { "file" } else { "files" };
    let label = format!("Total ({} {})", result.file_count, noun);
    table.add_row(count_row(
        &label,
        &tally_cells(&result.total, &categories),
        &header_style,
    ));

    table.to_string()
}
