//! Table rendering using comfy-table

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, ContentArrangement, Table};

/// Format a two-column field/value table
pub fn format_table(headers: &[&str], rows: &[(String, Cell)]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    // Terminal width minus indent, 120 when there is no terminal
    let (_, cols) = console::Term::stdout().size_checked().unwrap_or((0, 120));
    table.set_width(cols.saturating_sub(4));
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for (field, value) in rows {
        table.add_row(vec![Cell::new(field), value.clone()]);
    }

    table
        .to_string()
        .lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cell colored by status
pub fn status_cell(text: impl ToString, ok: bool) -> Cell {
    Cell::new(text.to_string()).fg(if ok { Color::Green } else { Color::Red })
}

/// Cell colored as a warning
pub fn warning_cell(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).fg(Color::Yellow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table_contains_rows() {
        let rows = vec![
            ("Subject".to_string(), Cell::new("example.com")),
            ("Issuer".to_string(), status_cell("R3", true)),
        ];
        let rendered = format_table(&["Field", "Value"], &rows);
        assert!(rendered.contains("example.com"));
        assert!(rendered.contains("Issuer"));
        assert!(rendered.lines().all(|line| line.starts_with("    ")));
    }
}
