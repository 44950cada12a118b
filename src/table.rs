/// Space between columns
pub const COLUMN_MARGIN: usize = 5;

/// Render rows as an aligned text table.
///
/// Column width is the longest cell in that column plus the margin. The last
/// column is right-aligned, all others left-aligned. Rows shorter than the
/// first row are padded with empty cells.
pub fn render(rows: &[Vec<String>]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let columns = first.len();
    if columns == 0 {
        return String::new();
    }

    let mut widths = vec![0usize; columns];
    for row in rows {
        for (idx, cell) in row.iter().take(columns).enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in rows {
        for idx in 0..columns {
            let cell = row.get(idx).map(String::as_str).unwrap_or("");
            let width = widths[idx] + COLUMN_MARGIN;
            if idx == columns - 1 {
                out.push_str(&format!("{:>width$}", cell, width = width));
            } else {
                out.push_str(&format!("{:<width$}", cell, width = width));
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn aligns_columns_by_widest_cell() {
        let out = render(&[row(&["Date", "Client", "NETTO"]), row(&["01.06.2024", "A", "1000.00"])]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Date           Client            NETTO");
        assert_eq!(lines[1], "01.06.2024     A               1000.00");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render(&[]), "");
    }
}
