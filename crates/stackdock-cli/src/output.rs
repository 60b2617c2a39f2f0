//! Formatted output helpers for CLI commands.

/// Renders rows as a left-aligned three-column table with a header line.
#[must_use]
pub fn format_table(headers: [&str; 3], rows: &[[String; 3]]) -> String {
    let mut widths = headers.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let render = |out: &mut String, cells: [&str; 3]| {
        out.push_str(&format!(
            "{:<w0$}  {:<w1$}  {:<w2$}\n",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        ));
    };

    render(&mut out, headers);
    for row in rows {
        render(&mut out, [&row[0], &row[1], &row[2]]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_aligns_columns_to_widest_cell() {
        let rows = vec![
            ["mosquitto".to_string(), "Eclipse Mosquitto".to_string(), "mqtt".to_string()],
            ["nodered".to_string(), "Node-RED".to_string(), "automation".to_string()],
        ];
        let table = format_table(["NAME", "DISPLAY NAME", "TAGS"], &rows);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        let name_col = lines[1].find("Eclipse").expect("display column");
        assert_eq!(lines[2].find("Node-RED"), Some(name_col));
    }

    #[test]
    fn empty_table_is_just_the_header() {
        let table = format_table(["A", "B", "C"], &[]);
        assert_eq!(table.lines().count(), 1);
    }
}
