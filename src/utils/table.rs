/// A record that renders as one table row
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

/// A simple text-based table for terminal output
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new(headers: &[&str]) -> Self {
        let col_widths = headers.iter().map(|h| h.chars().count()).collect();
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            headers,
            rows: Vec::new(),
            col_widths,
        }
    }

    /// Build a table from records
    pub fn from_rows<R: TableRow>(records: &[R]) -> Self {
        let mut table = Table::new(R::headers());
        for record in records {
            table.add_row(record.cells());
        }
        table
    }

    /// Add a row; cells beyond the header count are dropped
    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(col.chars().count());
            }
        }

        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table with a header separator
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');

        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output
    }

    /// Render a single row with proper spacing
    fn render_row(&self, row: &[String]) -> String {
        let cells: Vec<String> = self
            .col_widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let col = row.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", col, width = width)
            })
            .collect();
        cells.join(" | ").trim_end().to_string()
    }

    /// Render a separator line
    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(&["ID", "Beneficiary", "Status"]);
        table.add_row(vec!["#1".into(), "Mario Rossi".into(), "CREATED".into()]);
        table.add_row(vec!["#22".into(), "Anna".into(), "COMPLETED".into()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "ID  | Beneficiary | Status");
        assert_eq!(lines[1], "----+-------------+----------");
        assert_eq!(lines[2], "#1  | Mario Rossi | CREATED");
        assert_eq!(lines[3], "#22 | Anna        | COMPLETED");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(vec!["x".into()]);
        assert!(!table.is_empty());
        assert!(table.render().contains("x |"));
    }
}
