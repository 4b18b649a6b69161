/// A simple text-based table generator for Telegram messages using code blocks
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
    right_aligned: Vec<bool>,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths = headers.iter().map(|h| h.len()).collect();
        let right_aligned = vec![false; headers.len()];
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            headers,
            rows: Vec::new(),
            col_widths,
            right_aligned,
        }
    }

    /// Right-align a column (for numeric data)
    pub fn align_right(mut self, column: usize) -> Self {
        if column < self.right_aligned.len() {
            self.right_aligned[column] = true;
        }
        self
    }

    /// Add a row to the table
    pub fn add_row(&mut self, row: Vec<&str>) {
        let row_strings: Vec<String> = row.iter().map(|s| s.to_string()).collect();

        // Update column widths if needed
        for (i, col) in row_strings.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(col.len());
            }
        }

        self.rows.push(row_strings);
    }

    /// Render the table as a monospace block for Telegram
    pub fn render(&self) -> String {
        let mut output = String::from("```\n");

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');

        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output.push_str("```");
        output
    }

    /// Render a single row with proper spacing
    fn render_row(&self, row: &[String]) -> String {
        let mut line = String::new();
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                let width = self.col_widths[i];
                if self.right_aligned[i] {
                    line.push_str(&format!("{:>width$}", col, width = width));
                } else {
                    line.push_str(&format!("{:<width$}", col, width = width));
                }
                if i < row.len() - 1 {
                    line.push_str(" | ");
                }
            }
        }
        line
    }

    /// Render a separator line
    fn render_separator(&self) -> String {
        let mut line = String::new();
        for (i, &width) in self.col_widths.iter().enumerate() {
            line.push_str(&"-".repeat(width));
            if i < self.col_widths.len() - 1 {
                line.push_str("-+-");
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(vec!["Merchant", "Rate", "Orders"]);
        table.add_row(vec!["AddisTrader", "145.50", "412"]);
        table.add_row(vec!["BoleFx", "145.20", "98"]);

        let rendered = table.render();
        assert!(rendered.starts_with("```\n"));
        assert!(rendered.contains("Merchant"));
        assert!(rendered.contains("AddisTrader"));
        assert!(rendered.contains("BoleFx"));
    }

    #[test]
    fn test_right_alignment() {
        let mut table = Table::new(vec!["Name", "Rate"]).align_right(1);
        table.add_row(vec!["a", "1.00"]);
        table.add_row(vec!["b", "145.50"]);

        let rendered = table.render();
        assert!(rendered.contains("  1.00"));
    }
}
