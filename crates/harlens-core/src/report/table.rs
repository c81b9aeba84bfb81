use crate::analysis::FrequencyMap;

/// Rows shown before a table is cut off
pub const MAX_TABLE_ROWS: usize = 20;

/// Printed instead of a table when a section has nothing to show
pub const NO_DATA: &str = "_No data_";

/// Markdown table that caps its output at [`MAX_TABLE_ROWS`] rows
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a two-column table from the entries whose count exceeds `min_count`,
    /// most frequent first
    pub fn from_frequencies(
        items: &FrequencyMap,
        name_header: &str,
        count_header: &str,
        min_count: usize,
    ) -> Self {
        let mut sorted: Vec<(&String, usize)> = items
            .iter()
            .filter(|(_, count)| **count > min_count)
            .map(|(name, count)| (name, *count))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));

        let mut table = Self::new(&[name_header, count_header]);
        for (name, count) in sorted {
            table.push_row(vec![escape_cell(name), count.to_string()]);
        }
        table
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append the table (or the no-data marker) followed by a blank line
    pub fn render_into(&self, out: &mut String) {
        if self.rows.is_empty() {
            out.push_str(NO_DATA);
            out.push_str("\n\n");
            return;
        }

        out.push_str(&format_row(&self.headers));
        out.push_str(&format_row(
            &self.headers.iter().map(|_| "------".to_string()).collect::<Vec<_>>(),
        ));

        for row in self.rows.iter().take(MAX_TABLE_ROWS) {
            out.push_str(&format_row(row));
        }

        if self.rows.len() > MAX_TABLE_ROWS {
            let columns = self.headers.len();
            out.push_str(&format_row(&vec!["...".to_string(); columns]));

            let mut total = vec![String::new(); columns];
            total[0] = format!("**Total**: {} items", self.rows.len());
            out.push_str(&format_row(&total));
        }

        out.push('\n');
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

fn format_row(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}

/// Keep cell text from breaking the table layout
pub(crate) fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
