//! Delimited table loading and HTML conversion
//!
//! Loads flat CSV/TSV files into an in-memory table and converts them to an
//! HTML `<table>`. This is the one place cell text is HTML-escaped; the grid
//! assembler inserts its own fragments verbatim.

use anyhow::{Context, Result};
use std::path::Path;

/// A loaded delimited table: one header row plus data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Load a table from a delimited file.
    ///
    /// The first record is taken as the header row. A missing or malformed
    /// file surfaces the underlying read error; nothing is swallowed.
    pub fn from_path(path: &Path, delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("failed to read table: {}", path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("failed to read table headers: {}", path.display()))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .with_context(|| format!("malformed table record: {}", path.display()))?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }

        Ok(DataTable { headers, rows })
    }

    /// Subset the table to the named columns, in the order given.
    ///
    /// Fails if any requested column is absent.
    pub fn select(&self, columns: &[&str]) -> Result<DataTable> {
        let mut indices = Vec::with_capacity(columns.len());
        for name in columns {
            let index = self
                .headers
                .iter()
                .position(|h| h == name)
                .with_context(|| format!("no such column: {}", name))?;
            indices.push(index);
        }

        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(DataTable {
            headers: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// Convert to an HTML table with escaped header and cell text.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<table>\n<thead>\n<tr>");
        for header in &self.headers {
            html.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");
        for row in &self.rows {
            html.push_str("<tr>");
            for field in row {
                html.push_str(&format!("<td>{}</td>", escape_html(field)));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>");
        html
    }
}

/// Escape the characters HTML treats specially in text content.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        write!(file, "{}", contents).expect("write temp file");
        file
    }

    #[test]
    fn test_load_csv() {
        let file = write_file("name,score\nalpha,1\nbeta,2\n");
        let table = DataTable::from_path(file.path(), b',').expect("load csv");
        assert_eq!(table.headers, vec!["name", "score"]);
        assert_eq!(
            table.rows,
            vec![vec!["alpha", "1"], vec!["beta", "2"]]
        );
    }

    #[test]
    fn test_load_tsv() {
        let file = write_file("name\tscore\nalpha\t1\n");
        let table = DataTable::from_path(file.path(), b'\t').expect("load tsv");
        assert_eq!(table.headers, vec!["name", "score"]);
        assert_eq!(table.rows, vec![vec!["alpha", "1"]]);
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(DataTable::from_path(Path::new("no/such/table.csv"), b',').is_err());
    }

    #[test]
    fn test_select_columns() {
        let file = write_file("a,b,c\n1,2,3\n");
        let table = DataTable::from_path(file.path(), b',').expect("load csv");
        let subset = table.select(&["c", "a"]).expect("select");
        assert_eq!(subset.headers, vec!["c", "a"]);
        assert_eq!(subset.rows, vec![vec!["3", "1"]]);
        assert!(table.select(&["missing"]).is_err());
    }

    #[test]
    fn test_to_html_escapes_cells() {
        let table = DataTable {
            headers: vec!["col<1>".to_string()],
            rows: vec![vec!["a & b".to_string()]],
        };
        let html = table.to_html();
        assert!(html.contains("<th>col&lt;1&gt;</th>"));
        assert!(html.contains("<td>a &amp; b</td>"));
    }
}
