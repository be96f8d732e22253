//! HTML grid assembly
//!
//! Walks normalized rows, resolves each cell, invokes it with the shared
//! width/height budget, and concatenates the markup into one `<table>`.
//! Single pass, no partial-failure handling: the first unresolvable cell
//! aborts the whole render.
//!
//! Header values are trimmed and inserted verbatim (no escaping); table cell
//! text is escaped upstream during table loading.

use crate::content::{Cell, Entry};
use crate::grid::ensure_rows;
use anyhow::Result;

/// Options for a render call.
///
/// The width/height budget defaults to 800px each; `None` disables the cap
/// and lets the browser size content naturally.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub headers: Option<Vec<String>>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            headers: None,
            max_width: Some(800),
            max_height: Some(800),
        }
    }
}

impl RenderOptions {
    pub fn headers(mut self, headers: Vec<impl Into<String>>) -> Self {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    pub fn max_width(mut self, max_width: Option<u32>) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn max_height(mut self, max_height: Option<u32>) -> Self {
        self.max_height = max_height;
        self
    }
}

/// Render entries into an HTML grid with default options.
pub fn render(entries: impl Into<Entry>) -> Result<String> {
    render_with(entries, RenderOptions::default())
}

/// Render entries into an HTML grid.
///
/// Input that is not already rows-of-cells is normalized first: a single
/// value becomes one cell, a flat list becomes the columns of a single row.
pub fn render_with(entries: impl Into<Entry>, options: RenderOptions) -> Result<String> {
    let rows = ensure_rows(entries.into());
    make_html(
        rows,
        options.headers.as_deref(),
        options.max_width,
        options.max_height,
    )
}

/// Assemble normalized rows into one `<table>` string.
pub fn make_html(
    rows: Vec<Vec<Cell>>,
    headers: Option<&[String]>,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> Result<String> {
    let mut row_html = Vec::with_capacity(rows.len());
    for row in rows {
        let mut cell_html = Vec::with_capacity(row.len());
        for cell in row {
            let block = cell.resolve()?;
            cell_html.push(wrap_in_column(&block.render(max_width, max_height)));
        }
        row_html.push(wrap_in_row(&cell_html.join("\n")));
    }

    Ok(format!(
        "<table>{}{}</table>",
        make_headers(headers),
        row_html.join("\n")
    ))
}

fn wrap_in_column(contents: &str) -> String {
    format!(r#"<td style="text-align: center">{}</td>"#, contents)
}

fn wrap_in_row(contents: &str) -> String {
    format!("<tr>{}</tr>", contents)
}

/// One header cell per value, trimmed, inserted verbatim.
fn make_headers(headers: Option<&[String]>) -> String {
    match headers {
        None => String::new(),
        Some(headers) => {
            let cells: Vec<String> = headers
                .iter()
                .map(|header| {
                    format!(
                        r#"<th style="text-align: center">{}</th>"#,
                        header.trim()
                    )
                })
                .collect();
            format!("<tr>{}</tr>", cells.join("\n"))
        }
    }
}
