//! Renderable blocks
//!
//! Each block is a small value object holding the data it needs to render
//! (a resolved image path, a loaded table, file contents) plus a `render`
//! operation taking the shared width/height budget.
//!
//! Global invariants enforced:
//! - Rendering is pure: no filesystem access after construction
//! - Identical block and budget yield byte-for-byte identical HTML

use crate::table::DataTable;
use anyhow::{Context, Result};
use std::path::Path;

/// A renderable grid cell: `(max_width, max_height)` in pixels to an HTML fragment.
///
/// `None` (or zero) means "no cap" and renders as CSS `inherit` so the browser
/// falls back to natural/container sizing.
pub trait Block {
    fn render(&self, max_width: Option<u32>, max_height: Option<u32>) -> String;
}

/// Convert an optional pixel budget to a CSS length.
///
/// Unset or zero budgets become `inherit`; everything else becomes `"<n>px"`.
fn px_or_inherit(value: Option<u32>) -> String {
    match value {
        None | Some(0) => "inherit".to_string(),
        Some(n) => format!("{}px", n),
    }
}

/// An image referenced by path.
///
/// The path is rewritten relative to the current working directory at
/// construction time, since the HTML consumer (a browser viewing the notebook
/// file) cannot resolve absolute paths like `/home/...`. The file is never
/// opened or validated; a missing image simply renders as a broken `<img>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlock {
    src: String,
}

impl ImageBlock {
    pub fn new(src: impl AsRef<Path>) -> Self {
        ImageBlock {
            src: relative_to_cwd(src.as_ref()),
        }
    }
}

impl Block for ImageBlock {
    fn render(&self, max_width: Option<u32>, max_height: Option<u32>) -> String {
        format!(
            r#"<img src="{}" style="max-width: {}; max-height: {};" />"#,
            self.src,
            px_or_inherit(max_width),
            px_or_inherit(max_height)
        )
    }
}

/// Rewrite a path relative to the current working directory.
///
/// Falls back to the path as given when the working directory is unavailable
/// or on a different prefix (Windows drive letters).
fn relative_to_cwd(path: &Path) -> String {
    let as_given = || path.to_string_lossy().into_owned();
    let Ok(cwd) = std::env::current_dir() else {
        return as_given();
    };
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    match pathdiff::diff_paths(&absolute, &cwd) {
        Some(relative) => relative.to_string_lossy().into_owned(),
        None => as_given(),
    }
}

/// A loaded tabular dataset. Ignores the sizing budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    table: DataTable,
}

impl TableBlock {
    pub fn new(table: DataTable) -> Self {
        TableBlock { table }
    }
}

impl Block for TableBlock {
    fn render(&self, _max_width: Option<u32>, _max_height: Option<u32>) -> String {
        self.table.to_html()
    }
}

/// Preformatted text, emitted verbatim inside `<pre>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    text: String,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        TextBlock { text: text.into() }
    }
}

impl Block for TextBlock {
    fn render(&self, _max_width: Option<u32>, _max_height: Option<u32>) -> String {
        format!("<pre>{}</pre>", self.text)
    }
}

/// An empty separator block.
///
/// With no explicit width it falls back to the caller-supplied budget; an
/// explicit width wins over the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyBlock {
    width: Option<u32>,
}

impl EmptyBlock {
    pub fn new(width: Option<u32>) -> Self {
        EmptyBlock { width }
    }
}

impl Block for EmptyBlock {
    fn render(&self, max_width: Option<u32>, _max_height: Option<u32>) -> String {
        let effective = self.width.filter(|w| *w > 0).or(max_width);
        let width = match effective {
            None | Some(0) => "inherit".to_string(),
            Some(n) => format!("{}px", n),
        };
        format!(r#"<div style="min-width: {};"></div>"#, width)
    }
}

/// Render an image by filename.
pub fn image(src: impl AsRef<Path>) -> ImageBlock {
    ImageBlock::new(src)
}

/// Render a loaded table.
pub fn table(table: DataTable) -> TableBlock {
    TableBlock::new(table)
}

/// Render plain text.
pub fn plaintext(text: impl Into<String>) -> TextBlock {
    TextBlock::new(text)
}

/// Create an empty separator block, optionally with a fixed width.
pub fn empty(width: Option<u32>) -> EmptyBlock {
    EmptyBlock::new(width)
}

/// Read a comma-delimited file and render it as a table.
pub fn csv_file(path: impl AsRef<Path>) -> Result<TableBlock> {
    Ok(TableBlock::new(DataTable::from_path(path.as_ref(), b',')?))
}

/// Read a tab-delimited file and render it as a table.
pub fn tsv_file(path: impl AsRef<Path>) -> Result<TableBlock> {
    Ok(TableBlock::new(DataTable::from_path(path.as_ref(), b'\t')?))
}

/// Read a text file eagerly and render its full contents as plain text.
pub fn textfile(path: impl AsRef<Path>) -> Result<TextBlock> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read text file: {}", path.display()))?;
    Ok(TextBlock::new(text))
}
