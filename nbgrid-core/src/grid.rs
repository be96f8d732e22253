//! Shape normalization
//!
//! Turns arbitrarily nested user input into a rectangular-ish grid: flatten
//! depth-unbounded preserving left-to-right order, then re-chunk into rows of
//! a fixed column count. Every row except possibly the last has the same
//! length; the last row may be a shorter remainder.
//!
//! Global invariants enforced:
//! - Flattening preserves element order
//! - Chunking never truncates or pads; a shape mismatch is an error
//! - Re-chunking a correctly shaped grid is the identity

use crate::content::{Cell, Entry};
use anyhow::{bail, Result};

/// Desired grid shape: a bare column count (rows computed, short remainder
/// row allowed) or explicit (rows, columns) which must match the entry count
/// exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Columns(usize),
    Dims(usize, usize),
}

impl Shape {
    /// Build a shape from a dimension slice: `[c]` behaves like a bare column
    /// count, `[r, c]` is explicit. More than two dimensions is an error.
    pub fn from_dims(dims: &[usize]) -> Result<Shape> {
        match dims {
            [] => bail!("shape must have at least one dimension"),
            [columns] => Ok(Shape::Columns(*columns)),
            [rows, columns] => Ok(Shape::Dims(*rows, *columns)),
            _ => bail!("only 2D shapes are supported (got {} dimensions)", dims.len()),
        }
    }

    fn columns(&self) -> usize {
        match self {
            Shape::Columns(c) => *c,
            Shape::Dims(_, c) => *c,
        }
    }
}

impl From<usize> for Shape {
    fn from(columns: usize) -> Shape {
        Shape::Columns(columns)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, columns): (usize, usize)) -> Shape {
        Shape::Dims(rows, columns)
    }
}

/// Flatten nested entries into one ordered sequence of cells.
///
/// Descends into lists at any depth; cells (including file references, whose
/// paths are atomic strings) are leaves.
pub fn flatten(entry: Entry) -> Vec<Cell> {
    let mut cells = Vec::new();
    flatten_into(entry, &mut cells);
    cells
}

fn flatten_into(entry: Entry, cells: &mut Vec<Cell>) {
    match entry {
        Entry::Cell(cell) => cells.push(cell),
        Entry::List(items) => {
            for item in items {
                flatten_into(item, cells);
            }
        }
    }
}

/// Split a flat sequence into consecutive rows of `shape.columns()` items.
///
/// With an explicit (rows, columns) shape the product must equal the item
/// count. With a bare column count the final row may be a shorter remainder.
/// A zero column count is a caller error.
pub fn chunk<T>(items: Vec<T>, shape: Shape) -> Result<Vec<Vec<T>>> {
    let n_col = shape.columns();
    if n_col == 0 {
        bail!("column count must be nonzero");
    }
    if let Shape::Dims(rows, columns) = shape {
        if rows * columns != items.len() {
            bail!(
                "shape ({}, {}) does not match {} entries",
                rows,
                columns,
                items.len()
            );
        }
    }

    let mut reshaped = Vec::with_capacity(items.len().div_ceil(n_col));
    let mut row = Vec::with_capacity(n_col);
    for item in items {
        row.push(item);
        if row.len() == n_col {
            reshaped.push(std::mem::replace(&mut row, Vec::with_capacity(n_col)));
        }
    }
    if !row.is_empty() {
        // remainder forms one final short row
        reshaped.push(row);
    }
    Ok(reshaped)
}

/// Flatten nested entries and re-chunk them into the requested shape.
pub fn chunks(entries: impl Into<Entry>, shape: impl Into<Shape>) -> Result<Vec<Vec<Cell>>> {
    chunk(flatten(entries.into()), shape.into())
}

/// Normalize input to rows-of-cells without an explicit shape.
///
/// Three-way classification:
/// - a bare cell becomes a single one-cell row
/// - a flat list (no nested element) becomes the columns of a single row
/// - a list containing any nested list is taken as rows; each row is
///   flattened, and a bare cell among the rows becomes a one-cell row
pub fn ensure_rows(entry: Entry) -> Vec<Vec<Cell>> {
    match entry {
        Entry::Cell(cell) => vec![vec![cell]],
        Entry::List(items) => {
            let nested = items.iter().any(|item| matches!(item, Entry::List(_)));
            if nested {
                items.into_iter().map(flatten).collect()
            } else {
                vec![items
                    .into_iter()
                    .map(|item| match item {
                        Entry::Cell(cell) => cell,
                        Entry::List(_) => unreachable!("checked flat above"),
                    })
                    .collect()]
            }
        }
    }
}
