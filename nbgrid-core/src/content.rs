//! Cell content resolution
//!
//! A grid cell is either a prebuilt block or a file reference resolved by
//! extension at render time. The dispatch table is exact and case-sensitive:
//! `.csv` and `.tsv` load tables, `.txt` loads plain text, anything else
//! (including no extension) is treated as an image.

use crate::block::{self, Block, EmptyBlock, ImageBlock, TableBlock, TextBlock};
use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// A single grid cell before resolution.
pub enum Cell {
    /// A ready-made renderer, passed through unchanged.
    Prebuilt(Box<dyn Block>),
    /// A filename to be resolved by extension.
    File(PathBuf),
}

impl Cell {
    /// Wrap a ready-made block.
    pub fn prebuilt(block: impl Block + 'static) -> Cell {
        Cell::Prebuilt(Box::new(block))
    }

    /// The referenced path, if this cell is a file reference.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Cell::Prebuilt(_) => None,
            Cell::File(path) => Some(path),
        }
    }

    /// Resolve this cell to a renderer.
    ///
    /// Table and text references read their backing file here and fail fast
    /// on a missing or malformed file. Image references never touch the
    /// filesystem.
    pub fn resolve(self) -> Result<Box<dyn Block>> {
        match self {
            Cell::Prebuilt(block) => Ok(block),
            Cell::File(path) => resolve_file(&path),
        }
    }
}

fn resolve_file(path: &Path) -> Result<Box<dyn Block>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => Ok(Box::new(block::csv_file(path)?)),
        Some("tsv") => Ok(Box::new(block::tsv_file(path)?)),
        Some("txt") => Ok(Box::new(block::textfile(path)?)),
        _ => Ok(Box::new(block::image(path))),
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Prebuilt(_) => f.write_str("Cell::Prebuilt(..)"),
            Cell::File(path) => write!(f, "Cell::File({})", path.display()),
        }
    }
}

impl From<&str> for Cell {
    fn from(path: &str) -> Cell {
        Cell::File(PathBuf::from(path))
    }
}

impl From<String> for Cell {
    fn from(path: String) -> Cell {
        Cell::File(PathBuf::from(path))
    }
}

impl From<PathBuf> for Cell {
    fn from(path: PathBuf) -> Cell {
        Cell::File(path)
    }
}

impl From<Box<dyn Block>> for Cell {
    fn from(block: Box<dyn Block>) -> Cell {
        Cell::Prebuilt(block)
    }
}

impl From<ImageBlock> for Cell {
    fn from(block: ImageBlock) -> Cell {
        Cell::prebuilt(block)
    }
}

impl From<TableBlock> for Cell {
    fn from(block: TableBlock) -> Cell {
        Cell::prebuilt(block)
    }
}

impl From<TextBlock> for Cell {
    fn from(block: TextBlock) -> Cell {
        Cell::prebuilt(block)
    }
}

impl From<EmptyBlock> for Cell {
    fn from(block: EmptyBlock) -> Cell {
        Cell::prebuilt(block)
    }
}

/// Arbitrarily nested user input: a single cell or a list of entries.
///
/// Strings are atomic (they become file-reference cells, never lists).
#[derive(Debug)]
pub enum Entry {
    Cell(Cell),
    List(Vec<Entry>),
}

impl From<Cell> for Entry {
    fn from(cell: Cell) -> Entry {
        Entry::Cell(cell)
    }
}

impl From<&str> for Entry {
    fn from(path: &str) -> Entry {
        Entry::Cell(Cell::from(path))
    }
}

impl From<String> for Entry {
    fn from(path: String) -> Entry {
        Entry::Cell(Cell::from(path))
    }
}

impl From<PathBuf> for Entry {
    fn from(path: PathBuf) -> Entry {
        Entry::Cell(Cell::from(path))
    }
}

impl From<ImageBlock> for Entry {
    fn from(block: ImageBlock) -> Entry {
        Entry::Cell(Cell::prebuilt(block))
    }
}

impl From<TableBlock> for Entry {
    fn from(block: TableBlock) -> Entry {
        Entry::Cell(Cell::prebuilt(block))
    }
}

impl From<TextBlock> for Entry {
    fn from(block: TextBlock) -> Entry {
        Entry::Cell(Cell::prebuilt(block))
    }
}

impl From<EmptyBlock> for Entry {
    fn from(block: EmptyBlock) -> Entry {
        Entry::Cell(Cell::prebuilt(block))
    }
}

impl<T: Into<Entry>> From<Vec<T>> for Entry {
    fn from(items: Vec<T>) -> Entry {
        Entry::List(items.into_iter().map(Into::into).collect())
    }
}
