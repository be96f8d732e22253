//! nbgrid core library - HTML summary grids for notebook reports
//!
//! Renders images, tables, and text files into an HTML grid for display in a
//! notebook, and manages the registry of notebooks re-executed by the git
//! pre-commit hook.

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Rendering is a pure, single-pass transform; any failure aborts the call
// - No shared mutable state across render calls
// - Flattening and chunking preserve element order and never truncate or pad
// - File-extension dispatch is exact and case-sensitive
// - git and jupyter are external collaborators invoked as subprocesses

pub mod block;
pub mod content;
pub mod git;
pub mod grid;
pub mod hook;
pub mod html;
pub mod notebook;
pub mod registry;
pub mod table;

pub use block::{csv_file, empty, image, plaintext, table, textfile, tsv_file, Block};
pub use content::{Cell, Entry};
pub use grid::{chunk, chunks, flatten, Shape};
pub use html::{render, render_with, RenderOptions};
pub use table::DataTable;
