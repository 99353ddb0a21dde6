//! Sortable data grid.
//!
//! # Examples
//!
//! ```rust,no_run
//! use vitrina::tables::{ColumnSpec, SortType, TableConfig};
//! ```

pub use vitrina_tables::*;
