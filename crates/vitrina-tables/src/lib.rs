//! Sortable data grid
//!
//! A [`SortableTable`] renders a column schema into a headless element tree
//! and keeps it in sync with its records. It runs in one of two modes:
//!
//! - **local**: records are supplied up front and sorted in memory
//! - **remote**: records are fetched page by page from an endpoint, sorted by
//!   the server (`_sort`, `_order`) and appended as the user scrolls
//!   (`_start`, `_end`)
//!
//! Remote loads are tagged with an epoch. A sort started while a page append
//! is in flight wins: the append's completion is dropped.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vitrina_core::Window;
//! use vitrina_tables::{ColumnSpec, SortOrder, SortType, SortableTable, TableConfig, TableContext};
//!
//! let window = Arc::new(Window::new());
//! let ctx = TableContext::from_settings(&settings.backend, window.clone())?;
//! let schema = vec![
//!     ColumnSpec::new("title", "Name").sortable(SortType::String),
//!     ColumnSpec::new("price", "Price").sortable(SortType::Number),
//! ];
//! let config = TableConfig::from_settings(&settings.tables)
//!     .with_url("api/rest/products")
//!     .sorted_by("title", SortOrder::Asc);
//!
//! let table = SortableTable::create(schema, config, ctx).await?;
//! table.on_header_click("price").await?;
//! ```

#![warn(missing_docs)]

pub mod collation;
pub mod context;
pub mod error;
pub mod params;
pub mod schema;
pub mod sorting;
pub mod table;
pub mod view;

pub use context::TableContext;
pub use error::{TableError, TableResult};
pub use params::QueryParams;
pub use schema::{CellTemplate, ColumnSpec};
pub use sorting::{SortOrder, SortType, sort_records};
pub use table::{InitialSort, SortableTable, TableConfig};
pub use view::TableView;
