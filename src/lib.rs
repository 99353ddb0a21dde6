//! # Vitrina
//!
//! Headless storefront widgets: a sortable data grid with remote, scroll-driven
//! pagination and a fixed-height column chart. Widgets render into an element
//! tree that can be inspected or serialized to HTML.
//!
//! ## Feature Flags
//!
//! - `tables` - [`SortableTable`] and its column schema
//! - `charts` - [`ColumnChart`]
//! - `full` (default) - everything
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use vitrina::prelude::*;
//!
//! let settings = vitrina::conf::load_settings(Some("vitrina.toml".as_ref()))?;
//! vitrina::init_tracing(&settings.logging)?;
//!
//! let storefront = Storefront::new(settings)?;
//! let products = SortableTable::create(
//!     vec![
//!         ColumnSpec::new("title", "Name").sortable(SortType::String),
//!         ColumnSpec::new("price", "Price").sortable(SortType::Number),
//!     ],
//!     storefront.table_config().with_url("api/rest/products"),
//!     storefront.table_context(),
//! )
//! .await?;
//!
//! // Forward document scroll events.
//! storefront.window().dispatch_scroll(ScrollMetrics::new(1200.0, 900.0)).await;
//! ```

pub mod conf;
pub mod error;
pub mod storefront;

#[cfg(feature = "charts")]
pub mod charts;
#[cfg(feature = "tables")]
pub mod tables;

pub use error::{Error, Result};
pub use storefront::Storefront;

pub use vitrina_conf::Settings;
pub use vitrina_core::{
	DiagnosticSink, Element, MemorySink, ScrollMetrics, TracingSink, Window, create_getter,
	init_tracing,
};
pub use vitrina_http::{FetchError, FetchJson, ReqwestFetcher};

#[cfg(feature = "charts")]
pub use vitrina_charts::{ColumnChart, ColumnChartOptions, DateRange};
#[cfg(feature = "tables")]
pub use vitrina_tables::{ColumnSpec, SortOrder, SortType, SortableTable, TableConfig};

/// Commonly used types.
pub mod prelude {
	pub use crate::Storefront;
	pub use vitrina_core::{ScrollMetrics, Window, create_getter};

	#[cfg(feature = "charts")]
	pub use vitrina_charts::{ColumnChart, ColumnChartOptions, DateRange};
	#[cfg(feature = "tables")]
	pub use vitrina_tables::{ColumnSpec, InitialSort, SortOrder, SortType, SortableTable};
}
