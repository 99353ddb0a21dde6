//! Column chart
//!
//! A fixed-height bar column rendered from a numeric series. Given an
//! endpoint, [`ColumnChart::update`] fetches the series for a date range
//! (`?from=YYYY-MM-DD&to=YYYY-MM-DD`) and redraws; without one the chart shows
//! the series it was built with.

#![warn(missing_docs)]

pub mod chart;
pub mod error;

pub use chart::{ChartContext, ColumnChart, ColumnChartOptions, DateRange, HeadingFormatter, column_props};
pub use error::{ChartError, ChartResult};
