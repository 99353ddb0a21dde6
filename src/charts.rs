//! Column chart.
//!
//! # Examples
//!
//! ```rust,no_run
//! use vitrina::charts::{ColumnChart, ColumnChartOptions};
//! ```

pub use vitrina_charts::*;
