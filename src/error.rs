//! Facade error type

use thiserror::Error;

/// Errors raised while wiring widgets together.
#[derive(Debug, Error)]
pub enum Error {
	/// Settings could not be loaded or are invalid.
	#[error(transparent)]
	Settings(#[from] vitrina_conf::SettingsError),

	/// The tracing subscriber could not be installed.
	#[error(transparent)]
	Logging(#[from] vitrina_core::LoggingError),

	/// The HTTP client could not be created.
	#[error(transparent)]
	Fetch(#[from] vitrina_http::FetchError),

	/// A table operation failed.
	#[cfg(feature = "tables")]
	#[error(transparent)]
	Table(#[from] vitrina_tables::TableError),

	/// A chart operation failed.
	#[cfg(feature = "charts")]
	#[error(transparent)]
	Chart(#[from] vitrina_charts::ChartError),
}

/// Result type alias for facade operations.
pub type Result<T> = std::result::Result<T, Error>;
