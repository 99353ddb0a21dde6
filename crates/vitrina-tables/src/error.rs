//! Error types for the sortable table

use thiserror::Error;
use vitrina_conf::SettingsError;
use vitrina_http::FetchError;

/// Errors surfaced to callers of the table.
///
/// Network and decode failures during loads are not returned here; the table
/// absorbs them and reports them to its diagnostic sink.
#[derive(Debug, Error)]
pub enum TableError {
	/// A sortable column declares a sort type the table cannot compare by.
	#[error("Unknown sort type: {0}")]
	InvalidSortType(String),

	/// The requested order is neither `asc` nor `desc`.
	#[error("There is no order for {0}")]
	InvalidSortOrder(String),

	/// The endpoint cannot be resolved against the base URL.
	#[error("Invalid endpoint: {0}")]
	InvalidUrl(#[from] url::ParseError),

	/// The backend settings are unusable.
	#[error(transparent)]
	Settings(#[from] SettingsError),

	/// The HTTP client could not be created.
	#[error(transparent)]
	Fetch(#[from] FetchError),
}

/// Result type alias for table operations.
pub type TableResult<T> = Result<T, TableError>;
