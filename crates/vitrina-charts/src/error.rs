//! Error types for the column chart

use thiserror::Error;
use vitrina_conf::SettingsError;
use vitrina_http::FetchError;

/// Errors raised by chart updates.
#[derive(Debug, Error)]
pub enum ChartError {
	/// The chart was built without an endpoint and cannot be updated.
	#[error("Chart has no endpoint to fetch from")]
	MissingEndpoint,

	/// The endpoint cannot be resolved against the base URL.
	#[error("Invalid endpoint: {0}")]
	InvalidUrl(#[from] url::ParseError),

	/// The backend settings are unusable.
	#[error(transparent)]
	Settings(#[from] SettingsError),

	/// Fetching or decoding the series failed.
	#[error(transparent)]
	Fetch(#[from] FetchError),
}

/// Result type alias for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;
