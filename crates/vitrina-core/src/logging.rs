//! Process-wide `tracing` subscriber setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use vitrina_conf::LoggingSettings;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
	/// The configured filter directive could not be parsed.
	#[error("Invalid log filter: {0}")]
	InvalidFilter(String),

	/// A global subscriber is already installed.
	#[error("Subscriber already initialized: {0}")]
	AlreadyInitialized(String),
}

/// Installs a fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `settings.level` is used as the filter.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), LoggingError> {
	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(&settings.level)
			.map_err(|e| LoggingError::InvalidFilter(e.to_string()))?,
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(true)
		.try_init()
		.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}
