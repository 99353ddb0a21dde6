//! Error types for settings loading and validation

use thiserror::Error;

/// Errors that can occur while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The TOML source could not be parsed.
	#[error("Parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// A setting holds a value outside its allowed range.
	#[error("Invalid value for {key}: {message}")]
	InvalidValue {
		/// Setting key, dotted by section (e.g. `tables.page_size`).
		key: String,
		/// Why the value was rejected.
		message: String,
	},

	/// The settings file could not be read.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

impl SettingsError {
	pub(crate) fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			key: key.into(),
			message: message.into(),
		}
	}
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
