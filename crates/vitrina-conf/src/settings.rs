//! Settings sections and their defaults

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Backend every relative widget endpoint is resolved against.
pub const DEFAULT_BASE_URL: &str = "https://course-js.javascript.ru";

/// Top-level settings container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Remote backend settings.
	pub backend: BackendSettings,
	/// Sortable table settings.
	pub tables: TableSettings,
	/// Column chart settings.
	pub charts: ChartSettings,
	/// Logging settings.
	pub logging: LoggingSettings,
}

/// Remote backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
	/// Absolute base URL.
	pub base_url: String,
	/// Per-request timeout in seconds.
	pub request_timeout_secs: u64,
}

impl Default for BackendSettings {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			request_timeout_secs: 30,
		}
	}
}

impl BackendSettings {
	/// Parses the configured base URL.
	pub fn base_url(&self) -> SettingsResult<Url> {
		let url = Url::parse(&self.base_url)
			.map_err(|e| SettingsError::invalid("backend.base_url", e.to_string()))?;
		if url.cannot_be_a_base() {
			return Err(SettingsError::invalid(
				"backend.base_url",
				"must be an absolute hierarchical URL",
			));
		}
		Ok(url)
	}

	/// Returns the request timeout as a [`Duration`].
	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}
}

/// Sortable table settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
	/// Rows requested per page.
	pub page_size: usize,
	/// Distance in pixels from the document bottom that counts as "near bottom".
	pub scroll_border_y: f64,
}

impl Default for TableSettings {
	fn default() -> Self {
		Self {
			page_size: 10,
			scroll_border_y: 300.0,
		}
	}
}

/// Column chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
	/// Height the tallest bar is scaled to.
	pub height: u32,
}

impl Default for ChartSettings {
	fn default() -> Self {
		Self { height: 50 }
	}
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// Default filter directive used when `RUST_LOG` is not set.
	pub level: String,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
		}
	}
}

impl Settings {
	/// Parses settings from TOML text. Missing sections keep their defaults.
	pub fn from_toml_str(source: &str) -> SettingsResult<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Reads and parses a TOML settings file.
	pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let source = std::fs::read_to_string(path)?;
		Self::from_toml_str(&source)
	}

	/// Checks cross-field constraints.
	pub fn validate(&self) -> SettingsResult<()> {
		self.backend.base_url()?;
		if self.tables.page_size == 0 {
			return Err(SettingsError::invalid(
				"tables.page_size",
				"must be greater than zero",
			));
		}
		if !self.tables.scroll_border_y.is_finite() || self.tables.scroll_border_y < 0.0 {
			return Err(SettingsError::invalid(
				"tables.scroll_border_y",
				"must be a non-negative number of pixels",
			));
		}
		if self.charts.height == 0 {
			return Err(SettingsError::invalid(
				"charts.height",
				"must be greater than zero",
			));
		}
		Ok(())
	}
}
