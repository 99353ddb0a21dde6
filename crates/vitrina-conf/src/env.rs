//! Environment variable overrides
//!
//! Recognised variables (all prefixed with [`ENV_PREFIX`]):
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `VITRINA_BASE_URL` | `backend.base_url` |
//! | `VITRINA_REQUEST_TIMEOUT_SECS` | `backend.request_timeout_secs` |
//! | `VITRINA_PAGE_SIZE` | `tables.page_size` |
//! | `VITRINA_SCROLL_BORDER_Y` | `tables.scroll_border_y` |
//! | `VITRINA_CHART_HEIGHT` | `charts.height` |
//! | `VITRINA_LOG_LEVEL` | `logging.level` |
//!
//! Unknown variables with the prefix are ignored.

use crate::error::{SettingsError, SettingsResult};
use crate::settings::Settings;
use std::str::FromStr;

/// Prefix shared by every recognised environment variable.
pub const ENV_PREFIX: &str = "VITRINA_";

fn parse<T>(key: &str, value: &str) -> SettingsResult<T>
where
	T: FromStr,
	T::Err: std::fmt::Display,
{
	value
		.trim()
		.parse::<T>()
		.map_err(|e| SettingsError::invalid(format!("{}{}", ENV_PREFIX, key), e.to_string()))
}

impl Settings {
	/// Overrides settings from the process environment.
	pub fn apply_env(self) -> SettingsResult<Self> {
		self.apply_env_from(std::env::vars())
	}

	/// Overrides settings from an explicit set of variables.
	pub fn apply_env_from<I, K, V>(mut self, vars: I) -> SettingsResult<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		for (name, value) in vars {
			let Some(key) = name.as_ref().strip_prefix(ENV_PREFIX) else {
				continue;
			};
			let value = value.as_ref();
			match key {
				"BASE_URL" => self.backend.base_url = value.trim().to_string(),
				"REQUEST_TIMEOUT_SECS" => self.backend.request_timeout_secs = parse(key, value)?,
				"PAGE_SIZE" => self.tables.page_size = parse(key, value)?,
				"SCROLL_BORDER_Y" => self.tables.scroll_border_y = parse(key, value)?,
				"CHART_HEIGHT" => self.charts.height = parse(key, value)?,
				"LOG_LEVEL" => self.logging.level = value.trim().to_string(),
				_ => {}
			}
		}
		Ok(self)
	}
}
