//! Settings loading.
//!
//! Sources are layered: defaults, then an optional TOML file, then
//! `VITRINA_*` environment variables. The result is validated before use.

use std::path::Path;

pub use vitrina_conf::*;

/// Loads, overrides and validates settings.
pub fn load_settings(path: Option<&Path>) -> SettingsResult<Settings> {
	let settings = match path {
		Some(path) => Settings::from_file(path)?,
		None => Settings::default(),
	};
	let settings = settings.apply_env()?;
	settings.validate()?;
	Ok(settings)
}
