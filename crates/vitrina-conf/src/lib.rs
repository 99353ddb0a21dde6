//! Configuration for vitrina widgets
//!
//! Settings are grouped into sections that mirror the widgets consuming them:
//!
//! - [`BackendSettings`]: base URL every relative endpoint is resolved against,
//!   and the HTTP request timeout
//! - [`TableSettings`]: page size and scroll margin of the sortable table
//! - [`ChartSettings`]: column chart geometry
//! - [`LoggingSettings`]: default `tracing` filter
//!
//! ## Sources
//!
//! Settings start from their defaults, can be read from TOML, and can then be
//! overridden by `VITRINA_`-prefixed environment variables:
//!
//! ```ignore
//! use vitrina_conf::Settings;
//!
//! let settings = Settings::from_file("vitrina.toml")?
//!     .apply_env()?;
//! settings.validate()?;
//! ```

#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod settings;

pub use env::ENV_PREFIX;
pub use error::{SettingsError, SettingsResult};
pub use settings::{
	BackendSettings, ChartSettings, DEFAULT_BASE_URL, LoggingSettings, Settings, TableSettings,
};
