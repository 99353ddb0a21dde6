//! Shared wiring for a page of widgets

use crate::error::Result;
use std::sync::Arc;
use url::Url;
use vitrina_conf::Settings;
use vitrina_core::{DiagnosticSink, Window, default_sink};
use vitrina_http::{FetchJson, ReqwestFetcher};

/// One HTTP client, one scroll stream and one diagnostic sink shared by every
/// widget on a page.
#[derive(Clone)]
pub struct Storefront {
	settings: Settings,
	base_url: Url,
	window: Arc<Window>,
	fetcher: Arc<dyn FetchJson>,
	sink: Arc<dyn DiagnosticSink>,
}

impl std::fmt::Debug for Storefront {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Storefront")
			.field("base_url", &self.base_url.as_str())
			.field("window", &self.window)
			.finish_non_exhaustive()
	}
}

impl Storefront {
	/// Validates `settings` and builds a reqwest-backed storefront.
	pub fn new(settings: Settings) -> Result<Self> {
		settings.validate()?;
		let fetcher = ReqwestFetcher::new(&settings.backend)?;
		Self::with_fetcher(settings, Arc::new(fetcher))
	}

	/// Validates `settings` and uses `fetcher` for every request.
	pub fn with_fetcher(settings: Settings, fetcher: Arc<dyn FetchJson>) -> Result<Self> {
		settings.validate()?;
		let base_url = settings.backend.base_url()?;
		Ok(Self {
			settings,
			base_url,
			window: Arc::new(Window::new()),
			fetcher,
			sink: default_sink(),
		})
	}

	/// Replaces the diagnostic sink.
	pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
		self.sink = sink;
		self
	}

	/// The validated settings.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// The shared scroll stream.
	pub fn window(&self) -> &Arc<Window> {
		&self.window
	}

	/// Context for a new table.
	#[cfg(feature = "tables")]
	pub fn table_context(&self) -> vitrina_tables::TableContext {
		vitrina_tables::TableContext::new(
			self.base_url.clone(),
			Arc::clone(&self.fetcher),
			Arc::clone(&self.window),
		)
		.with_sink(Arc::clone(&self.sink))
	}

	/// Table options with the configured page size and scroll margin.
	#[cfg(feature = "tables")]
	pub fn table_config(&self) -> vitrina_tables::TableConfig {
		vitrina_tables::TableConfig::from_settings(&self.settings.tables)
	}

	/// Context for a new chart.
	#[cfg(feature = "charts")]
	pub fn chart_context(&self) -> vitrina_charts::ChartContext {
		vitrina_charts::ChartContext::new(self.base_url.clone(), Arc::clone(&self.fetcher))
			.with_sink(Arc::clone(&self.sink))
	}

	/// Chart options with the configured height.
	#[cfg(feature = "charts")]
	pub fn chart_options(&self) -> vitrina_charts::ColumnChartOptions {
		vitrina_charts::ColumnChartOptions::from_settings(&self.settings.charts)
	}
}
