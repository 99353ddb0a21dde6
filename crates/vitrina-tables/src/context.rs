//! Collaborators a table is wired to

use crate::error::TableResult;
use std::sync::Arc;
use url::Url;
use vitrina_conf::BackendSettings;
use vitrina_core::{DiagnosticSink, Window, default_sink};
use vitrina_http::{FetchJson, ReqwestFetcher};

/// Shared services handed to every table.
#[derive(Clone)]
pub struct TableContext {
	/// Base URL relative endpoints are resolved against.
	pub base_url: Url,
	/// HTTP adapter.
	pub fetcher: Arc<dyn FetchJson>,
	/// Scroll event source.
	pub window: Arc<Window>,
	/// Receives absorbed load failures.
	pub sink: Arc<dyn DiagnosticSink>,
}

impl TableContext {
	/// Creates a context reporting to the tracing sink.
	pub fn new(base_url: Url, fetcher: Arc<dyn FetchJson>, window: Arc<Window>) -> Self {
		Self {
			base_url,
			fetcher,
			window,
			sink: default_sink(),
		}
	}

	/// Builds a context with a reqwest fetcher configured from `settings`.
	pub fn from_settings(settings: &BackendSettings, window: Arc<Window>) -> TableResult<Self> {
		let fetcher = ReqwestFetcher::new(settings)?;
		Ok(Self::new(settings.base_url()?, Arc::new(fetcher), window))
	}

	/// Replaces the diagnostic sink.
	pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
		self.sink = sink;
		self
	}
}

impl std::fmt::Debug for TableContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TableContext")
			.field("base_url", &self.base_url.as_str())
			.field("window", &self.window)
			.finish_non_exhaustive()
	}
}
