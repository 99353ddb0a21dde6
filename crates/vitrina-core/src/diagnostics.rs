//! Diagnostic sink for environmental failures.
//!
//! Widgets absorb network and decode failures so the UI stays responsive; the
//! failure is reported here instead of being returned to the caller.

use parking_lot::Mutex;
use std::sync::Arc;

/// Receives errors that widgets absorbed.
pub trait DiagnosticSink: Send + Sync {
	/// Reports an error raised by `source` (e.g. `"sortable_table.append"`).
	fn report(&self, source: &str, error: &dyn std::error::Error);
}

/// Forwards reports to `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
	fn report(&self, source: &str, error: &dyn std::error::Error) {
		tracing::error!(source, error = %error, "widget operation failed");
	}
}

/// A single recorded report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	/// Operation that failed.
	pub source: String,
	/// Rendered error message.
	pub message: String,
}

/// Keeps reports in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
	reports: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
	/// Creates an empty sink.
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of the recorded reports.
	pub fn reports(&self) -> Vec<Diagnostic> {
		self.reports.lock().clone()
	}

	/// Number of recorded reports.
	pub fn len(&self) -> usize {
		self.reports.lock().len()
	}

	/// Returns whether nothing was reported.
	pub fn is_empty(&self) -> bool {
		self.reports.lock().is_empty()
	}

	/// Drops every recorded report.
	pub fn clear(&self) {
		self.reports.lock().clear();
	}
}

impl DiagnosticSink for MemorySink {
	fn report(&self, source: &str, error: &dyn std::error::Error) {
		self.reports.lock().push(Diagnostic {
			source: source.to_string(),
			message: error.to_string(),
		});
	}
}

/// The sink used when a widget is not given one.
pub fn default_sink() -> Arc<dyn DiagnosticSink> {
	Arc::new(TracingSink)
}
