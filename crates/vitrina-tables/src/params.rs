//! Remote request parameters
//!
//! The table asks the backend for one half-open row window at a time,
//! `[start, end)`, optionally sorted by a column. A sort rewinds the window
//! to the first page; each scroll-triggered append advances it by one page.

use crate::sorting::SortOrder;
use url::Url;
use vitrina_http::set_query_params;

/// Row window and applied sort of the next remote request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
	/// First row of the window.
	pub start: usize,
	/// One past the last row of the window.
	pub end: usize,
	/// Column id and order of the last remote sort.
	pub sort: Option<(String, SortOrder)>,
}

impl QueryParams {
	/// The first page of `load_range` rows, unsorted.
	pub fn first_page(load_range: usize) -> Self {
		Self {
			start: 0,
			end: load_range,
			sort: None,
		}
	}

	/// Rewinds to the first page and records a sort.
	pub fn sort_by(&mut self, load_range: usize, id: impl Into<String>, order: SortOrder) {
		self.start = 0;
		self.end = load_range;
		self.sort = Some((id.into(), order));
	}

	/// Rewinds to the first page, keeping the sort.
	pub fn rewind(&mut self, load_range: usize) {
		self.start = 0;
		self.end = load_range;
	}

	/// Moves the window forward by one page.
	pub fn advance(&mut self, load_range: usize) {
		self.start += load_range;
		self.end += load_range;
	}

	/// Query pairs in wire order: `_start`, `_end`, then `_sort`, `_order` if sorted.
	pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = vec![("_start", self.start.to_string()), ("_end", self.end.to_string())];
		if let Some((id, order)) = &self.sort {
			pairs.push(("_sort", id.clone()));
			pairs.push(("_order", order.as_str().to_string()));
		}
		pairs
	}

	/// Returns `endpoint` carrying these parameters.
	pub fn apply_to(&self, endpoint: &Url) -> Url {
		let mut url = endpoint.clone();
		set_query_params(&mut url, self.query_pairs());
		url
	}
}
