//! Column schema
//!
//! A table is described by an ordered list of [`ColumnSpec`]s. The same list
//! drives the header cells, the cells of every row, and sort resolution.

use crate::sorting::SortType;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Renders a cell from the record's `images` field.
///
/// The returned markup is inserted into the row verbatim.
#[derive(Clone)]
pub struct CellTemplate(Arc<dyn Fn(Option<&Value>) -> String + Send + Sync>);

impl CellTemplate {
	/// Wraps a rendering function.
	pub fn new<F>(render: F) -> Self
	where
		F: Fn(Option<&Value>) -> String + Send + Sync + 'static,
	{
		Self(Arc::new(render))
	}

	/// Renders the cell markup.
	pub fn render(&self, images: Option<&Value>) -> String {
		(self.0)(images)
	}
}

impl fmt::Debug for CellTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("CellTemplate(..)")
	}
}

/// One column of the table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
	/// Record field shown in the column; also the `_sort` value for remote sorts.
	pub id: String,
	/// Header label.
	pub title: String,
	/// Whether the column accepts sort requests.
	#[serde(default)]
	pub sortable: bool,
	/// Comparator used for local sorts.
	#[serde(default)]
	pub sort_type: Option<SortType>,
	/// Custom cell renderer. Cannot be declared in data.
	#[serde(skip)]
	pub template: Option<CellTemplate>,
}

impl ColumnSpec {
	/// A plain, non-sortable column.
	pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			title: title.into(),
			sortable: false,
			sort_type: None,
			template: None,
		}
	}

	/// Marks the column sortable by `sort_type`.
	pub fn sortable(mut self, sort_type: impl Into<SortType>) -> Self {
		self.sortable = true;
		self.sort_type = Some(sort_type.into());
		self
	}

	/// Renders the column's cells with `template`.
	pub fn with_template<F>(mut self, template: F) -> Self
	where
		F: Fn(Option<&Value>) -> String + Send + Sync + 'static,
	{
		self.template = Some(CellTemplate::new(template));
		self
	}
}

/// Finds a column by id.
pub fn find_column<'a>(schema: &'a [ColumnSpec], id: &str) -> Option<&'a ColumnSpec> {
	schema.iter().find(|column| column.id == id)
}

/// First sortable column, if any.
pub fn first_sortable(schema: &[ColumnSpec]) -> Option<&ColumnSpec> {
	schema.iter().find(|column| column.sortable)
}
