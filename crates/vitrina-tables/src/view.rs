//! Table markup
//!
//! The view owns the rendered tree and is the only code that knows its shape:
//!
//! ```text
//! div[data-element=productsContainer].products-list__container
//! └── div.sortable-table
//!     ├── div[data-element=header]            one cell per column
//!     ├── div[data-element=body]              one anchor per record
//!     ├── div[data-element=loading]
//!     └── div[data-element=emptyPlaceholder]
//! ```

use crate::schema::ColumnSpec;
use crate::sorting::SortOrder;
use vitrina_core::dom::html::{a, button, div, p, span};
use vitrina_core::dom::{Element, Landmarks, Node, NodePath, has_attr};
use vitrina_core::{Record, display_value};

/// Class of the table element.
pub const TABLE_CLASS: &str = "sortable-table";
/// Present on the table element while a remote request is in flight.
pub const LOADING_CLASS: &str = "sortable-table_loading";
/// Present on the table element while the body has no rows.
pub const EMPTY_CLASS: &str = "sortable-table_empty";

/// Landmark names.
pub mod landmark {
	/// The root element.
	pub const PRODUCTS_CONTAINER: &str = "productsContainer";
	/// Header row.
	pub const HEADER: &str = "header";
	/// Row container.
	pub const BODY: &str = "body";
	/// Loading line.
	pub const LOADING: &str = "loading";
	/// Shown when there are no rows.
	pub const EMPTY_PLACEHOLDER: &str = "emptyPlaceholder";
	/// Sort arrow inside sortable header cells.
	pub const ARROW: &str = "arrow";
}

fn header_cell(column: &ColumnSpec) -> Element {
	let mut cell = div()
		.attr("class", "sortable-table__cell")
		.attr("data-id", column.id.clone())
		.attr("data-sortable", column.sortable.to_string())
		.child(span().child(column.title.clone()));
	if column.sortable {
		cell = cell.child(
			span()
				.attr("data-element", landmark::ARROW)
				.attr("class", "sortable-table__sort-arrow")
				.child(span().attr("class", "sort-arrow")),
		);
	}
	cell
}

fn body_cell(column: &ColumnSpec, record: &Record) -> Node {
	match &column.template {
		Some(template) => Node::markup(template.render(record.get("images"))),
		None => Node::Element(
			div()
				.attr("class", "sortable-table__cell")
				.child(display_value(record.get(&column.id))),
		),
	}
}

fn row(schema: &[ColumnSpec], record: &Record) -> Element {
	a().attr("href", format!("/products/{}", display_value(record.get("id"))))
		.attr("class", "sortable-table__row")
		.children(schema.iter().map(|column| body_cell(column, record)))
}

fn empty_placeholder() -> Element {
	div()
		.attr("data-element", landmark::EMPTY_PLACEHOLDER)
		.attr("class", "sortable-table__empty-placeholder")
		.child(
			div()
				.child(p().child("No products satisfies your filter criteria"))
				.child(
					button()
						.attr("type", "button")
						.attr("class", "button-primary-outline")
						.child("Reset all filters"),
				),
		)
}

/// Rendered table tree plus its landmark index.
#[derive(Debug, Clone)]
pub struct TableView {
	// Detached holder whose single child is the products container.
	holder: Element,
	landmarks: Landmarks,
	table_path: NodePath,
}

impl TableView {
	/// Renders the full tree for `schema` and `records`.
	pub fn render(schema: &[ColumnSpec], records: &[Record]) -> Self {
		let container = div()
			.attr("data-element", landmark::PRODUCTS_CONTAINER)
			.attr("class", "products-list__container")
			.child(
				div()
					.attr("class", TABLE_CLASS)
					.child(
						div()
							.attr("data-element", landmark::HEADER)
							.attr("class", "sortable-table__header sortable-table__row")
							.children(schema.iter().map(header_cell)),
					)
					.child(
						div()
							.attr("data-element", landmark::BODY)
							.attr("class", "sortable-table__body"),
					)
					.child(
						div()
							.attr("data-element", landmark::LOADING)
							.attr("class", "loading-line sortable-table__loading-line"),
					)
					.child(empty_placeholder()),
			);

		let holder = div().child(container);
		let landmarks = Landmarks::collect(&holder);
		let table_path = holder
			.descendant_paths(|el| el.has_class(TABLE_CLASS))
			.into_iter()
			.next()
			.unwrap_or_default();

		let mut view = Self {
			holder,
			landmarks,
			table_path,
		};
		view.render_body(schema, records);
		view
	}

	/// The root element.
	pub fn element(&self) -> Option<&Element> {
		self.landmarks
			.resolve(&self.holder, landmark::PRODUCTS_CONTAINER)
	}

	/// A landmark by name.
	pub fn landmark(&self, name: &str) -> Option<&Element> {
		self.landmarks.resolve(&self.holder, name)
	}

	/// The landmark index.
	pub fn landmarks(&self) -> &Landmarks {
		&self.landmarks
	}

	fn table_mut(&mut self) -> Option<&mut Element> {
		self.holder.at_path_mut(&self.table_path)
	}

	fn table(&self) -> Option<&Element> {
		self.holder.at_path(&self.table_path)
	}

	/// Replaces every row.
	pub fn render_body(&mut self, schema: &[ColumnSpec], records: &[Record]) {
		if let Some(body) = self.landmarks.resolve_mut(&mut self.holder, landmark::BODY) {
			body.replace_children(records.iter().map(|record| row(schema, record)));
		}
		if let Some(table) = self.table_mut() {
			table.toggle_class(EMPTY_CLASS, records.is_empty());
		}
	}

	/// Toggles the loading visual.
	pub fn set_loading(&mut self, loading: bool) {
		if let Some(table) = self.table_mut() {
			table.toggle_class(LOADING_CLASS, loading);
		}
	}

	/// Returns whether the loading visual is shown.
	pub fn is_loading(&self) -> bool {
		self.table().is_some_and(|table| table.has_class(LOADING_CLASS))
	}

	/// Returns whether the empty visual is shown.
	pub fn is_empty(&self) -> bool {
		self.table().is_some_and(|table| table.has_class(EMPTY_CLASS))
	}

	/// The header cell of column `field_id`.
	pub fn header_cell(&self, field_id: &str) -> Option<&Element> {
		self.landmark(landmark::HEADER)?
			.element_children()
			.find(|cell| cell.get_attribute("data-id") == Some(field_id))
	}

	/// Moves the `data-order` marker to the header cell of `field_id`.
	pub fn set_order_marker(&mut self, field_id: &str, order: SortOrder) {
		let Some(header) = self.landmarks.resolve_mut(&mut self.holder, landmark::HEADER) else {
			return;
		};
		header.for_each_matching_mut(has_attr("data-order"), |cell| {
			cell.remove_attribute("data-order");
		});
		let target = header
			.descendant_paths(|cell| cell.get_attribute("data-id") == Some(field_id))
			.into_iter()
			.next();
		if let Some(path) = target
			&& let Some(cell) = header.at_path_mut(&path)
		{
			cell.set_attribute("data-order", order.as_str());
		}
	}

	/// Every `(data-id, data-order)` pair in the header.
	pub fn order_markers(&self) -> Vec<(String, String)> {
		self.landmark(landmark::HEADER)
			.map(|header| {
				header
					.query_all(has_attr("data-order"))
					.into_iter()
					.map(|cell| {
						(
							cell.get_attribute("data-id").unwrap_or_default().to_string(),
							cell.get_attribute("data-order").unwrap_or_default().to_string(),
						)
					})
					.collect()
			})
			.unwrap_or_default()
	}

	/// Number of rendered rows.
	pub fn row_count(&self) -> usize {
		self.landmark(landmark::BODY)
			.map_or(0, |body| body.element_children().count())
	}

	/// Serializes the root element.
	pub fn to_html(&self) -> String {
		self.element().map(Element::render_to_string).unwrap_or_default()
	}
}
