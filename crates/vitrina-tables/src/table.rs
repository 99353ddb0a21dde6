//! The sortable table controller
//!
//! [`SortableTable`] is a cheap, clonable handle. All state lives behind one
//! lock that is never held across an `.await`: every decision about a load
//! (guard checks, window advance, epoch tag) is made before the request is
//! sent, and its completion re-checks the epoch before touching anything.

use crate::context::TableContext;
use crate::error::{TableError, TableResult};
use crate::params::QueryParams;
use crate::schema::{ColumnSpec, find_column, first_sortable};
use crate::sorting::{SortOrder, sort_records};
use crate::view::TableView;
use parking_lot::Mutex;
use std::sync::Arc;
use url::Url;
use vitrina_conf::TableSettings;
use vitrina_core::{Element, ListenerId, Record, ScrollMetrics, ScrollTask};
use vitrina_http::{FetchResult, decode_records, resolve_endpoint};

/// Sort applied by [`SortableTable::load_initial`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InitialSort {
	/// First sortable column, ascending.
	#[default]
	FirstSortable,
	/// An explicit column and order.
	Field {
		/// Column id.
		id: String,
		/// Sort order.
		order: SortOrder,
	},
	/// No sort: remote tables load the first page as served.
	Unsorted,
}

/// Construction options.
#[derive(Debug, Clone)]
pub struct TableConfig {
	/// Endpoint, resolved against the context base URL.
	pub url: String,
	/// Seed records.
	pub data: Vec<Record>,
	/// Initial sort.
	pub sorted: InitialSort,
	/// Sort in memory and never paginate.
	pub is_sort_locally: bool,
	/// Rows per page.
	pub load_range: usize,
	/// Scroll margin that triggers the next page, in pixels.
	pub scroll_border_y: f64,
}

impl Default for TableConfig {
	fn default() -> Self {
		Self::from_settings(&TableSettings::default())
	}
}

impl TableConfig {
	/// Paging defaults taken from `settings`.
	pub fn from_settings(settings: &TableSettings) -> Self {
		Self {
			url: String::new(),
			data: Vec::new(),
			sorted: InitialSort::default(),
			is_sort_locally: false,
			load_range: settings.page_size,
			scroll_border_y: settings.scroll_border_y,
		}
	}

	/// Sets the endpoint.
	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = url.into();
		self
	}

	/// Sets the seed records.
	pub fn with_data(mut self, data: Vec<Record>) -> Self {
		self.data = data;
		self
	}

	/// Sorts by `id` initially.
	pub fn sorted_by(mut self, id: impl Into<String>, order: SortOrder) -> Self {
		self.sorted = InitialSort::Field {
			id: id.into(),
			order,
		};
		self
	}

	/// Skips the initial sort.
	pub fn unsorted(mut self) -> Self {
		self.sorted = InitialSort::Unsorted;
		self
	}

	/// Selects local or remote mode.
	pub fn sort_locally(mut self, local: bool) -> Self {
		self.is_sort_locally = local;
		self
	}

	/// Sets the page size.
	pub fn with_load_range(mut self, load_range: usize) -> Self {
		self.load_range = load_range;
		self
	}
}

struct TableState {
	schema: Vec<ColumnSpec>,
	endpoint: Url,
	data: Vec<Record>,
	params: QueryParams,
	load_range: usize,
	scroll_border_y: f64,
	is_sort_locally: bool,
	initial_sort: InitialSort,
	// `None` once destroyed.
	view: Option<TableView>,
	attached: bool,
	epoch: u64,
	appending: Option<u64>,
	replacing: Option<u64>,
	listener: Option<ListenerId>,
}

impl TableState {
	fn is_alive(&self) -> bool {
		self.view.is_some()
	}

	fn next_epoch(&mut self) -> u64 {
		self.epoch += 1;
		self.epoch
	}

	fn render_body(&mut self) {
		if let Some(view) = &mut self.view {
			view.render_body(&self.schema, &self.data);
		}
	}

	fn set_marker(&mut self, field_id: &str, order: SortOrder) {
		if let Some(view) = &mut self.view {
			view.set_order_marker(field_id, order);
		}
	}

	fn sync_loading(&mut self) {
		let loading = self.appending.is_some() || self.replacing.is_some();
		if let Some(view) = &mut self.view {
			view.set_loading(loading);
		}
	}
}

struct Inner {
	state: Mutex<TableState>,
	ctx: TableContext,
}

impl Drop for Inner {
	fn drop(&mut self) {
		if let Some(id) = self.state.get_mut().listener.take() {
			self.ctx.window.remove_scroll_listener(id);
		}
	}
}

/// A sortable, optionally remotely paginated data grid.
#[derive(Clone)]
pub struct SortableTable {
	inner: Arc<Inner>,
}

impl std::fmt::Debug for SortableTable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.inner.state.lock();
		f.debug_struct("SortableTable")
			.field("endpoint", &state.endpoint.as_str())
			.field("rows", &state.data.len())
			.field("params", &state.params)
			.field("destroyed", &!state.is_alive())
			.finish()
	}
}

impl SortableTable {
	/// Renders the table and subscribes it to scroll events.
	///
	/// Nothing is fetched yet; call [`SortableTable::load_initial`] or use
	/// [`SortableTable::create`].
	pub fn new(schema: Vec<ColumnSpec>, config: TableConfig, ctx: TableContext) -> TableResult<Self> {
		let endpoint = resolve_endpoint(&ctx.base_url, &config.url)?;
		let view = TableView::render(&schema, &config.data);

		tracing::debug!(
			%endpoint,
			local = config.is_sort_locally,
			columns = schema.len(),
			"sortable table created"
		);

		let state = TableState {
			schema,
			endpoint,
			data: config.data,
			params: QueryParams::first_page(config.load_range),
			load_range: config.load_range,
			scroll_border_y: config.scroll_border_y,
			is_sort_locally: config.is_sort_locally,
			initial_sort: config.sorted,
			view: Some(view),
			attached: true,
			epoch: 0,
			appending: None,
			replacing: None,
			listener: None,
		};
		let inner = Arc::new(Inner {
			state: Mutex::new(state),
			ctx,
		});

		let weak = Arc::downgrade(&inner);
		let listener = inner.ctx.window.add_scroll_listener(move |metrics| {
			let inner = weak.upgrade()?;
			SortableTable { inner }.begin_append(metrics)
		});
		inner.state.lock().listener = Some(listener);

		Ok(Self { inner })
	}

	/// [`SortableTable::new`] followed by [`SortableTable::load_initial`].
	pub async fn create(
		schema: Vec<ColumnSpec>,
		config: TableConfig,
		ctx: TableContext,
	) -> TableResult<Self> {
		let table = Self::new(schema, config, ctx)?;
		table.load_initial().await?;
		Ok(table)
	}

	/// Applies the configured initial sort, or loads the first page unsorted.
	pub async fn load_initial(&self) -> TableResult<()> {
		let (initial, local, sorts_remotely) = {
			let state = self.inner.state.lock();
			let initial = match &state.initial_sort {
				InitialSort::FirstSortable => {
					first_sortable(&state.schema).map(|column| (column.id.clone(), SortOrder::Asc))
				}
				InitialSort::Field { id, order } => Some((id.clone(), *order)),
				InitialSort::Unsorted => None,
			};
			let sortable = initial.as_ref().is_some_and(|(id, _)| {
				find_column(&state.schema, id).is_some_and(|column| column.sortable)
			});
			(initial, state.is_sort_locally, sortable)
		};

		if let Some((id, order)) = &initial {
			self.sort(id, *order).await?;
		}
		// Unknown and non-sortable columns never fetch from `sort`.
		if !local && !sorts_remotely {
			self.replace_remote(None).await;
		}
		Ok(())
	}

	/// Sorts by `field_id`.
	///
	/// Unknown columns are ignored. Non-sortable columns only move the header
	/// marker. Local tables reorder their records in memory; remote tables
	/// rewind to the first page and fetch it sorted. Load failures are reported
	/// to the diagnostic sink, not returned, and leave the table empty.
	pub async fn sort(&self, field_id: &str, order: SortOrder) -> TableResult<()> {
		{
			let mut state = self.inner.state.lock();
			if !state.is_alive() {
				return Ok(());
			}
			let Some(column) = find_column(&state.schema, field_id) else {
				tracing::debug!(field = field_id, "sort on unknown column ignored");
				return Ok(());
			};
			let (sortable, sort_type) = (column.sortable, column.sort_type.clone());

			if !sortable {
				state.set_marker(field_id, order);
				return Ok(());
			}

			let sort_type =
				sort_type.ok_or_else(|| TableError::InvalidSortType("undefined".to_string()))?;
			sort_type.comparator()?;

			if state.is_sort_locally {
				state.data = sort_records(&state.data, field_id, &sort_type, order)?;
				state.render_body();
				state.set_marker(field_id, order);
				tracing::debug!(field = field_id, %order, "sorted locally");
				return Ok(());
			}
		}

		self.replace_remote(Some((field_id.to_string(), order))).await;
		Ok(())
	}

	/// Sorts with an untyped order; `None` means ascending.
	pub async fn sort_from_query(&self, field_id: &str, order: Option<&str>) -> TableResult<()> {
		let order = SortOrder::parse_or_default(order)?;
		self.sort(field_id, order).await
	}

	/// Handles a click on the header cell of `field_id`.
	///
	/// Ignored unless the cell is marked `data-sortable="true"`. A cell
	/// currently sorted descending sorts ascending; any other cell sorts
	/// descending.
	pub async fn on_header_click(&self, field_id: &str) -> TableResult<()> {
		let order = {
			let state = self.inner.state.lock();
			let Some(cell) = state.view.as_ref().and_then(|view| view.header_cell(field_id)) else {
				return Ok(());
			};
			if cell.get_attribute("data-sortable") != Some("true") {
				return Ok(());
			}
			match cell.get_attribute("data-order") {
				Some("desc") => SortOrder::Asc,
				_ => SortOrder::Desc,
			}
		};
		self.sort(field_id, order).await
	}

	/// Reacts to a scroll event, appending the next page when near the bottom.
	pub async fn handle_scroll(&self, metrics: ScrollMetrics) {
		if let Some(task) = self.begin_append(metrics) {
			task.await;
		}
	}

	fn begin_append(&self, metrics: ScrollMetrics) -> Option<ScrollTask> {
		let (epoch, url) = {
			let mut state = self.inner.state.lock();
			if !state.is_alive()
				|| state.is_sort_locally
				|| state.appending.is_some()
				|| state.replacing.is_some()
				|| !metrics.is_near_bottom(state.scroll_border_y)
			{
				return None;
			}
			let load_range = state.load_range;
			state.params.advance(load_range);
			let epoch = state.next_epoch();
			state.appending = Some(epoch);
			state.sync_loading();
			(epoch, state.params.apply_to(&state.endpoint))
		};

		tracing::debug!(%url, epoch, "loading next page");
		let table = self.clone();
		Some(Box::pin(async move { table.finish_append(epoch, url).await }) as ScrollTask)
	}

	async fn fetch_records(&self, url: &Url) -> FetchResult<Vec<Record>> {
		self.inner
			.ctx
			.fetcher
			.get_json(url)
			.await
			.and_then(decode_records)
	}

	async fn finish_append(&self, epoch: u64, url: Url) {
		let result = self.fetch_records(&url).await;

		let failure = {
			let mut state = self.inner.state.lock();
			if state.appending == Some(epoch) {
				state.appending = None;
			}
			if !state.is_alive() {
				tracing::debug!(epoch, "table destroyed, page dropped");
				return;
			}
			if state.epoch != epoch {
				tracing::debug!(epoch, current = state.epoch, "superseded page dropped");
				state.sync_loading();
				return;
			}
			let failure = match result {
				Ok(records) => {
					state.data.extend(records);
					state.render_body();
					None
				}
				Err(error) => Some(error),
			};
			state.sync_loading();
			failure
		};

		if let Some(error) = failure {
			self.inner.ctx.sink.report("sortable_table.append", &error);
		}
	}

	/// Rewinds to the first page and replaces the records with it.
	async fn replace_remote(&self, sort: Option<(String, SortOrder)>) {
		let (epoch, url) = {
			let mut state = self.inner.state.lock();
			if !state.is_alive() {
				return;
			}
			let load_range = state.load_range;
			match &sort {
				Some((id, order)) => state.params.sort_by(load_range, id.clone(), *order),
				None => state.params.rewind(load_range),
			}
			let epoch = state.next_epoch();
			state.replacing = Some(epoch);
			state.sync_loading();
			(epoch, state.params.apply_to(&state.endpoint))
		};

		tracing::debug!(%url, epoch, "loading first page");
		let result = self.fetch_records(&url).await;

		let failure = {
			let mut state = self.inner.state.lock();
			if state.replacing == Some(epoch) {
				state.replacing = None;
			}
			if !state.is_alive() {
				tracing::debug!(epoch, "table destroyed, page dropped");
				return;
			}
			if state.epoch != epoch {
				tracing::debug!(epoch, current = state.epoch, "superseded page dropped");
				state.sync_loading();
				return;
			}
			// The window already points at the new first page, so rows of the
			// previous ordering cannot stay.
			let failure = match result {
				Ok(records) => {
					state.data = records;
					None
				}
				Err(error) => {
					state.data.clear();
					Some(error)
				}
			};
			state.render_body();
			if let Some((id, order)) = &sort {
				state.set_marker(id, *order);
			}
			state.sync_loading();
			failure
		};

		if let Some(error) = failure {
			self.inner.ctx.sink.report("sortable_table.load", &error);
		}
	}

	/// Detaches the table from the document. State and subscriptions are kept.
	pub fn remove(&self) {
		self.inner.state.lock().attached = false;
	}

	/// Unsubscribes from scroll events and releases the tree.
	///
	/// Idempotent. Afterwards every operation is a no-op and in-flight loads
	/// are dropped when they complete.
	pub fn destroy(&self) {
		let listener = {
			let mut state = self.inner.state.lock();
			state.view = None;
			state.attached = false;
			state.listener.take()
		};
		if let Some(id) = listener {
			self.inner.ctx.window.remove_scroll_listener(id);
			tracing::debug!("sortable table destroyed");
		}
	}

	/// The root element, or `None` once destroyed.
	pub fn element(&self) -> Option<Element> {
		self.with_view(|view| view.element().cloned()).flatten()
	}

	/// Runs `f` against the rendered view, or returns `None` once destroyed.
	pub fn with_view<R>(&self, f: impl FnOnce(&TableView) -> R) -> Option<R> {
		self.inner.state.lock().view.as_ref().map(f)
	}

	/// Serializes the root element.
	pub fn to_html(&self) -> Option<String> {
		self.with_view(TableView::to_html)
	}

	/// Current records.
	pub fn data(&self) -> Vec<Record> {
		self.inner.state.lock().data.clone()
	}

	/// Parameters of the last remote request.
	pub fn params(&self) -> QueryParams {
		self.inner.state.lock().params.clone()
	}

	/// Whether a page append is in flight.
	pub fn is_loading(&self) -> bool {
		self.inner.state.lock().appending.is_some()
	}

	/// Whether the table is attached to the document.
	pub fn is_attached(&self) -> bool {
		self.inner.state.lock().attached
	}

	/// Whether [`SortableTable::destroy`] was called.
	pub fn is_destroyed(&self) -> bool {
		!self.inner.state.lock().is_alive()
	}

	/// Header `(data-id, data-order)` markers.
	pub fn order_markers(&self) -> Vec<(String, String)> {
		self.with_view(TableView::order_markers).unwrap_or_default()
	}
}
