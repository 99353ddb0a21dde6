//! Sortable table in remote mode


use fixtures::*;
use rstest::*;
use serde_json::json;
use vitrina_core::dom::has_attr_value;
use vitrina_http::FetchError;
use vitrina_tables::{ColumnSpec, SortOrder, SortableTable, TableConfig};

fn remote() -> TableConfig {
	TableConfig::default()
		.with_url(ENDPOINT)
		.sorted_by("title", SortOrder::Asc)
}

async fn loaded_table(harness: &Harness, schema: Vec<ColumnSpec>) -> SortableTable {
	harness
		.fetcher
		.respond_once("_start=0&_end=10&_sort=title&_order=asc", page("p", 0, 10));
	SortableTable::create(schema, remote(), harness.ctx.clone())
		.await
		.unwrap()
}

#[rstest]
#[tokio::test]
async fn test_initial_sort_requests_first_page(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange & Act
	let table = loaded_table(&harness, products_schema).await;

	// Assert
	let request = harness.fetcher.last_request().unwrap();
	assert_eq!(
		request.as_str(),
		"https://course-js.javascript.ru/api/rest/products?_start=0&_end=10&_sort=title&_order=asc"
	);
	assert_eq!(table.data().len(), 10);
	assert_eq!(table.order_markers(), vec![("title".to_string(), "asc".to_string())]);
	assert!(!table.is_loading());
	assert!(harness.sink.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_scroll_appends_next_page(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange
	let table = loaded_table(&harness, products_schema).await;
	let gate = harness.fetcher.gate("_start=10&_end=20&_sort=title&_order=asc");

	// Act
	let observer = async {
		tokio::task::yield_now().await;
		let in_flight = table.is_loading();
		let loading_class = table.with_view(|view| view.is_loading()).unwrap();
		gate.release(page("p", 10, 20));
		(in_flight, loading_class)
	};
	let ((), (in_flight, loading_class)) =
		tokio::join!(harness.window.dispatch_scroll(near_bottom()), observer);

	// Assert
	assert!(in_flight);
	assert!(loading_class);
	assert!(!table.is_loading());
	assert_eq!(table.data().len(), 20);
	assert_eq!(ids(&table.data())[10], "p10");
	assert_eq!((table.params().start, table.params().end), (10, 20));
	assert!(
		harness
			.fetcher
			.last_request()
			.unwrap()
			.as_str()
			.contains("_start=10&_end=20&_sort=title&_order=asc")
	);
}

#[rstest]
#[tokio::test]
async fn test_scroll_far_from_bottom_does_nothing(harness: Harness, products_schema: Vec<ColumnSpec>) {
	let table = loaded_table(&harness, products_schema).await;

	table.handle_scroll(far_from_bottom()).await;

	assert_eq!(harness.fetcher.request_count(), 1);
	assert_eq!(table.params().start, 0);
}

#[rstest]
#[tokio::test]
async fn test_appends_never_overlap(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange
	let table = loaded_table(&harness, products_schema).await;
	let gate = harness.fetcher.gate("_start=10");

	// Act
	let burst = async {
		tokio::task::yield_now().await;
		table.handle_scroll(near_bottom()).await;
		harness.window.dispatch_scroll(near_bottom()).await;
		gate.release(page("p", 10, 20));
	};
	tokio::join!(table.handle_scroll(near_bottom()), burst);

	// Assert
	assert_eq!(harness.fetcher.request_count(), 2);
	assert_eq!(table.data().len(), 20);
	assert_eq!(table.params().end, 20);
}

#[rstest]
#[tokio::test]
async fn test_sort_supersedes_in_flight_append(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange
	let table = loaded_table(&harness, products_schema).await;
	let append_gate = harness.fetcher.gate("_start=10&_end=20");
	harness
		.fetcher
		.respond_once("_start=0&_end=10&_sort=price&_order=desc", page("by-price-", 0, 10));

	// Act
	let click = async {
		tokio::task::yield_now().await;
		table.on_header_click("price").await.unwrap();
		append_gate.release(page("stale-", 10, 20));
	};
	tokio::join!(table.handle_scroll(near_bottom()), click);

	// Assert
	assert_eq!(ids(&table.data()), ids_of(page("by-price-", 0, 10)));
	assert_eq!((table.params().start, table.params().end), (0, 10));
	assert_eq!(table.order_markers(), vec![("price".to_string(), "desc".to_string())]);
	assert!(!table.is_loading());
	assert!(!table.with_view(|view| view.is_loading()).unwrap());
}

#[rstest]
#[tokio::test]
async fn test_sort_wins_when_append_completes_first(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange
	let table = loaded_table(&harness, products_schema).await;
	let append_gate = harness.fetcher.gate("_start=10&_end=20");
	let sort_gate = harness.fetcher.gate("_sort=price");

	// Act
	let driver = async {
		tokio::task::yield_now().await;
		let sort = table.sort("price", SortOrder::Asc);
		let release = async {
			tokio::task::yield_now().await;
			append_gate.release(page("stale-", 10, 20));
			tokio::task::yield_now().await;
			sort_gate.release(page("by-price-", 0, 10));
		};
		let (sorted, ()) = tokio::join!(sort, release);
		sorted.unwrap();
	};
	tokio::join!(table.handle_scroll(near_bottom()), driver);

	// Assert
	assert_eq!(ids(&table.data()), ids_of(page("by-price-", 0, 10)));
	assert!(!table.is_loading());
}

#[rstest]
#[tokio::test]
async fn test_scroll_is_ignored_while_sort_is_pending(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange
	let table = loaded_table(&harness, products_schema).await;
	let sort_gate = harness.fetcher.gate("_sort=price");

	// Act
	let scroll = async {
		tokio::task::yield_now().await;
		table.handle_scroll(near_bottom()).await;
		sort_gate.release(page("by-price-", 0, 10));
	};
	let (sorted, ()) = tokio::join!(table.sort("price", SortOrder::Asc), scroll);

	// Assert
	sorted.unwrap();
	assert_eq!(harness.fetcher.request_count(), 2);
	assert_eq!((table.params().start, table.params().end), (0, 10));
}

#[rstest]
#[tokio::test]
async fn test_failed_append_is_reported_and_not_rolled_back(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange
	let table = loaded_table(&harness, products_schema).await;
	harness
		.fetcher
		.fail_once("_start=10", FetchError::Network("connection reset".to_string()));
	harness.fetcher.respond_once("_start=20&_end=30", page("p", 20, 30));

	// Act
	table.handle_scroll(near_bottom()).await;
	let after_failure = (table.is_loading(), table.params().end, table.data().len());
	table.handle_scroll(near_bottom()).await;

	// Assert
	assert_eq!(after_failure, (false, 20, 10));
	assert_eq!(table.data().len(), 20);
	let reports = harness.sink.reports();
	assert_eq!(reports.len(), 1);
	assert_eq!(reports[0].source, "sortable_table.append");
	assert_eq!(reports[0].message, "Network error: connection reset");
}

#[rstest]
#[tokio::test]
async fn test_undecodable_page_is_reported(harness: Harness, products_schema: Vec<ColumnSpec>) {
	let table = loaded_table(&harness, products_schema).await;
	harness.fetcher.respond_once("_start=10", json!({"error": "not a list"}));

	table.handle_scroll(near_bottom()).await;

	assert_eq!(table.data().len(), 10);
	assert!(!table.is_loading());
	assert_eq!(harness.sink.len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_failed_sort_still_moves_marker(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange
	let table = loaded_table(&harness, products_schema).await;
	harness.fetcher.fail_once(
		"_sort=price",
		FetchError::Status {
			status: 502,
			url: "https://course-js.javascript.ru/api/rest/products".to_string(),
		},
	);
	harness
		.fetcher
		.respond_once("_start=10&_end=20&_sort=price&_order=desc", page("by-price-", 10, 20));

	// Act
	table.sort("price", SortOrder::Desc).await.unwrap();
	let after_failure = table.data().len();
	table.handle_scroll(near_bottom()).await;

	// Assert
	assert_eq!(after_failure, 0);
	assert_eq!(table.order_markers(), vec![("price".to_string(), "desc".to_string())]);
	assert_eq!(harness.sink.reports()[0].source, "sortable_table.load");
	assert_eq!(ids(&table.data()), ids_of(page("by-price-", 10, 20)));
}

#[rstest]
#[case::not_sortable("quantity", vec![("quantity".to_string(), "asc".to_string())])]
#[case::unknown("discount", vec![])]
#[tokio::test]
async fn test_initial_sort_on_unsortable_column_still_loads_first_page(
	harness: Harness,
	products_schema: Vec<ColumnSpec>,
	#[case] field: &str,
	#[case] markers: Vec<(String, String)>,
) {
	// Arrange
	harness.fetcher.respond_once("_start=0&_end=10", page("p", 0, 10));
	harness.fetcher.respond_once("_start=10&_end=20", page("p", 10, 20));
	let config = TableConfig::default()
		.with_url(ENDPOINT)
		.sorted_by(field, SortOrder::Asc);

	// Act
	let table = SortableTable::create(products_schema, config, harness.ctx.clone())
		.await
		.unwrap();
	let first_query = harness.fetcher.last_request().unwrap().query().map(str::to_string);
	table.handle_scroll(near_bottom()).await;

	// Assert
	assert_eq!(first_query.as_deref(), Some("_start=0&_end=10"));
	assert_eq!(table.order_markers(), markers);
	assert_eq!(harness.fetcher.request_count(), 2);
	let loaded = ids(&table.data());
	assert_eq!(loaded.len(), 20);
	assert_eq!(loaded[0], "p0");
	assert!(harness.sink.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_newer_sort_wins_over_older_in_flight_sort(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange
	let table = loaded_table(&harness, products_schema).await;
	let older_gate = harness.fetcher.gate("_sort=price");
	let newer_gate = harness.fetcher.gate("_sort=title&_order=desc");

	// Act
	let newer = async {
		tokio::task::yield_now().await;
		table.sort("title", SortOrder::Desc).await
	};
	let release = async {
		tokio::task::yield_now().await;
		tokio::task::yield_now().await;
		newer_gate.release(page("new-", 0, 10));
		tokio::task::yield_now().await;
		older_gate.release(page("old-", 0, 10));
	};
	let (older_result, newer_result, ()) =
		tokio::join!(table.sort("price", SortOrder::Asc), newer, release);

	// Assert
	older_result.unwrap();
	newer_result.unwrap();
	assert_eq!(ids(&table.data()), ids_of(page("new-", 0, 10)));
	assert_eq!(table.order_markers(), vec![("title".to_string(), "desc".to_string())]);
	assert_eq!(
		table.params().sort,
		Some(("title".to_string(), SortOrder::Desc))
	);
	assert!(!table.is_loading());
	assert!(harness.sink.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_destroyed_table_never_fetches(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange
	let table = loaded_table(&harness, products_schema).await;
	let before = harness.fetcher.request_count();

	// Act
	table.destroy();
	table.sort("price", SortOrder::Desc).await.unwrap();
	table.on_header_click("title").await.unwrap();
	table.handle_scroll(near_bottom()).await;

	// Assert
	assert_eq!(harness.fetcher.request_count(), before);
	assert!(table.order_markers().is_empty());
	assert!(table.element().is_none());
}

#[rstest]
#[tokio::test]
async fn test_destroy_drops_in_flight_page(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange
	let table = loaded_table(&harness, products_schema).await;
	let gate = harness.fetcher.gate("_start=10");

	// Act
	let teardown = async {
		tokio::task::yield_now().await;
		table.destroy();
		gate.release(page("p", 10, 20));
	};
	tokio::join!(table.handle_scroll(near_bottom()), teardown);
	harness.window.dispatch_scroll(near_bottom()).await;

	// Assert
	assert!(table.is_destroyed());
	assert_eq!(table.data().len(), 10);
	assert_eq!(harness.fetcher.request_count(), 2);
	assert_eq!(harness.window.scroll_listener_count(), 0);
	assert!(harness.sink.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_unsorted_empty_dataset(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange
	harness.fetcher.respond_once("_start=0&_end=10", json!([]));
	let config = TableConfig::default().with_url(ENDPOINT).unsorted();

	// Act
	let table = SortableTable::create(products_schema, config, harness.ctx.clone())
		.await
		.unwrap();

	// Assert
	assert_eq!(harness.fetcher.request_count(), 1);
	assert_eq!(
		harness.fetcher.last_request().unwrap().query(),
		Some("_start=0&_end=10")
	);
	assert!(table.data().is_empty());
	table
		.with_view(|view| {
			assert_eq!(view.row_count(), 0);
			assert!(view.landmark("emptyPlaceholder").is_some());
			assert!(view.is_empty());
			assert!(
				view.element()
					.and_then(|root| root.query(has_attr_value("class", "button-primary-outline")))
					.is_some()
			);
		})
		.unwrap();
}

#[rstest]
#[tokio::test]
async fn test_tables_share_one_window(harness: Harness, products_schema: Vec<ColumnSpec>) {
	// Arrange
	let first = loaded_table(&harness, products_schema.clone()).await;
	let second = loaded_table(&harness, products_schema).await;
	harness.fetcher.respond("_start=10&_end=20", page("p", 10, 20));

	// Act
	harness.window.dispatch_scroll(near_bottom()).await;

	// Assert
	assert_eq!(harness.window.scroll_listener_count(), 2);
	assert_eq!(first.data().len(), 20);
	assert_eq!(second.data().len(), 20);
	assert_eq!(harness.fetcher.request_count(), 4);
}

fn ids_of(body: serde_json::Value) -> Vec<String> {
	body.as_array()
		.map(|items| {
			items
				.iter()
				.filter_map(|item| item["id"].as_str().map(str::to_string))
				.collect()
		})
		.unwrap_or_default()
}
