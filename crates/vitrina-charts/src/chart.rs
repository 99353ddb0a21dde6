//! Column chart widget

use crate::error::{ChartError, ChartResult};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use url::Url;
use vitrina_conf::{BackendSettings, ChartSettings};
use vitrina_core::dom::html::{a, div};
use vitrina_core::dom::{Element, Landmarks};
use vitrina_core::{DiagnosticSink, default_sink};
use vitrina_http::{
	FetchJson, ReqwestFetcher, Series, decode_series, resolve_endpoint, set_query_params,
};

/// Present on the chart root while it has no data to show.
pub const LOADING_CLASS: &str = "column-chart_loading";

/// Turns the series total into the heading text.
pub type HeadingFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Inclusive date range of a chart update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
	/// First day.
	pub from: DateTime<Utc>,
	/// Last day.
	pub to: DateTime<Utc>,
}

impl DateRange {
	/// Creates a range.
	pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
		Self { from, to }
	}

	/// A range covering today only.
	pub fn today() -> Self {
		let now = Utc::now();
		Self::new(now, now)
	}
}

/// Construction options.
#[derive(Clone)]
pub struct ColumnChartOptions {
	/// Endpoint; empty for a static chart.
	pub url: String,
	/// Range fetched by [`ColumnChart::create`].
	pub range: DateRange,
	/// Shown in the title as `Total <label>`.
	pub label: String,
	/// Initial heading value.
	pub value: f64,
	/// Target of the `View all` link; empty hides it.
	pub link: String,
	/// Initial series.
	pub data: Vec<f64>,
	/// Heading formatter.
	pub format_heading: HeadingFormatter,
	/// Height the tallest bar is scaled to.
	pub chart_height: u32,
}

impl fmt::Debug for ColumnChartOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ColumnChartOptions")
			.field("url", &self.url)
			.field("range", &self.range)
			.field("label", &self.label)
			.field("value", &self.value)
			.field("link", &self.link)
			.field("data", &self.data)
			.field("chart_height", &self.chart_height)
			.finish_non_exhaustive()
	}
}

impl Default for ColumnChartOptions {
	fn default() -> Self {
		Self::from_settings(&ChartSettings::default())
	}
}

impl ColumnChartOptions {
	/// Options with the geometry from `settings`.
	pub fn from_settings(settings: &ChartSettings) -> Self {
		Self {
			url: String::new(),
			range: DateRange::today(),
			label: String::new(),
			value: 0.0,
			link: String::new(),
			data: Vec::new(),
			format_heading: Arc::new(|value| value.to_string()),
			chart_height: settings.height,
		}
	}

	/// Sets the endpoint.
	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = url.into();
		self
	}

	/// Sets the initial range.
	pub fn with_range(mut self, range: DateRange) -> Self {
		self.range = range;
		self
	}

	/// Sets the label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	/// Sets the initial heading value.
	pub fn with_value(mut self, value: f64) -> Self {
		self.value = value;
		self
	}

	/// Sets the `View all` link.
	pub fn with_link(mut self, link: impl Into<String>) -> Self {
		self.link = link.into();
		self
	}

	/// Sets the initial series.
	pub fn with_data(mut self, data: Vec<f64>) -> Self {
		self.data = data;
		self
	}

	/// Sets the heading formatter.
	pub fn with_format_heading<F>(mut self, format: F) -> Self
	where
		F: Fn(f64) -> String + Send + Sync + 'static,
	{
		self.format_heading = Arc::new(format);
		self
	}
}

/// Shared services handed to charts.
#[derive(Clone)]
pub struct ChartContext {
	/// Base URL endpoints are resolved against.
	pub base_url: Url,
	/// HTTP adapter.
	pub fetcher: Arc<dyn FetchJson>,
	/// Receives failures absorbed by [`ColumnChart::create`].
	pub sink: Arc<dyn DiagnosticSink>,
}

impl ChartContext {
	/// Creates a context reporting to the tracing sink.
	pub fn new(base_url: Url, fetcher: Arc<dyn FetchJson>) -> Self {
		Self {
			base_url,
			fetcher,
			sink: default_sink(),
		}
	}

	/// Builds a context with a reqwest fetcher configured from `settings`.
	pub fn from_settings(settings: &BackendSettings) -> ChartResult<Self> {
		let fetcher = ReqwestFetcher::new(settings)?;
		Ok(Self::new(settings.base_url()?, Arc::new(fetcher)))
	}

	/// Replaces the diagnostic sink.
	pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
		self.sink = sink;
		self
	}
}

impl fmt::Debug for ChartContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ChartContext")
			.field("base_url", &self.base_url.as_str())
			.finish_non_exhaustive()
	}
}

/// Bar heights and tooltips for `data`.
///
/// The tallest bar maps to `chart_height`; each tooltip is the value as a
/// rounded percentage of the maximum. A series whose maximum is not positive
/// renders flat.
pub fn column_props(data: &[f64], chart_height: u32) -> Vec<(i64, String)> {
	let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
	if max <= 0.0 {
		return data.iter().map(|_| (0, "0%".to_string())).collect();
	}
	let scale = f64::from(chart_height) / max;
	data.iter()
		.map(|value| {
			let height = (value * scale).floor() as i64;
			let percent = (value / max * 100.0).round() as i64;
			(height, format!("{}%", percent))
		})
		.collect()
}

fn bars(data: &[f64], chart_height: u32) -> Vec<Element> {
	column_props(data, chart_height)
		.into_iter()
		.map(|(height, tooltip)| {
			div()
				.attr("style", format!("--value: {}", height))
				.attr("data-tooltip", tooltip)
		})
		.collect()
}

/// A fixed-height column chart.
pub struct ColumnChart {
	options: ColumnChartOptions,
	data: Vec<f64>,
	element: Option<Element>,
	landmarks: Landmarks,
	attached: bool,
	ctx: ChartContext,
}

impl fmt::Debug for ColumnChart {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ColumnChart")
			.field("options", &self.options)
			.field("data", &self.data)
			.field("destroyed", &self.element.is_none())
			.finish_non_exhaustive()
	}
}

impl ColumnChart {
	/// Renders the chart from the options' series. Nothing is fetched.
	pub fn new(options: ColumnChartOptions, ctx: ChartContext) -> Self {
		let heading = (options.format_heading)(options.value);

		let mut title = div()
			.attr("class", "column-chart__title")
			.child(format!("Total {}", options.label));
		if !options.link.is_empty() {
			title = title.child(
				a().attr("class", "column-chart__link")
					.attr("href", options.link.clone())
					.child("View all"),
			);
		}

		let mut root = div()
			.attr("class", "column-chart")
			.attr("style", format!("--chart-height: {}", options.chart_height))
			.child(title)
			.child(
				div()
					.attr("class", "column-chart__container")
					.child(
						div()
							.attr("data-element", "header")
							.attr("class", "column-chart__header")
							.child(heading),
					)
					.child(
						div()
							.attr("data-element", "body")
							.attr("class", "column-chart__chart")
							.children(bars(&options.data, options.chart_height)),
					),
			);
		root.toggle_class(LOADING_CLASS, options.data.is_empty());

		let landmarks = Landmarks::collect(&root);
		Self {
			data: options.data.clone(),
			options,
			element: Some(root),
			landmarks,
			attached: true,
			ctx,
		}
	}

	/// Renders the chart and, when it has an endpoint, loads the configured range.
	///
	/// A failed load is reported to the diagnostic sink and leaves the chart
	/// in its loading state.
	pub async fn create(options: ColumnChartOptions, ctx: ChartContext) -> Self {
		let range = options.range;
		let fetches = !options.url.is_empty();
		let mut chart = Self::new(options, ctx);
		if fetches && let Err(error) = chart.update(range.from, range.to).await {
			chart.ctx.sink.report("column_chart.update", &error);
		}
		chart
	}

	/// Fetches the series for `[from, to]` and redraws.
	///
	/// Dates are sent as their UTC calendar day. Returns the fetched mapping in
	/// response order. The loading state is cleared only when the series is
	/// non-empty. A destroyed chart returns an empty series without fetching.
	pub async fn update(&mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> ChartResult<Series> {
		if self.element.is_none() {
			return Ok(Series::new());
		}
		if self.options.url.is_empty() {
			return Err(ChartError::MissingEndpoint);
		}
		self.set_loading(true);

		let mut url = resolve_endpoint(&self.ctx.base_url, &self.options.url)?;
		set_query_params(
			&mut url,
			[
				("from", from.format("%Y-%m-%d").to_string()),
				("to", to.format("%Y-%m-%d").to_string()),
			],
		);
		tracing::debug!(%url, "loading chart series");

		let body = self.ctx.fetcher.get_json(&url).await?;
		let series = decode_series(&body)?;

		if self.element.is_none() {
			return Ok(series);
		}
		self.data = series.iter().map(|(_, value)| *value).collect();
		let total: f64 = self.data.iter().sum();
		let heading = (self.options.format_heading)(total);
		let bars = bars(&self.data, self.options.chart_height);

		if let Some(root) = self.element.as_mut() {
			if let Some(header) = self.landmarks.resolve_mut(root, "header") {
				header.replace_children([heading]);
			}
			if let Some(body) = self.landmarks.resolve_mut(root, "body") {
				body.replace_children(bars);
			}
		}
		if !self.data.is_empty() {
			self.set_loading(false);
		}
		Ok(series)
	}

	fn set_loading(&mut self, loading: bool) {
		if let Some(root) = self.element.as_mut() {
			root.toggle_class(LOADING_CLASS, loading);
		}
	}

	/// The root element, or `None` once destroyed.
	pub fn element(&self) -> Option<&Element> {
		self.element.as_ref()
	}

	/// Current series values.
	pub fn data(&self) -> &[f64] {
		&self.data
	}

	/// Heading text.
	pub fn heading(&self) -> Option<String> {
		let root = self.element.as_ref()?;
		Some(self.landmarks.resolve(root, "header")?.text_content())
	}

	/// Whether the loading state is shown.
	pub fn is_loading(&self) -> bool {
		self.element
			.as_ref()
			.is_some_and(|root| root.has_class(LOADING_CLASS))
	}

	/// Serializes the root element.
	pub fn to_html(&self) -> Option<String> {
		self.element.as_ref().map(Element::render_to_string)
	}

	/// Detaches the chart from the document.
	pub fn remove(&mut self) {
		self.attached = false;
	}

	/// Whether the chart is attached to the document.
	pub fn is_attached(&self) -> bool {
		self.attached
	}

	/// Releases the tree. Idempotent.
	pub fn destroy(&mut self) {
		self.remove();
		self.element = None;
		self.landmarks.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use vitrina_http::testing::MockFetcher;

	fn context() -> ChartContext {
		ChartContext::new(
			Url::parse("https://course-js.javascript.ru").unwrap(),
			Arc::new(MockFetcher::new()),
		)
	}

	#[rstest]
	#[case::scaled(vec![10.0, 25.0, 50.0], vec![(10, "20%"), (25, "50%"), (50, "100%")])]
	#[case::floor_and_round(vec![1.0, 3.0], vec![(16, "33%"), (50, "100%")])]
	#[case::all_zero(vec![0.0, 0.0], vec![(0, "0%"), (0, "0%")])]
	#[case::empty(vec![], vec![])]
	fn test_column_props(#[case] data: Vec<f64>, #[case] expected: Vec<(i64, &str)>) {
		let props = column_props(&data, 50);

		let props: Vec<(i64, &str)> = props.iter().map(|(h, t)| (*h, t.as_str())).collect();
		assert_eq!(props, expected);
	}

	#[rstest]
	fn test_static_chart_markup() {
		// Arrange
		let options = ColumnChartOptions::default()
			.with_label("orders")
			.with_link("/sales")
			.with_value(344.0)
			.with_data(vec![10.0, 20.0]);

		// Act
		let chart = ColumnChart::new(options, context());

		// Assert
		let html = chart.to_html().unwrap();
		assert!(html.starts_with(r#"<div class="column-chart" style="--chart-height: 50">"#));
		assert!(html.contains(r#"Total orders<a class="column-chart__link" href="/sales">View all</a>"#));
		assert!(html.contains(r#"<div style="--value: 25" data-tooltip="50%"></div>"#));
		assert_eq!(chart.heading().as_deref(), Some("344"));
		assert!(!chart.is_loading());
	}

	#[rstest]
	fn test_empty_chart_is_loading_and_has_no_link() {
		let chart = ColumnChart::new(ColumnChartOptions::default().with_label("sales"), context());

		assert!(chart.is_loading());
		assert!(!chart.to_html().unwrap().contains("View all"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_static_chart_cannot_update() {
		let mut chart = ColumnChart::new(ColumnChartOptions::default().with_data(vec![1.0]), context());

		let result = chart.update(Utc::now(), Utc::now()).await;

		assert!(matches!(result, Err(ChartError::MissingEndpoint)));
	}

	#[rstest]
	fn test_destroy() {
		let mut chart = ColumnChart::new(ColumnChartOptions::default(), context());

		chart.destroy();
		chart.destroy();

		assert!(chart.element().is_none());
		assert!(!chart.is_attached());
		assert_eq!(chart.heading(), None);
	}
}
