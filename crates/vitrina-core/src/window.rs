//! Document-level scroll event stream.
//!
//! Any number of widgets may subscribe. Each listener inspects the scroll
//! geometry synchronously and may hand back a task (for example a page fetch);
//! [`Window::dispatch_scroll`] drives every returned task to completion.

use futures::future::{BoxFuture, join_all};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Scroll geometry observed at the time of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
	/// Bottom edge of the document relative to the viewport top, in pixels.
	pub document_bottom: f64,
	/// Height of the viewport, in pixels.
	pub viewport_height: f64,
}

impl ScrollMetrics {
	/// Creates scroll metrics.
	pub fn new(document_bottom: f64, viewport_height: f64) -> Self {
		Self {
			document_bottom,
			viewport_height,
		}
	}

	/// Returns whether the document bottom is within `border` pixels of the viewport bottom.
	pub fn is_near_bottom(&self, border: f64) -> bool {
		self.document_bottom < self.viewport_height + border
	}
}

/// Work a listener schedules in response to a scroll event.
pub type ScrollTask = BoxFuture<'static, ()>;

/// Scroll listener callback.
pub type ScrollListener = Arc<dyn Fn(ScrollMetrics) -> Option<ScrollTask> + Send + Sync>;

/// Handle returned by [`Window::add_scroll_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Shared scroll event source.
#[derive(Default)]
pub struct Window {
	listeners: Mutex<Vec<(ListenerId, ScrollListener)>>,
	next_id: AtomicU64,
}

impl std::fmt::Debug for Window {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Window")
			.field("scroll_listeners", &self.scroll_listener_count())
			.finish()
	}
}

impl Window {
	/// Creates a window without listeners.
	pub fn new() -> Self {
		Self::default()
	}

	/// Subscribes to scroll events.
	pub fn add_scroll_listener<F>(&self, listener: F) -> ListenerId
	where
		F: Fn(ScrollMetrics) -> Option<ScrollTask> + Send + Sync + 'static,
	{
		let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
		self.listeners.lock().push((id, Arc::new(listener)));
		id
	}

	/// Unsubscribes a listener. Returns whether it was subscribed.
	pub fn remove_scroll_listener(&self, id: ListenerId) -> bool {
		let mut listeners = self.listeners.lock();
		let before = listeners.len();
		listeners.retain(|(existing, _)| *existing != id);
		listeners.len() != before
	}

	/// Number of subscribed listeners.
	pub fn scroll_listener_count(&self) -> usize {
		self.listeners.lock().len()
	}

	/// Delivers a scroll event and waits for the tasks it triggered.
	pub async fn dispatch_scroll(&self, metrics: ScrollMetrics) {
		// Snapshot first: listeners may unsubscribe while their task runs.
		let listeners: Vec<ScrollListener> = self
			.listeners
			.lock()
			.iter()
			.map(|(_, listener)| Arc::clone(listener))
			.collect();

		let tasks: Vec<ScrollTask> = listeners
			.iter()
			.filter_map(|listener| listener(metrics))
			.collect();

		join_all(tasks).await;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::atomic::AtomicUsize;

	#[rstest]
	#[case::far_from_bottom(2000.0, 800.0, 300.0, false)]
	#[case::inside_border(1000.0, 800.0, 300.0, true)]
	#[case::exactly_on_border(1100.0, 800.0, 300.0, false)]
	fn test_is_near_bottom(
		#[case] bottom: f64,
		#[case] height: f64,
		#[case] border: f64,
		#[case] expected: bool,
	) {
		assert_eq!(ScrollMetrics::new(bottom, height).is_near_bottom(border), expected);
	}

	#[rstest]
	#[tokio::test]
	async fn test_dispatch_runs_every_listener_task() {
		// Arrange
		let window = Window::new();
		let counter = Arc::new(AtomicUsize::new(0));
		for _ in 0..3 {
			let counter = Arc::clone(&counter);
			window.add_scroll_listener(move |_| {
				let counter = Arc::clone(&counter);
				Some(Box::pin(async move {
					counter.fetch_add(1, Ordering::SeqCst);
				}) as ScrollTask)
			});
		}
		window.add_scroll_listener(|_| None);

		// Act
		window.dispatch_scroll(ScrollMetrics::new(0.0, 800.0)).await;

		// Assert
		assert_eq!(counter.load(Ordering::SeqCst), 3);
	}

	#[rstest]
	#[tokio::test]
	async fn test_removed_listener_is_not_called() {
		let window = Window::new();
		let calls = Arc::new(AtomicUsize::new(0));
		let id = {
			let calls = Arc::clone(&calls);
			window.add_scroll_listener(move |_| {
				calls.fetch_add(1, Ordering::SeqCst);
				None
			})
		};

		assert!(window.remove_scroll_listener(id));
		assert!(!window.remove_scroll_listener(id));
		window.dispatch_scroll(ScrollMetrics::new(0.0, 800.0)).await;

		assert_eq!(calls.load(Ordering::SeqCst), 0);
		assert_eq!(window.scroll_listener_count(), 0);
	}
}
