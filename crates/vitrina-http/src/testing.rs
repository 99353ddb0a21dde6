//! Scripted [`FetchJson`] for tests
//!
//! Routes match when their needle is a substring of the requested URL and are
//! tried in registration order. One-shot routes are consumed by the first
//! request they answer; gated routes hold the request open until the test
//! releases them, which makes overlapping in-flight requests deterministic.

use crate::client::FetchJson;
use crate::error::{FetchError, FetchResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::oneshot;
use url::Url;

type Fallback = Arc<dyn Fn(&Url) -> FetchResult<Value> + Send + Sync>;

enum Reply {
	Always(FetchResult<Value>),
	Once(FetchResult<Value>),
	Gated(oneshot::Receiver<FetchResult<Value>>),
}

struct Route {
	needle: String,
	reply: Reply,
}

/// Releases a gated route.
#[derive(Debug)]
pub struct Gate {
	sender: oneshot::Sender<FetchResult<Value>>,
}

impl Gate {
	/// Completes the held request with `body`.
	pub fn release(self, body: Value) {
		let _ = self.sender.send(Ok(body));
	}

	/// Completes the held request with `error`.
	pub fn fail(self, error: FetchError) {
		let _ = self.sender.send(Err(error));
	}
}

/// In-memory fetcher answering from scripted routes.
#[derive(Clone)]
pub struct MockFetcher {
	routes: Arc<Mutex<Vec<Route>>>,
	requests: Arc<Mutex<Vec<Url>>>,
	fallback: Fallback,
}

impl Default for MockFetcher {
	fn default() -> Self {
		Self {
			routes: Arc::default(),
			requests: Arc::default(),
			fallback: Arc::new(|url: &Url| -> FetchResult<Value> {
				Err(FetchError::Network(format!("no route for {}", url)))
			}),
		}
	}
}

impl std::fmt::Debug for MockFetcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MockFetcher")
			.field("routes", &self.routes.lock().len())
			.field("requests", &self.requests.lock().len())
			.finish()
	}
}

impl MockFetcher {
	/// Creates a fetcher whose unmatched requests fail with a network error.
	pub fn new() -> Self {
		Self::default()
	}

	/// Answers unmatched requests with `fallback`.
	pub fn with_fallback<F>(mut self, fallback: F) -> Self
	where
		F: Fn(&Url) -> FetchResult<Value> + Send + Sync + 'static,
	{
		self.fallback = Arc::new(fallback);
		self
	}

	fn push(&self, needle: &str, reply: Reply) {
		self.routes.lock().push(Route {
			needle: needle.to_string(),
			reply,
		});
	}

	/// Answers every matching request with `body`.
	pub fn respond(&self, needle: &str, body: Value) -> &Self {
		self.push(needle, Reply::Always(Ok(body)));
		self
	}

	/// Answers the next matching request with `body`.
	pub fn respond_once(&self, needle: &str, body: Value) -> &Self {
		self.push(needle, Reply::Once(Ok(body)));
		self
	}

	/// Fails the next matching request with `error`.
	pub fn fail_once(&self, needle: &str, error: FetchError) -> &Self {
		self.push(needle, Reply::Once(Err(error)));
		self
	}

	/// Holds the next matching request open until the returned gate is used.
	///
	/// Dropping the gate fails the request with a network error.
	pub fn gate(&self, needle: &str) -> Gate {
		let (sender, receiver) = oneshot::channel();
		self.push(needle, Reply::Gated(receiver));
		Gate { sender }
	}

	/// Every URL requested so far, in order.
	pub fn requests(&self) -> Vec<Url> {
		self.requests.lock().clone()
	}

	/// Number of requests made so far.
	pub fn request_count(&self) -> usize {
		self.requests.lock().len()
	}

	/// Last URL requested.
	pub fn last_request(&self) -> Option<Url> {
		self.requests.lock().last().cloned()
	}

	fn take_reply(&self, url: &Url) -> Option<Reply> {
		let mut routes = self.routes.lock();
		let index = routes
			.iter()
			.position(|route| url.as_str().contains(&route.needle))?;
		match &routes[index].reply {
			Reply::Always(result) => Some(Reply::Always(result.clone())),
			_ => Some(routes.remove(index).reply),
		}
	}
}

#[async_trait]
impl FetchJson for MockFetcher {
	async fn get_json(&self, url: &Url) -> FetchResult<Value> {
		self.requests.lock().push(url.clone());

		match self.take_reply(url) {
			Some(Reply::Always(result)) | Some(Reply::Once(result)) => result,
			Some(Reply::Gated(receiver)) => receiver
				.await
				.unwrap_or_else(|_| Err(FetchError::Network("gate dropped".to_string()))),
			None => (self.fallback)(url),
		}
	}
}
