//! The fetch boundary and its reqwest implementation

use crate::error::{FetchError, FetchResult};
use async_trait::async_trait;
use serde_json::Value;
use url::Url;
use vitrina_conf::BackendSettings;

/// GETs a URL and decodes the body as JSON.
#[async_trait]
pub trait FetchJson: Send + Sync {
	/// Performs the request.
	///
	/// Transport failures and non-2xx statuses are network errors; a body that
	/// is not JSON is a decode error.
	async fn get_json(&self, url: &Url) -> FetchResult<Value>;
}

#[async_trait]
impl<T: FetchJson + ?Sized> FetchJson for std::sync::Arc<T> {
	async fn get_json(&self, url: &Url) -> FetchResult<Value> {
		(**self).get_json(url).await
	}
}

/// [`FetchJson`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
	client: reqwest::Client,
}

impl ReqwestFetcher {
	/// Builds a client using the backend request timeout.
	pub fn new(settings: &BackendSettings) -> FetchResult<Self> {
		let client = reqwest::Client::builder()
			.timeout(settings.request_timeout())
			.build()
			.map_err(|e| FetchError::Network(format!("Failed to create client: {}", e)))?;
		Ok(Self { client })
	}

	/// Wraps an already configured client.
	pub fn with_client(client: reqwest::Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl FetchJson for ReqwestFetcher {
	async fn get_json(&self, url: &Url) -> FetchResult<Value> {
		tracing::debug!(%url, "GET");

		let response = self
			.client
			.get(url.clone())
			.send()
			.await
			.map_err(|e| FetchError::Network(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			tracing::warn!(%url, status = status.as_u16(), "request rejected");
			return Err(FetchError::Status {
				status: status.as_u16(),
				url: url.to_string(),
			});
		}

		// Read the bytes first so a broken body is told apart from a broken connection.
		let body = response
			.bytes()
			.await
			.map_err(|e| FetchError::Network(e.to_string()))?;
		serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
	}
}
