//! Fetch error types

use thiserror::Error;

/// Errors raised while fetching or decoding a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
	/// The request never produced a response (connection, timeout, TLS).
	#[error("Network error: {0}")]
	Network(String),

	/// The server answered with a non-2xx status.
	#[error("Unexpected status {status} from {url}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Requested URL.
		url: String,
	},

	/// The body is not what the caller expected.
	#[error("Decode error: {0}")]
	Decode(String),
}

impl FetchError {
	/// Returns whether this is a network failure, non-2xx statuses included.
	pub fn is_network(&self) -> bool {
		matches!(self, Self::Network(_) | Self::Status { .. })
	}

	/// Returns whether the body could not be decoded.
	pub fn is_decode(&self) -> bool {
		matches!(self, Self::Decode(_))
	}
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(FetchError::Network("connection refused".into()), true, false)]
	#[case(FetchError::Status { status: 503, url: "http://localhost/".into() }, true, false)]
	#[case(FetchError::Decode("expected an array".into()), false, true)]
	fn test_classification(
		#[case] error: FetchError,
		#[case] network: bool,
		#[case] decode: bool,
	) {
		assert_eq!(error.is_network(), network);
		assert_eq!(error.is_decode(), decode);
	}

	#[rstest]
	fn test_status_display() {
		let error = FetchError::Status {
			status: 404,
			url: "https://course-js.javascript.ru/api/rest/products".into(),
		};
		assert_eq!(
			error.to_string(),
			"Unexpected status 404 from https://course-js.javascript.ru/api/rest/products"
		);
	}
}
