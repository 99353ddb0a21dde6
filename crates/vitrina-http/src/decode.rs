//! Response body decoding

use crate::error::{FetchError, FetchResult};
use serde_json::Value;
use vitrina_core::Record;

/// Date-keyed numeric series, in response order.
pub type Series = Vec<(String, f64)>;

/// Decodes a grid page: a JSON array of objects.
pub fn decode_records(body: Value) -> FetchResult<Vec<Record>> {
	let Value::Array(items) = body else {
		return Err(FetchError::Decode(format!(
			"expected an array of records, got {}",
			kind(&body)
		)));
	};

	items
		.into_iter()
		.enumerate()
		.map(|(index, item)| match item {
			Value::Object(record) => Ok(record),
			other => Err(FetchError::Decode(format!(
				"record {} is {}, expected an object",
				index,
				kind(&other)
			))),
		})
		.collect()
}

/// Decodes a chart series: a JSON object mapping keys to numbers.
pub fn decode_series(body: &Value) -> FetchResult<Series> {
	let Value::Object(map) = body else {
		return Err(FetchError::Decode(format!(
			"expected an object of values, got {}",
			kind(body)
		)));
	};

	map.iter()
		.map(|(key, value)| {
			value
				.as_f64()
				.map(|number| (key.clone(), number))
				.ok_or_else(|| {
					FetchError::Decode(format!("value for {} is {}, expected a number", key, kind(value)))
				})
		})
		.collect()
}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
