//! Dotted-path resolver.
//!
//! ```
//! use serde_json::json;
//! use vitrina_core::getter::create_getter;
//!
//! let price = create_getter("product.price.amount");
//! let record = json!({"product": {"price": {"amount": 42}}});
//!
//! assert_eq!(price.get(&record), Some(&json!(42)));
//! assert_eq!(price.get(&json!({})), None);
//! ```

use serde_json::{Map, Value};

/// Resolver for one dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Getter {
	path: String,
	segments: Vec<String>,
}

/// Builds a resolver for `path`, splitting it on `.`.
pub fn create_getter(path: &str) -> Getter {
	Getter {
		path: path.to_string(),
		segments: path.split('.').map(str::to_string).collect(),
	}
}

fn has_keys(value: &Value) -> bool {
	match value {
		Value::Object(map) => !map.is_empty(),
		Value::Array(items) => !items.is_empty(),
		_ => false,
	}
}

impl Getter {
	/// The path this resolver was built from.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// The path segments, in traversal order.
	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	/// Walks `record` segment by segment.
	///
	/// Returns `None` when the record has no keys or when any segment is
	/// missing along the way. Numeric segments index into arrays.
	pub fn get<'a>(&self, record: &'a Value) -> Option<&'a Value> {
		if !has_keys(record) {
			return None;
		}
		let mut current = record;
		for segment in &self.segments {
			current = match current {
				Value::Object(map) => map.get(segment)?,
				Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
				_ => return None,
			};
		}
		Some(current)
	}

	/// Builds the smallest record in which this path resolves to `value`.
	pub fn wrap(&self, value: Value) -> Value {
		self.segments.iter().rev().fold(value, |inner, segment| {
			let mut map = Map::new();
			map.insert(segment.clone(), inner);
			Value::Object(map)
		})
	}
}
