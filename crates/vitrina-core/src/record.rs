//! Records exchanged with the backend.

use serde_json::{Map, Value};

/// A decoded backend record: a JSON object keyed by field id.
pub type Record = Map<String, Value>;

/// Renders a field value the way it appears inside a cell.
///
/// Strings are shown without quotes; `null` and missing values render empty.
pub fn display_value(value: Option<&Value>) -> String {
	match value {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(s)) => s.clone(),
		Some(Value::Number(n)) => n.to_string(),
		Some(Value::Bool(b)) => b.to_string(),
		Some(other) => other.to_string(),
	}
}
