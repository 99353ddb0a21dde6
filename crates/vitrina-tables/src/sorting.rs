//! Sort orders, sort types and record comparators

use crate::collation;
use crate::error::{TableError, TableResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use vitrina_core::{Record, display_value};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
	/// Ascending order
	#[default]
	Asc,
	/// Descending order
	Desc,
}

impl SortOrder {
	/// Query-string spelling of the order.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}

	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Asc => Self::Desc,
			Self::Desc => Self::Asc,
		}
	}

	/// Applies the direction to an ascending comparison result.
	pub fn apply(&self, ordering: Ordering) -> Ordering {
		match self {
			Self::Asc => ordering,
			Self::Desc => ordering.reverse(),
		}
	}

	/// Parses an optional order, defaulting to ascending.
	pub fn parse_or_default(order: Option<&str>) -> TableResult<Self> {
		order.map_or(Ok(Self::default()), str::parse)
	}
}

impl FromStr for SortOrder {
	type Err = TableError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"asc" => Ok(Self::Asc),
			"desc" => Ok(Self::Desc),
			other => Err(TableError::InvalidSortOrder(other.to_string())),
		}
	}
}

impl fmt::Display for SortOrder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// How a column's values are compared.
///
/// Unrecognized names deserialize into [`SortType::Unknown`] and fail only
/// when a sort actually needs a comparator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortType {
	/// Numeric comparison; numeric strings are coerced.
	Number,
	/// Collated text comparison.
	String,
	/// Chronological comparison.
	Date,
	/// A sort type this crate does not know.
	Unknown(String),
}

impl SortType {
	/// Name used in column declarations.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Number => "number",
			Self::String => "string",
			Self::Date => "date",
			Self::Unknown(name) => name,
		}
	}

	/// Returns the ascending comparator for this type.
	pub fn comparator(&self) -> TableResult<Comparator> {
		match self {
			Self::Number => Ok(compare_numbers),
			Self::String => Ok(compare_strings),
			Self::Date => Ok(compare_dates),
			Self::Unknown(name) => Err(TableError::InvalidSortType(name.clone())),
		}
	}
}

impl From<String> for SortType {
	fn from(name: String) -> Self {
		match name.as_str() {
			"number" => Self::Number,
			"string" => Self::String,
			"date" => Self::Date,
			_ => Self::Unknown(name),
		}
	}
}

impl From<&str> for SortType {
	fn from(name: &str) -> Self {
		Self::from(name.to_string())
	}
}

impl From<SortType> for String {
	fn from(sort_type: SortType) -> Self {
		sort_type.as_str().to_string()
	}
}

/// Ascending comparison of two field values. Absent values are `None`.
pub type Comparator = fn(Option<&Value>, Option<&Value>) -> Ordering;

/// Values that cannot be compared sort after those that can.
fn compare_keys<T>(a: Option<T>, b: Option<T>, cmp: impl FnOnce(&T, &T) -> Ordering) -> Ordering {
	match (a, b) {
		(Some(a), Some(b)) => cmp(&a, &b),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}

fn as_number(value: Option<&Value>) -> Option<f64> {
	match value? {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
		_ => None,
	}
}

fn as_instant(value: Option<&Value>) -> Option<i64> {
	match value? {
		Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
		Value::String(s) => parse_instant(s.trim()),
		_ => None,
	}
}

/// Milliseconds since the epoch. Timestamps without an offset are read as UTC.
fn parse_instant(s: &str) -> Option<i64> {
	if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
		return Some(instant.timestamp_millis());
	}
	for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
		if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
			return Some(naive.and_utc().timestamp_millis());
		}
	}
	NaiveDate::parse_from_str(s, "%Y-%m-%d")
		.ok()
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|naive| naive.and_utc().timestamp_millis())
}

fn compare_numbers(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	compare_keys(as_number(a), as_number(b), |a, b| a.total_cmp(b))
}

fn compare_strings(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	collation::compare(&display_value(a), &display_value(b))
}

fn compare_dates(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	compare_keys(as_instant(a), as_instant(b), Ord::cmp)
}

/// Returns a sorted copy of `records`, ordered by `field`.
///
/// The sort is stable: records comparing equal keep their relative order in
/// both directions.
pub fn sort_records(
	records: &[Record],
	field: &str,
	sort_type: &SortType,
	order: SortOrder,
) -> TableResult<Vec<Record>> {
	let compare = sort_type.comparator()?;
	let mut sorted = records.to_vec();
	sorted.sort_by(|a, b| order.apply(compare(a.get(field), b.get(field))));
	Ok(sorted)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn records(values: Vec<Value>) -> Vec<Record> {
		values
			.into_iter()
			.enumerate()
			.map(|(index, value)| {
				let mut record = Record::new();
				record.insert("id".into(), json!(index));
				record.insert("value".into(), value);
				record
			})
			.collect()
	}

	fn ids(records: &[Record]) -> Vec<u64> {
		records.iter().filter_map(|r| r["id"].as_u64()).collect()
	}

	#[rstest]
	#[case("asc", Ok(SortOrder::Asc))]
	#[case("desc", Ok(SortOrder::Desc))]
	fn test_parse_order(#[case] input: &str, #[case] expected: Result<SortOrder, ()>) {
		assert_eq!(input.parse::<SortOrder>().map_err(|_| ()), expected);
	}

	#[rstest]
	#[case("ASC")]
	#[case("up")]
	#[case("")]
	fn test_parse_order_rejects(#[case] input: &str) {
		let error = input.parse::<SortOrder>().unwrap_err();
		assert!(matches!(error, TableError::InvalidSortOrder(order) if order == input));
	}

	#[rstest]
	fn test_omitted_order_is_ascending() {
		assert_eq!(SortOrder::parse_or_default(None).unwrap(), SortOrder::Asc);
		assert_eq!(SortOrder::toggle(&SortOrder::Asc), SortOrder::Desc);
	}

	#[rstest]
	fn test_sort_type_from_name() {
		assert_eq!(SortType::from("number"), SortType::Number);
		assert_eq!(SortType::from("date"), SortType::Date);
		assert_eq!(SortType::from("money"), SortType::Unknown("money".into()));
		assert_eq!(
			serde_json::from_value::<SortType>(json!("string")).unwrap(),
			SortType::String
		);
		assert_eq!(serde_json::to_value(SortType::Date).unwrap(), json!("date"));
	}

	#[rstest]
	fn test_unknown_sort_type_fails() {
		let data = records(vec![json!(1)]);

		let error = sort_records(&data, "value", &SortType::from("money"), SortOrder::Asc)
			.unwrap_err();

		assert!(matches!(error, TableError::InvalidSortType(name) if name == "money"));
	}

	#[rstest]
	#[case::asc(SortOrder::Asc, vec![1, 3, 0, 2])]
	#[case::desc(SortOrder::Desc, vec![2, 0, 3, 1])]
	fn test_number_sort(#[case] order: SortOrder, #[case] expected: Vec<u64>) {
		// Arrange
		let data = records(vec![json!(10), json!(2), json!("25"), json!(3.5)]);

		// Act
		let sorted = sort_records(&data, "value", &SortType::Number, order).unwrap();

		// Assert
		assert_eq!(ids(&sorted), expected);
	}

	#[rstest]
	fn test_number_sort_puts_non_numbers_last() {
		let data = records(vec![json!(null), json!(5), json!("n/a"), json!(1)]);

		let sorted = sort_records(&data, "value", &SortType::Number, SortOrder::Asc).unwrap();

		assert_eq!(ids(&sorted), vec![3, 1, 0, 2]);
	}

	#[rstest]
	fn test_date_sort_compares_instants() {
		// Arrange
		let data = records(vec![
			json!("2024-03-01T10:00:00+03:00"),
			json!("2024-02-29"),
			json!("2024-03-01T06:59:00Z"),
			json!(1_709_000_000_000_i64),
		]);

		// Act
		let sorted = sort_records(&data, "value", &SortType::Date, SortOrder::Asc).unwrap();

		// Assert
		assert_eq!(ids(&sorted), vec![3, 1, 2, 0]);
	}

	#[rstest]
	fn test_string_sort_collates() {
		let data = records(vec![json!("Б"), json!("а"), json!("ёж"), json!("Apple")]);

		let sorted = sort_records(&data, "value", &SortType::String, SortOrder::Asc).unwrap();

		assert_eq!(ids(&sorted), vec![1, 0, 2, 3]);
	}

	#[rstest]
	#[case::asc(SortOrder::Asc)]
	#[case::desc(SortOrder::Desc)]
	fn test_sort_is_stable(#[case] order: SortOrder) {
		let data = records(vec![json!(1), json!(1), json!(0), json!(1)]);

		let sorted = sort_records(&data, "value", &SortType::Number, order).unwrap();

		let ones: Vec<u64> = ids(&sorted).into_iter().filter(|id| *id != 2).collect();
		assert_eq!(ones, vec![0, 1, 3]);
	}
}
