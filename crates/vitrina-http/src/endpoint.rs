//! Endpoint and query-string helpers

use url::Url;

/// Resolves a widget endpoint against the backend base URL.
///
/// Relative endpoints are joined onto `base`; absolute ones are kept as they are.
pub fn resolve_endpoint(base: &Url, endpoint: &str) -> Result<Url, url::ParseError> {
	base.join(endpoint)
}

/// Sets query parameters, replacing existing values in place.
///
/// Keys already present keep their position; duplicates of a replaced key
/// are dropped. New keys are appended in the order given.
pub fn set_query_params<K, V>(url: &mut Url, params: impl IntoIterator<Item = (K, V)>)
where
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

	for (key, value) in params {
		let (key, value) = (key.as_ref(), value.as_ref());
		match pairs.iter().position(|(k, _)| k == key) {
			Some(first) => {
				pairs[first].1 = value.to_string();
				let mut index = 0;
				pairs.retain(|(k, _)| {
					let keep = index <= first || k != key;
					index += 1;
					keep
				});
			}
			None => pairs.push((key.to_string(), value.to_string())),
		}
	}

	if pairs.is_empty() {
		url.set_query(None);
	} else {
		url.query_pairs_mut().clear().extend_pairs(&pairs);
	}
}
