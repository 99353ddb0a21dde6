//! `data-element` landmark index.

use super::Element;
use std::collections::HashMap;

/// Child-index path from a root element to one of its descendants.
pub type NodePath = Vec<usize>;

/// Maps `data-element` names to the nodes carrying them.
///
/// The index is built once after the initial render. Widgets only rewrite the
/// contents of landmarks, never the structure above them, so stored paths stay
/// valid for the lifetime of the tree. When several nodes share a name the
/// last one in document order wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Landmarks {
	paths: HashMap<String, NodePath>,
}

impl Landmarks {
	/// Attribute that tags a landmark.
	pub const ATTRIBUTE: &'static str = "data-element";

	/// Scans the descendants of `root` for `data-element` attributes.
	pub fn collect(root: &Element) -> Self {
		let mut paths = HashMap::new();
		for path in root.descendant_paths(|el| el.has_attribute(Self::ATTRIBUTE)) {
			let name = root
				.at_path(&path)
				.and_then(|el| el.get_attribute(Self::ATTRIBUTE))
				.map(str::to_string);
			if let Some(name) = name {
				paths.insert(name, path);
			}
		}
		Self { paths }
	}

	/// Path of the named landmark.
	pub fn get(&self, name: &str) -> Option<&[usize]> {
		self.paths.get(name).map(Vec::as_slice)
	}

	/// Returns whether the named landmark exists.
	pub fn contains(&self, name: &str) -> bool {
		self.paths.contains_key(name)
	}

	/// Landmark names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.paths.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	/// Number of landmarks.
	pub fn len(&self) -> usize {
		self.paths.len()
	}

	/// Returns whether no landmark was found.
	pub fn is_empty(&self) -> bool {
		self.paths.is_empty()
	}

	/// Forgets every landmark.
	pub fn clear(&mut self) {
		self.paths.clear();
	}

	/// Resolves the named landmark inside `root`.
	pub fn resolve<'a>(&self, root: &'a Element, name: &str) -> Option<&'a Element> {
		root.at_path(self.get(name)?)
	}

	/// Mutable variant of [`Landmarks::resolve`].
	pub fn resolve_mut<'a>(&self, root: &'a mut Element, name: &str) -> Option<&'a mut Element> {
		root.at_path_mut(self.get(name)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::html::{div, span};
	use rstest::rstest;

	fn tree() -> Element {
		div().child(
			div()
				.attr("data-element", "header")
				.child(div().child(span().attr("data-element", "arrow")))
				.child(div().child(span().attr("data-element", "arrow").attr("id", "last"))),
		)
		.child(div().attr("data-element", "body"))
	}

	#[rstest]
	fn test_collect_landmarks() {
		let landmarks = Landmarks::collect(&tree());

		assert_eq!(landmarks.names(), vec!["arrow", "body", "header"]);
		assert_eq!(landmarks.get("body"), Some(&[1usize][..]));
	}

	#[rstest]
	fn test_last_duplicate_wins() {
		let root = tree();
		let landmarks = Landmarks::collect(&root);

		let arrow = landmarks.resolve(&root, "arrow").unwrap();

		assert_eq!(arrow.get_attribute("id"), Some("last"));
	}

	#[rstest]
	fn test_resolve_mut_and_clear() {
		let mut root = tree();
		let mut landmarks = Landmarks::collect(&root);

		landmarks
			.resolve_mut(&mut root, "body")
			.unwrap()
			.append_child("row");
		assert_eq!(landmarks.resolve(&root, "body").unwrap().text_content(), "row");

		landmarks.clear();
		assert!(landmarks.is_empty());
		assert!(landmarks.resolve(&root, "body").is_none());
	}
}
