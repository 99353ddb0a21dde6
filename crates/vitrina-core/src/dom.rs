//! Headless DOM model.
//!
//! Widgets build their subtree once, index the nodes tagged with
//! `data-element` ([`Landmarks`]) and afterwards rewrite those nodes in place:
//! replacing a body's children, toggling classes, moving a `data-order`
//! marker between header cells.
//!
//! ## Example
//!
//! ```
//! use vitrina_core::dom::{Landmarks, html::div};
//!
//! let mut root = div()
//!     .attr("class", "grid")
//!     .child(div().attr("data-element", "body"));
//! let landmarks = Landmarks::collect(&root);
//!
//! let body = landmarks.resolve_mut(&mut root, "body").unwrap();
//! body.replace_children([div().child("row")]);
//!
//! assert_eq!(
//!     root.render_to_string(),
//!     r#"<div class="grid"><div data-element="body"><div>row</div></div></div>"#
//! );
//! ```

pub mod html;
pub mod landmarks;
mod util;

pub use landmarks::{Landmarks, NodePath};
pub use util::html_escape;

use std::borrow::Cow;

/// A node in the widget tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	/// An element.
	Element(Element),
	/// A text node, escaped on render.
	Text(Cow<'static, str>),
	/// Pre-rendered markup, emitted verbatim on render.
	///
	/// Cell templates hand their output back in this form.
	Markup(String),
}

impl Node {
	/// Creates a text node.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a markup node.
	pub fn markup(markup: impl Into<String>) -> Self {
		Self::Markup(markup.into())
	}

	/// Returns the element if this node is one.
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Node::Element(el) => Some(el),
			_ => None,
		}
	}

	/// Renders the node to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_into(&mut output);
		output
	}

	fn render_into(&self, output: &mut String) {
		match self {
			Node::Element(el) => el.render_into(output),
			Node::Text(text) => output.push_str(&html_escape(text)),
			Node::Markup(markup) => output.push_str(markup),
		}
	}

	fn collect_text(&self, output: &mut String) {
		match self {
			Node::Element(el) => {
				for child in &el.children {
					child.collect_text(output);
				}
			}
			Node::Text(text) => output.push_str(text),
			Node::Markup(markup) => output.push_str(markup),
		}
	}
}

/// An element with attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<Node>,
	is_void: bool,
}

impl Element {
	/// Creates a new element.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	/// Sets an attribute (builder form).
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.set_attribute(name, value);
		self
	}

	/// Appends a child (builder form).
	pub fn child(mut self, child: impl IntoNode) -> Self {
		self.children.push(child.into_node());
		self
	}

	/// Appends several children (builder form).
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoNode>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoNode::into_node));
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}

	/// Returns the attributes in insertion order.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the value of an attribute.
	pub fn get_attribute(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_ref())
	}

	/// Returns whether the attribute is present.
	pub fn has_attribute(&self, name: &str) -> bool {
		self.get_attribute(name).is_some()
	}

	/// Sets an attribute, replacing any previous value in place.
	pub fn set_attribute(
		&mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) {
		let name = name.into();
		let value = value.into();
		match self.attrs.iter_mut().find(|(n, _)| *n == name) {
			Some((_, existing)) => *existing = value,
			None => self.attrs.push((name, value)),
		}
	}

	/// Removes an attribute. Returns whether it was present.
	pub fn remove_attribute(&mut self, name: &str) -> bool {
		let before = self.attrs.len();
		self.attrs.retain(|(n, _)| n != name);
		self.attrs.len() != before
	}

	/// Returns whether the `class` attribute contains `class`.
	pub fn has_class(&self, class: &str) -> bool {
		self.get_attribute("class")
			.is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
	}

	/// Adds or removes `class` from the `class` attribute.
	pub fn toggle_class(&mut self, class: &str, on: bool) {
		if self.has_class(class) == on {
			return;
		}
		let mut classes: Vec<&str> = self
			.get_attribute("class")
			.map(|c| c.split_whitespace().collect())
			.unwrap_or_default();
		if on {
			classes.push(class);
		} else {
			classes.retain(|c| *c != class);
		}
		let joined = classes.join(" ");
		if joined.is_empty() {
			self.remove_attribute("class");
		} else {
			self.set_attribute("class", joined);
		}
	}

	/// Returns the child nodes.
	pub fn child_nodes(&self) -> &[Node] {
		&self.children
	}

	/// Iterates over the element children, skipping text and markup.
	pub fn element_children(&self) -> impl Iterator<Item = &Element> {
		self.children.iter().filter_map(Node::as_element)
	}

	/// Appends a child node.
	pub fn append_child(&mut self, child: impl IntoNode) {
		self.children.push(child.into_node());
	}

	/// Replaces every child node.
	pub fn replace_children(&mut self, children: impl IntoIterator<Item = impl IntoNode>) {
		self.children = children.into_iter().map(IntoNode::into_node).collect();
	}

	/// Concatenated text of every descendant text node.
	pub fn text_content(&self) -> String {
		let mut output = String::new();
		for child in &self.children {
			child.collect_text(&mut output);
		}
		output
	}

	/// Returns the descendant element at `path`, or `self` for an empty path.
	pub fn at_path(&self, path: &[usize]) -> Option<&Element> {
		let mut current = self;
		for &index in path {
			current = current.children.get(index)?.as_element()?;
		}
		Some(current)
	}

	/// Mutable variant of [`Element::at_path`].
	pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
		let mut current = self;
		for &index in path {
			current = match current.children.get_mut(index)? {
				Node::Element(el) => el,
				_ => return None,
			};
		}
		Some(current)
	}

	/// Paths of every descendant element matching `predicate`, in document order.
	pub fn descendant_paths(&self, predicate: impl Fn(&Element) -> bool) -> Vec<NodePath> {
		let mut found = Vec::new();
		let mut path = Vec::new();
		self.walk_paths(&predicate, &mut path, &mut found);
		found
	}

	fn walk_paths(
		&self,
		predicate: &dyn Fn(&Element) -> bool,
		path: &mut NodePath,
		found: &mut Vec<NodePath>,
	) {
		for (index, child) in self.children.iter().enumerate() {
			if let Node::Element(el) = child {
				path.push(index);
				if predicate(el) {
					found.push(path.clone());
				}
				el.walk_paths(predicate, path, found);
				path.pop();
			}
		}
	}

	/// Every descendant element matching `predicate`, in document order.
	pub fn query_all(&self, predicate: impl Fn(&Element) -> bool) -> Vec<&Element> {
		let mut found = Vec::new();
		self.walk(&predicate, &mut found);
		found
	}

	fn walk<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
		for el in self.element_children() {
			if predicate(el) {
				found.push(el);
			}
			el.walk(predicate, found);
		}
	}

	/// First descendant element matching `predicate`.
	pub fn query(&self, predicate: impl Fn(&Element) -> bool) -> Option<&Element> {
		self.query_all(predicate).into_iter().next()
	}

	/// Applies `f` to every descendant element matching `predicate`.
	pub fn for_each_matching_mut(
		&mut self,
		predicate: impl Fn(&Element) -> bool,
		mut f: impl FnMut(&mut Element),
	) {
		for path in self.descendant_paths(predicate) {
			if let Some(el) = self.at_path_mut(&path) {
				f(el);
			}
		}
	}

	/// Renders the element to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_into(&mut output);
		output
	}

	fn render_into(&self, output: &mut String) {
		output.push('<');
		output.push_str(&self.tag);

		for (name, value) in &self.attrs {
			output.push(' ');
			output.push_str(name);
			output.push_str("=\"");
			output.push_str(&html_escape(value));
			output.push('"');
		}

		if self.is_void {
			output.push_str(" />");
			return;
		}

		output.push('>');
		for child in &self.children {
			child.render_into(output);
		}
		output.push_str("</");
		output.push_str(&self.tag);
		output.push('>');
	}
}

/// Attribute predicate: the element carries `name="value"`.
pub fn has_attr_value<'a>(name: &'a str, value: &'a str) -> impl Fn(&Element) -> bool + 'a {
	move |el| el.get_attribute(name) == Some(value)
}

/// Attribute predicate: the element carries `name` with any value.
pub fn has_attr(name: &str) -> impl Fn(&Element) -> bool + '_ {
	move |el| el.has_attribute(name)
}

/// Types that can be placed in the tree.
pub trait IntoNode {
	/// Converts self into a node.
	fn into_node(self) -> Node;
}

impl IntoNode for Node {
	fn into_node(self) -> Node {
		self
	}
}

impl IntoNode for Element {
	fn into_node(self) -> Node {
		Node::Element(self)
	}
}

impl IntoNode for String {
	fn into_node(self) -> Node {
		Node::Text(Cow::Owned(self))
	}
}

impl IntoNode for &String {
	fn into_node(self) -> Node {
		Node::Text(Cow::Owned(self.clone()))
	}
}

impl IntoNode for &'static str {
	fn into_node(self) -> Node {
		Node::Text(Cow::Borrowed(self))
	}
}
