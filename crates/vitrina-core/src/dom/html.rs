//! Element constructors for the tags the widgets emit.
//!
//! ```
//! use vitrina_core::dom::html::{a, div};
//!
//! let row = a().attr("href", "/products/1").child(div().child("Phone"));
//! assert_eq!(row.tag_name(), "a");
//! ```

use super::Element;

/// Creates a `<div>`.
pub fn div() -> Element {
	Element::new("div")
}

/// Creates a `<span>`.
pub fn span() -> Element {
	Element::new("span")
}

/// Creates an `<a>`.
pub fn a() -> Element {
	Element::new("a")
}

/// Creates a `<p>`.
pub fn p() -> Element {
	Element::new("p")
}

/// Creates a `<button>`.
pub fn button() -> Element {
	Element::new("button")
}

/// Creates an `<img>`.
pub fn img() -> Element {
	Element::new("img")
}
