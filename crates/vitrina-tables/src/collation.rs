//! String collation for Russian-then-English text, uppercase first.
//!
//! Comparison runs in levels, each consulted only when the previous one ties:
//!
//! 1. primary: script group, then the case-folded letter (`ё` folds to `е`)
//! 2. secondary: `е` before `ё`
//! 3. tertiary: uppercase before lowercase
//!
//! Remaining ties fall back to code point order so distinct strings never
//! compare equal.

use std::cmp::Ordering;

/// Script groups in collation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Script {
	Punctuation,
	Digit,
	Cyrillic,
	Latin,
	Other,
}

#[derive(Debug, Clone, Copy)]
struct Weights {
	primary: (Script, char),
	secondary: u8,
	tertiary: u8,
}

fn script(c: char) -> Script {
	match c {
		'0'..='9' => Script::Digit,
		'\u{0400}'..='\u{052F}' => Script::Cyrillic,
		'a'..='z' | '\u{00DF}'..='\u{024F}' => Script::Latin,
		c if c.is_numeric() => Script::Digit,
		c if c.is_alphabetic() => Script::Other,
		_ => Script::Punctuation,
	}
}

fn weigh(c: char) -> Weights {
	let lower = c.to_lowercase().next().unwrap_or(c);
	let (base, secondary) = match lower {
		'ё' => ('е', 1),
		other => (other, 0),
	};
	Weights {
		primary: (script(base), base),
		secondary,
		tertiary: if c.is_uppercase() { 0 } else { 1 },
	}
}

/// Compares two strings.
pub fn compare(a: &str, b: &str) -> Ordering {
	let left: Vec<Weights> = a.chars().map(weigh).collect();
	let right: Vec<Weights> = b.chars().map(weigh).collect();

	let primary = || left.iter().map(|w| w.primary).cmp(right.iter().map(|w| w.primary));
	let secondary = || {
		left.iter()
			.map(|w| w.secondary)
			.cmp(right.iter().map(|w| w.secondary))
	};
	let tertiary = || left.iter().map(|w| w.tertiary).cmp(right.iter().map(|w| w.tertiary));

	primary()
		.then_with(secondary)
		.then_with(tertiary)
		.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case::lowercase_before_later_letter("а", "Б", Ordering::Less)]
	#[case::uppercase_first("Ель", "ель", Ordering::Less)]
	#[case::yo_after_ye("ель", "ёль", Ordering::Less)]
	#[case::yo_is_primary_ye("ёж", "ель", Ordering::Less)]
	#[case::cyrillic_before_latin("я", "a", Ordering::Less)]
	#[case::digits_before_letters("9", "а", Ordering::Less)]
	#[case::space_before_digits(" 1", "1", Ordering::Less)]
	#[case::prefix_first("кот", "котёнок", Ordering::Less)]
	#[case::latin_case_insensitive_primary("apple", "Banana", Ordering::Less)]
	#[case::identical("Мышь", "Мышь", Ordering::Equal)]
	fn test_compare(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
		assert_eq!(compare(a, b), expected);
		assert_eq!(compare(b, a), expected.reverse());
	}

	#[rstest]
	fn test_sorts_mixed_list() {
		// Arrange
		let mut words = vec![
			"яблоко", "Banana", "ель", "  x", "Ёлка", "apple", "123", "Ель",
		];

		// Act
		words.sort_by(|a, b| compare(a, b));

		// Assert
		assert_eq!(
			words,
			vec!["  x", "123", "Ёлка", "Ель", "ель", "яблоко", "apple", "Banana"]
		);
	}
}
