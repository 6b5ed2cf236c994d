//! Sorted literal dictionaries backing the scanner.
//!
//! Each dictionary is built once from caller-supplied `(symbol, literal)`
//! pairs, sorted by literal, and binary-searched on every lookup. Sorting is
//! also where duplicates surface: after the sort any colliding pair is
//! adjacent.

use std::cmp::Ordering;

use crate::error::scanner::{VocabError, VocabErrorType};

/// Keyword lookup case handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordCase {
	/// `ADD` and `add` are different words.
	#[default]
	Sensitive,
	/// Keywords match regardless of ASCII case.
	Insensitive,
}

/// Which caller table a dictionary was built from, for error attribution.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Table {
	Punctuations,
	Keywords,
}

impl Table {
	fn invalid(self) -> VocabErrorType {
		match self {
			Table::Punctuations => VocabErrorType::InvalidPunctuation,
			Table::Keywords => VocabErrorType::InvalidKeyword,
		}
	}

	fn duplicate(self) -> VocabErrorType {
		match self {
			Table::Punctuations => VocabErrorType::DuplicatePunctuations,
			Table::Keywords => VocabErrorType::DuplicateKeywords,
		}
	}
}

/// One literal and the symbol the caller knows it as.
#[derive(Debug, Clone)]
struct Entry<S> {
	symbol:  S,
	literal: String,
}

/// A literal dictionary sorted for binary search.
#[derive(Debug)]
pub(crate) struct Dictionary<S> {
	entries:         Vec<Entry<S>>,
	case:            KeywordCase,
	max_literal_len: usize,
}

impl<S: Copy> Dictionary<S> {
	pub fn build(pairs: &[(S, &str)], case: KeywordCase, table: Table) -> Result<Self, VocabError> {
		let mut entries = Vec::with_capacity(pairs.len());
		for (index, &(symbol, literal)) in pairs.iter().enumerate() {
			if literal.is_empty() {
				return Err(VocabError::new(index, table.invalid()));
			}
			entries.push((index, Entry { symbol, literal: literal.to_owned() }));
		}
		entries.sort_by(|(_, a), (_, b)| compare(case, &a.literal, &b.literal));
		for pair in entries.windows(2) {
			if compare(case, &pair[0].1.literal, &pair[1].1.literal) == Ordering::Equal {
				// Attribute the duplicate to the later entry of the pair.
				return Err(VocabError::new(pair[0].0.max(pair[1].0), table.duplicate()));
			}
		}
		let max_literal_len = entries.iter().map(|(_, entry)| entry.literal.len()).max().unwrap_or(0);
		let entries = entries.into_iter().map(|(_, entry)| entry).collect();
		Ok(Self { entries, case, max_literal_len })
	}

	/// Look `text` up under this dictionary's case mode.
	pub fn find(&self, text: &str) -> Option<S> {
		self.entries
			.binary_search_by(|entry| compare(self.case, &entry.literal, text))
			.ok()
			.map(|index| self.entries[index].symbol)
	}

	/// Length of the longest literal, 0 for an empty dictionary.
	pub fn max_literal_len(&self) -> usize { self.max_literal_len }
}

fn compare(case: KeywordCase, a: &str, b: &str) -> Ordering {
	match case {
		KeywordCase::Sensitive => a.as_bytes().cmp(b.as_bytes()),
		KeywordCase::Insensitive => {
			a.bytes().map(|c| c.to_ascii_uppercase()).cmp(b.bytes().map(|c| c.to_ascii_uppercase()))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	enum Sym {
		Lt,
		Le,
		Shl,
		Add,
	}

	#[test]
	fn build_and_find() {
		let dict = Dictionary::build(
			&[(Sym::Shl, "<<"), (Sym::Lt, "<"), (Sym::Le, "<=")],
			KeywordCase::Sensitive,
			Table::Punctuations,
		)
		.unwrap();
		assert_eq!(dict.find("<"), Some(Sym::Lt));
		assert_eq!(dict.find("<="), Some(Sym::Le));
		assert_eq!(dict.find("<<"), Some(Sym::Shl));
		assert_eq!(dict.find(">"), None);
		assert_eq!(dict.max_literal_len(), 2);
	}

	#[test]
	fn case_insensitive_find() {
		let dict =
			Dictionary::build(&[(Sym::Add, "ADD")], KeywordCase::Insensitive, Table::Keywords).unwrap();
		assert_eq!(dict.find("add"), Some(Sym::Add));
		assert_eq!(dict.find("AdD"), Some(Sym::Add));
		let dict = Dictionary::build(&[(Sym::Add, "ADD")], KeywordCase::Sensitive, Table::Keywords).unwrap();
		assert_eq!(dict.find("add"), None);
	}

	#[test]
	fn empty_literal_is_invalid() {
		let err =
			Dictionary::build(&[(Sym::Lt, "<"), (Sym::Le, "")], KeywordCase::Sensitive, Table::Keywords)
				.unwrap_err();
		assert_eq!(err, VocabError::new(1, VocabErrorType::InvalidKeyword));
	}

	#[test]
	fn duplicates_are_rejected() {
		let err = Dictionary::build(
			&[(Sym::Lt, "<"), (Sym::Le, "<="), (Sym::Shl, "<")],
			KeywordCase::Sensitive,
			Table::Punctuations,
		)
		.unwrap_err();
		assert_eq!(err, VocabError::new(2, VocabErrorType::DuplicatePunctuations));

		let err = Dictionary::build(
			&[(Sym::Add, "ADD"), (Sym::Lt, "add")],
			KeywordCase::Insensitive,
			Table::Keywords,
		)
		.unwrap_err();
		assert_eq!(err, VocabError::new(1, VocabErrorType::DuplicateKeywords));
	}

	#[test]
	fn empty_dictionary() {
		let dict = Dictionary::build(&[] as &[(Sym, &str)], KeywordCase::Sensitive, Table::Punctuations)
			.unwrap();
		assert_eq!(dict.find("<"), None);
		assert_eq!(dict.max_literal_len(), 0);
	}
}
