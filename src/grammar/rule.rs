//! The flat rule-chunk representation and the fluent builder that emits it.
//!
//! A grammar is declared as one append-only chunk stream: each `Start` opens
//! an alternative for a symbol and everything up to the next `Start` is that
//! alternative's body. Cross-references stay symbolic here; compilation
//! resolves them into the parallel [`Op`] form without touching the stream,
//! so a grammar can be recompiled after edits or failures.

use crate::grammar::Grammar;

/// One instruction of the declared rule stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Chunk<S> {
	/// Opens a new alternative for a symbol.
	Start(S),
	/// Any identifier token.
	Ident,
	/// Any string literal token.
	String,
	/// Any number literal token.
	Number,
	/// The keyword token with this symbol.
	Keyword(S),
	/// The punctuation token with this symbol.
	Punctuation(S),
	/// A nonterminal reference, resolved at compile time.
	Symbol(S),
	/// Opens a repetition of the chunks up to the matching `Next`;
	/// `max` of `None` means unbounded.
	Loop { min: usize, max: Option<usize> },
	/// Closes the innermost open repetition.
	Next,
}

/// A chunk after compilation, with symbol references resolved to indices
/// into the compiled symbol table. Indices line up with the chunk stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op<S> {
	/// Keeps the slot of a `Start` chunk; never walked.
	Start,
	Ident,
	String,
	Number,
	Keyword(S),
	Punctuation(S),
	/// A resolved nonterminal reference.
	Rule(usize),
	Loop { min: usize, max: Option<usize> },
	Next,
}

/// Fluent builder appending chunks to the rule opened by [`Grammar::rule`].
///
/// The builder borrows the grammar, so it cannot outlive it and there is
/// nothing to finalize: every call appends one chunk and hands the builder
/// back.
pub struct RuleBuilder<'g, S> {
	grammar: &'g mut Grammar<S>,
}

impl<'g, S> RuleBuilder<'g, S> {
	pub(crate) fn new(grammar: &'g mut Grammar<S>) -> Self { Self { grammar } }

	/// Match any identifier token.
	pub fn ident(self) -> Self { self.push(Chunk::Ident) }

	/// Match any string literal token.
	pub fn string(self) -> Self { self.push(Chunk::String) }

	/// Match any number literal token.
	pub fn number(self) -> Self { self.push(Chunk::Number) }

	/// Match the keyword with symbol `id`.
	pub fn keyword(self, id: S) -> Self { self.push(Chunk::Keyword(id)) }

	/// Match the punctuation with symbol `id`.
	pub fn punctuation(self, id: S) -> Self { self.push(Chunk::Punctuation(id)) }

	/// Match the nonterminal `id`; it must have at least one rule by
	/// compile time.
	pub fn symbol(self, id: S) -> Self { self.push(Chunk::Symbol(id)) }

	/// Repeat the chunks up to the matching [`end_loop`](Self::end_loop)
	/// between `min` and `max` times; pass `None` for no upper bound.
	pub fn begin_loop(self, min: usize, max: impl Into<Option<usize>>) -> Self {
		self.push(Chunk::Loop { min, max: max.into() })
	}

	/// Close the innermost open loop.
	pub fn end_loop(self) -> Self { self.push(Chunk::Next) }

	fn push(self, chunk: Chunk<S>) -> Self {
		self.grammar.push_chunk(chunk);
		self
	}
}
