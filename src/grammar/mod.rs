//! Rule compilation and the recursive grammar verifier.
//!
//! The grammar side is a recognizer, not a parser: `check` answers whether a
//! token window conforms to the rules rooted at the start symbol, and builds
//! no tree.
//!
//! Alternatives for one symbol form an `ordered choice`: they are tried in
//! declaration order and the first full match wins, with no ambiguity
//! search. A nonterminal reference commits to its callee's first success --
//! the caller never re-enters a callee to try its later alternatives.
//! Repetition is explicit through bounded loops, and the verifier backtracks
//! over a loop boundary when the body stops matching: if the loop already
//! met its minimum, matching resumes after the loop from the last completed
//! iteration.
//!
//! `check` accepts a **prefix** match: tokens after the matched prefix of
//! the window are not an error. Callers that want exact consumption can
//! compare against the window themselves or anchor the grammar with a
//! trailing terminal.

mod rule;

use std::{collections::BTreeMap, fmt, ops::Range};

use rule::{Chunk, Op};
pub use rule::RuleBuilder;

use crate::{
	error::grammar::{CheckError, CompileError, CompileErrorType},
	scanner::{Token, TokenType},
};

/// A grammar: the declared rule stream plus, once compiled, the indexed form
/// that `check` runs on.
#[derive(Default)]
pub struct Grammar<S> {
	chunks:   Vec<Chunk<S>>,
	compiled: Option<Compiled<S>>,
}

/// The indexed form produced by `compile`: resolved chunks, rules sorted by
/// `(symbol, declaration order)`, and per-symbol rule ranges.
struct Compiled<S> {
	ops:     Vec<Op<S>>,
	rules:   Vec<RuleData<S>>,
	symbols: Vec<SymbolData<S>>,
	start:   usize,
}

/// One alternative production: a chunk range belonging to a symbol.
struct RuleData<S> {
	symbol: S,
	order:  usize,
	chunks: Range<usize>,
}

/// A symbol's alternatives as a contiguous range into the sorted rule table.
struct SymbolData<S> {
	symbol: S,
	rules:  Range<usize>,
}

/// Progress through one repetition construct during verification.
#[derive(Debug, Clone, Copy)]
struct LoopFrame {
	/// Completed iterations
	repeats: usize,
	min:     usize,
	max:     Option<usize>,
	/// Chunk index of the `Loop` op
	begin:   usize,
	/// Token cursor at the last completed iteration boundary
	cursor:  usize,
}

impl<S> Grammar<S> {
	pub fn new() -> Self { Self { chunks: Vec::new(), compiled: None } }

	/// Open a new alternative for `id` and return the builder that appends
	/// its body. Declaring a rule invalidates any compiled state.
	pub fn rule(&mut self, id: S) -> RuleBuilder<'_, S> {
		self.compiled = None;
		self.push_chunk(Chunk::Start(id));
		RuleBuilder::new(self)
	}

	/// Drop all declared rules and any compiled state.
	pub fn clear(&mut self) {
		self.chunks.clear();
		self.compiled = None;
	}

	pub(crate) fn push_chunk(&mut self, chunk: Chunk<S>) { self.chunks.push(chunk); }
}

impl<S: Copy + Ord + fmt::Debug> Grammar<S> {
	/// Compile the declared rules into the indexed form `check` needs,
	/// rooted at `start`. Any previously compiled state is discarded first,
	/// so compiling is idempotent and can be retried after a failure once
	/// the rules are fixed.
	pub fn compile(&mut self, start: S) -> Result<(), CompileError<S>> {
		self.compiled = None;

		let mut counts: BTreeMap<S, usize> = BTreeMap::new();
		let mut rules: Vec<RuleData<S>> = Vec::new();
		let mut open_loops = 0usize;
		let mut current = start;

		for (index, &chunk) in self.chunks.iter().enumerate() {
			match chunk {
				Chunk::Loop { min, max } => {
					if max.is_some_and(|max| max == 0 || max < min) {
						return Err(CompileError::new(current, CompileErrorType::InvalidLoopArguments));
					}
					open_loops += 1;
				}
				Chunk::Next => {
					if open_loops == 0 {
						return Err(CompileError::new(current, CompileErrorType::NextWithoutLoop));
					}
					open_loops -= 1;
				}
				Chunk::Start(id) => {
					if open_loops != 0 {
						return Err(CompileError::new(current, CompileErrorType::MismatchLoopNextPairs));
					}
					if let Some(rule) = rules.last_mut() {
						rule.chunks.end = index;
					}
					let order = counts.entry(id).or_insert(0);
					rules.push(RuleData { symbol: id, order: *order, chunks: index + 1..self.chunks.len() });
					*order += 1;
					current = id;
				}
				_ => {}
			}
		}
		if open_loops != 0 {
			return Err(CompileError::new(current, CompileErrorType::MismatchLoopNextPairs));
		}

		rules.sort_by_key(|rule| (rule.symbol, rule.order));

		// Rules are now grouped by symbol in symbol order, so the per-symbol
		// ranges tile the sorted table.
		let mut symbols: Vec<SymbolData<S>> = Vec::with_capacity(counts.len());
		let mut begin = 0;
		for (&symbol, &count) in &counts {
			symbols.push(SymbolData { symbol, rules: begin..begin + count });
			begin += count;
		}

		let find = |id: S| symbols.binary_search_by(|entry| entry.symbol.cmp(&id)).ok();

		let mut ops = Vec::with_capacity(self.chunks.len());
		for &chunk in &self.chunks {
			ops.push(match chunk {
				Chunk::Start(_) => Op::Start,
				Chunk::Ident => Op::Ident,
				Chunk::String => Op::String,
				Chunk::Number => Op::Number,
				Chunk::Keyword(id) => Op::Keyword(id),
				Chunk::Punctuation(id) => Op::Punctuation(id),
				Chunk::Symbol(id) => match find(id) {
					Some(index) => Op::Rule(index),
					None => return Err(CompileError::new(id, CompileErrorType::SymbolWithoutRule)),
				},
				Chunk::Loop { min, max } => Op::Loop { min, max },
				Chunk::Next => Op::Next,
			});
		}
		let start_index = match find(start) {
			Some(index) => index,
			None => return Err(CompileError::new(start, CompileErrorType::SymbolWithoutRule)),
		};

		self.compiled = Some(Compiled { ops, rules, symbols, start: start_index });
		Ok(())
	}

	/// Check that the start symbol matches a prefix of `tokens`.
	pub fn check(&self, tokens: &[Token<S>]) -> Result<(), CheckError> { self.check_at(tokens, 0, None) }

	/// Check the window `[index, index + count)`; `count` of `None` means
	/// the rest of the sequence, and is clamped to it.
	pub fn check_at(&self, tokens: &[Token<S>], index: usize, count: Option<usize>) -> Result<(), CheckError> {
		let compiled = self.compiled.as_ref().ok_or(CheckError::UnpreparedGrammar)?;
		if index > tokens.len() {
			return Err(CheckError::InvalidArguments { index, len: tokens.len() });
		}
		let end = count.map_or(tokens.len(), |count| index.saturating_add(count).min(tokens.len()));
		let window = &tokens[index..end];

		// The loop-frame stack lives in this call, so a compiled grammar can
		// be checked from many threads at once.
		let mut loops = Vec::new();
		match compiled.verify_symbol(window, 0, compiled.start, &mut loops) {
			Some(_) => Ok(()),
			None => Err(CheckError::GrammarCheckFailed),
		}
	}
}

impl<S: Copy + Ord> Compiled<S> {
	/// Try the alternatives of `symbol_index` at `cursor` in declaration
	/// order; the first full match returns the cursor past what it consumed.
	fn verify_symbol(
		&self,
		tokens: &[Token<S>],
		cursor: usize,
		symbol_index: usize,
		loops: &mut Vec<LoopFrame>,
	) -> Option<usize> {
		let base = loops.len();
		let symbol = &self.symbols[symbol_index];

		'rules: for rule in &self.rules[symbol.rules.clone()] {
			loops.truncate(base);
			let mut cur = cursor;
			let mut index = rule.chunks.start;

			while index < rule.chunks.end {
				let matched = match self.ops[index] {
					Op::Start => unreachable!("rule body contains a rule start"),
					Op::Ident => verify_token(tokens, &mut cur, TokenType::Ident, None),
					Op::String => verify_token(tokens, &mut cur, TokenType::String, None),
					Op::Number => verify_token(tokens, &mut cur, TokenType::Number, None),
					Op::Keyword(id) => verify_token(tokens, &mut cur, TokenType::Keyword, Some(id)),
					Op::Punctuation(id) => verify_token(tokens, &mut cur, TokenType::Punctuation, Some(id)),
					Op::Rule(target) => match self.verify_symbol(tokens, cur, target, loops) {
						Some(next) => {
							cur = next;
							true
						}
						None => false,
					},
					Op::Loop { min, max } => {
						loops.push(LoopFrame { repeats: 0, min, max, begin: index, cursor: cur });
						true
					}
					Op::Next => {
						let frame = loops.last_mut().expect("loop balance is checked at compile time");
						if frame.max.is_none() && cur == frame.cursor {
							panic!("unbounded loop matched no tokens; the grammar would repeat forever");
						}
						frame.repeats += 1;
						if Some(frame.repeats) == frame.max {
							loops.pop();
						} else {
							frame.cursor = cur;
							index = frame.begin;
						}
						true
					}
				};
				if matched {
					index += 1;
					continue;
				}
				// A step failed. An open loop that already met its minimum
				// is left early: matching resumes after its end, from the
				// cursor of the last completed iteration. Below the minimum,
				// the whole alternative fails.
				if loops.len() > base {
					let frame = loops[loops.len() - 1];
					if frame.repeats >= frame.min {
						index = self.matching_next(frame.begin) + 1;
						cur = frame.cursor;
						loops.pop();
						continue;
					}
					loops.truncate(base);
				}
				continue 'rules;
			}
			loops.truncate(base);
			return Some(cur);
		}
		loops.truncate(base);
		None
	}

	/// Index of the `Next` op closing the loop that begins at `begin`.
	fn matching_next(&self, begin: usize) -> usize {
		let mut depth = 0usize;
		let mut index = begin + 1;
		loop {
			match self.ops[index] {
				Op::Loop { .. } => depth += 1,
				Op::Next if depth == 0 => return index,
				Op::Next => depth -= 1,
				_ => {}
			}
			index += 1;
		}
	}
}

/// Match one token by type (and symbol, where the type requires one).
fn verify_token<S: Copy + Eq>(
	tokens: &[Token<S>],
	cursor: &mut usize,
	r#type: TokenType,
	symbol: Option<S>,
) -> bool {
	match tokens.get(*cursor) {
		Some(token) if token.r#type == r#type && (symbol.is_none() || token.symbol == symbol) => {
			*cursor += 1;
			true
		}
		_ => false,
	}
}
