//! # An embeddable lexer and grammar recognizer
//!
//! Small embedded command and configuration languages rarely justify a
//! parser generator, yet validating them by hand gets messy fast. This crate
//! splits the job the classic way and stops half-way on purpose: it answers
//! *does this text conform*, and never builds a syntax tree.

//! ## Scanning
//!
//! The caller declares a vocabulary -- a table of punctuation literals and a
//! table of keywords, each mapped to a symbol of the caller's own type. The
//! scanner walks the text and produces typed tokens: identifiers, string
//! literals, numbers, keywords, punctuation. Tokens carry byte offsets into
//! the input and never copy it.
//!
//! Punctuation resolves by `maximal munch`: the longest configured literal
//! at the cursor wins, so `<=` is never mistaken for `<` followed by `=`.

//! ## Grammar checking
//!
//! The caller declares productions through a chained builder, one rule per
//! call chain:
//!
//! ```text
//! grammar.rule(Call).keyword(Print).punctuation(LParen).symbol(Args).punctuation(RParen);
//! ```
//!
//! Compiling resolves every symbol reference and indexes the rules; checking
//! then matches a token sequence recursively from a start symbol.
//! Alternatives form an `ordered choice` -- first declared, first tried,
//! first full match wins -- and repetition is written as explicit loops with
//! a minimum and an optional maximum. A check accepts when the start symbol
//! matches a *prefix* of the tokens; trailing tokens are the caller's
//! business, not a failure.
//!
//! Scanner and compiled grammar are immutable after construction and can be
//! shared freely; each check keeps its working state on its own stack.
//!
//! ```
//! use gramlex::{Grammar, KeywordCase, Scanner};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
//! enum Sym {
//! 	Comma,
//! 	Print,
//! 	Command,
//! }
//!
//! let scanner = Scanner::new(&[(Sym::Comma, ",")], &[(Sym::Print, "PRINT")], KeywordCase::Sensitive)?;
//!
//! let mut grammar = Grammar::new();
//! grammar
//! 	.rule(Sym::Command)
//! 	.keyword(Sym::Print)
//! 	.string()
//! 	.begin_loop(0, None)
//! 	.punctuation(Sym::Comma)
//! 	.string()
//! 	.end_loop();
//! grammar.compile(Sym::Command)?;
//!
//! let tokens = scanner.tokenize(r#"PRINT "a", "b""#)?;
//! grammar.check(&tokens)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
mod engine;
mod error;
mod grammar;
mod scanner;

pub use engine::Engine;
pub use error::{
	EngineError,
	grammar::{CheckError, CompileError, CompileErrorType},
	scanner::{ExtractError, ScanError, ScanErrorType, VocabError, VocabErrorType},
};
pub use grammar::{Grammar, RuleBuilder};
pub use scanner::{KeywordCase, Scanner, Token, TokenType, stringize_tokens};
