use std::fmt;

/// An error found while compiling the declared rules.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("symbol {symbol:?}: {type}")]
pub struct CompileError<S: fmt::Debug> {
	/// The symbol the error was detected in or refers to.
	pub symbol: S,
	/// The kind of compilation error.
	pub r#type: CompileErrorType,
}

impl<S: fmt::Debug> CompileError<S> {
	pub fn new(symbol: S, r#type: CompileErrorType) -> Self { Self { symbol, r#type } }
}

/// Kinds of compilation errors.
#[derive(Debug, PartialEq, Eq)]
pub enum CompileErrorType {
	/// A loop with a zero or inverted repeat range.
	InvalidLoopArguments,
	/// A loop end with no open loop.
	NextWithoutLoop,
	/// A rule ended while loops were still open.
	MismatchLoopNextPairs,
	/// A reference to a symbol that has no rule.
	SymbolWithoutRule,
}

impl std::fmt::Display for CompileErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use CompileErrorType::*;
		match self {
			InvalidLoopArguments => {
				write!(f, "Invalid loop repeat range")
			}
			NextWithoutLoop => {
				write!(f, "Loop end without an open loop")
			}
			MismatchLoopNextPairs => {
				write!(f, "Rule ended with unbalanced loops")
			}
			SymbolWithoutRule => {
				write!(f, "Referenced symbol has no rule")
			}
		}
	}
}

/// Why a grammar check did not accept.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CheckError {
	/// The grammar has not been (successfully) compiled.
	#[error("Grammar is not compiled")]
	UnpreparedGrammar,
	/// The requested window starts outside the token sequence.
	#[error("Token index {index} out of bounds for {len} tokens")]
	InvalidArguments { index: usize, len: usize },
	/// No rule of the start symbol matches the tokens. No position is
	/// tracked for this failure.
	#[error("Token stream does not match the grammar")]
	GrammarCheckFailed,
}
