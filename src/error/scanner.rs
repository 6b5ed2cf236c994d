/// An error found while building the scanner's literal tables.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("entry {index}: {type}")]
pub struct VocabError {
	/// Index of the offending entry in the caller-supplied table.
	pub index:  usize,
	/// The kind of vocabulary error.
	pub r#type: VocabErrorType,
}

impl VocabError {
	pub fn new(index: usize, r#type: VocabErrorType) -> Self { Self { index, r#type } }
}

/// Kinds of vocabulary errors.
#[derive(Debug, PartialEq, Eq)]
pub enum VocabErrorType {
	/// Empty punctuation literal.
	InvalidPunctuation,
	/// Empty keyword literal.
	InvalidKeyword,
	/// Two punctuation entries spell the same literal.
	DuplicatePunctuations,
	/// Two keyword entries spell the same literal under the configured case mode.
	DuplicateKeywords,
}

impl std::fmt::Display for VocabErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use VocabErrorType::*;
		match self {
			InvalidPunctuation => {
				write!(f, "Invalid punctuation literal")
			}
			InvalidKeyword => {
				write!(f, "Invalid keyword literal")
			}
			DuplicatePunctuations => {
				write!(f, "Duplicate punctuation literals")
			}
			DuplicateKeywords => {
				write!(f, "Duplicate keyword literals")
			}
		}
	}
}

/// A lexical error with the byte offset it was detected at.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("byte {pos}: {type}")]
pub struct ScanError {
	/// Byte offset of the failure in the scanned text.
	pub pos:    usize,
	/// The kind of scanning error.
	pub r#type: ScanErrorType,
}

impl ScanError {
	pub fn new(pos: usize, r#type: ScanErrorType) -> Self { Self { pos, r#type } }
}

/// Kinds of scanning errors.
#[derive(Debug, PartialEq, Eq)]
pub enum ScanErrorType {
	/// A character no token class accepts.
	UnknownCharacter(char),
	/// A punctuation run with no configured literal prefix.
	UnknownPunctuation,
	/// A number literal starting `0` followed by another digit.
	InvalidLeadingZero,
	/// A string literal with no closing quote.
	MissingStringCloseQuote,
}

impl std::fmt::Display for ScanErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ScanErrorType::*;
		match self {
			UnknownCharacter(c) => {
				write!(f, "Unknown character '{c}'")
			}
			UnknownPunctuation => {
				write!(f, "Unknown punctuation")
			}
			InvalidLeadingZero => {
				write!(f, "Invalid leading zero in number literal")
			}
			MissingStringCloseQuote => {
				write!(f, "Missing closing quote in string literal")
			}
		}
	}
}

/// Errors from reading a token's payload back out of the source text.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
	/// The token is not of the requested type.
	#[error("Token is not of the requested type")]
	WrongTokenType,
	/// The token span does not parse as a number.
	#[error("Malformed number literal")]
	MalformedNumber,
}
