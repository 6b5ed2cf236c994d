use crate::error::scanner::ExtractError;

/// A token produced by the scanner.
///
/// Tokens never copy text: `pos` and `len` index the scanned source, and the
/// payload helpers read the span back out of it on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<S> {
	pub r#type: TokenType,
	/// The vocabulary symbol, for keyword and punctuation tokens only.
	pub symbol: Option<S>,
	pub pos:    usize,
	pub len:    usize,
}

impl<S> Token<S> {
	pub fn new(r#type: TokenType, symbol: Option<S>, pos: usize, len: usize) -> Self {
		Self { r#type, symbol, pos, len }
	}

	/// Raw span of this token in the source it was scanned from.
	pub fn text<'s>(&self, source: &'s str) -> &'s str { &source[self.pos..self.pos + self.len] }

	/// Numeric value of a `Number` token.
	pub fn number(&self, source: &str) -> Result<f64, ExtractError> {
		if self.r#type != TokenType::Number {
			return Err(ExtractError::WrongTokenType);
		}
		self.text(source).parse().map_err(|_| ExtractError::MalformedNumber)
	}

	/// Payload of a `String` token. The raw span keeps its quotes and escape
	/// backslashes; `unescape` resolves `\x` to `x` and `quoted` keeps the
	/// surrounding quotes in the output.
	pub fn string(&self, source: &str, unescape: bool, quoted: bool) -> Result<String, ExtractError> {
		if self.r#type != TokenType::String {
			return Err(ExtractError::WrongTokenType);
		}
		let raw = self.text(source);
		let body = if quoted { raw } else { &raw[1..raw.len() - 1] };
		if !unescape {
			return Ok(body.to_owned());
		}
		let mut out = String::with_capacity(body.len());
		let mut chars = body.chars();
		while let Some(c) = chars.next() {
			match c {
				'\\' => {
					if let Some(escaped) = chars.next() {
						out.push(escaped);
					}
				}
				_ => out.push(c),
			}
		}
		Ok(out)
	}
}

/// The classes of tokens the scanner produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
	/// An alphanumeric run that is not a configured keyword.
	Ident,
	/// A quoted string literal, span including both quotes.
	String,
	/// A decimal number literal with an optional fractional part.
	Number,
	/// An alphanumeric run found in the keyword table.
	Keyword,
	/// A literal found in the punctuation table.
	Punctuation,
}
