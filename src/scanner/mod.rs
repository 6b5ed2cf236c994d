//! Converts raw text into typed, positioned tokens.
//!
//! The scanner is configured once with a vocabulary -- a punctuation table and
//! a keyword table of `(symbol, literal)` pairs -- and can then tokenize any
//! number of inputs. At each position it tries the literal classes in a fixed
//! order: string, number, identifier/keyword, punctuation.
//!
//! Keywords are recognized the cheap way: an alphanumeric run is scanned
//! first, then looked up in the keyword table, so we never commit to a
//! reserved word until the whole run is known. Punctuation uses `maximal
//! munch` with shrink-on-miss: up to the longest configured literal length of
//! punctuation characters is captured, then the capture is shrunk one
//! character at a time until a configured literal matches. With `<` and `<=`
//! both configured, `<=` always wins.
//!
//! Tokens carry byte offsets into the scanned text and never copy it.

mod token;
mod vocabulary;

use std::{iter::Peekable, str::CharIndices};

use TokenType::*;
pub use token::{Token, TokenType};
pub use vocabulary::KeywordCase;
use vocabulary::{Dictionary, Table};

use crate::error::scanner::{ScanError, ScanErrorType, VocabError};

/// A scanner configured with a literal vocabulary.
pub struct Scanner<S> {
	punctuations: Dictionary<S>,
	keywords:     Dictionary<S>,
}

impl<S: Copy> Scanner<S> {
	/// Build a scanner from punctuation and keyword tables. Literals must be
	/// non-empty and pairwise distinct; punctuation always compares
	/// case-exactly, keywords under `case`.
	pub fn new(
		punctuations: &[(S, &str)],
		keywords: &[(S, &str)],
		case: KeywordCase,
	) -> Result<Self, VocabError> {
		Ok(Self {
			punctuations: Dictionary::build(punctuations, KeywordCase::Sensitive, Table::Punctuations)?,
			keywords:     Dictionary::build(keywords, case, Table::Keywords)?,
		})
	}

	/// Scan all tokens from `source`.
	pub fn tokenize(&self, source: &str) -> Result<Vec<Token<S>>, ScanError> {
		let mut tokens = Vec::new();
		self.tokenize_into(source, &mut tokens)?;
		Ok(tokens)
	}

	/// Scan all tokens from `source` into a caller-owned buffer. On failure
	/// the buffer keeps the tokens scanned before the error.
	pub fn tokenize_into(&self, source: &str, tokens: &mut Vec<Token<S>>) -> Result<(), ScanError> {
		let mut cursor = Cursor::new(source);
		while let Some(&(index, c)) = cursor.iter.peek() {
			if c.is_ascii_whitespace() {
				cursor.advance();
				continue;
			}
			// A NUL ends the scan successfully, so C-string shaped inputs
			// tokenize the same with or without their terminator.
			if c == '\0' {
				break;
			}
			cursor.start = index;
			cursor.pos = index;
			cursor.advance();
			let token = self.scan_token(&mut cursor, c)?;
			tokens.push(token);
		}
		Ok(())
	}

	/// Scan a single token; `next_char` has just been consumed.
	fn scan_token(&self, cursor: &mut Cursor, next_char: char) -> Result<Token<S>, ScanError> {
		match next_char {
			'"' => self.string(cursor),
			c if c.is_ascii_digit() => self.number(cursor),
			c if c.is_ascii_alphanumeric() => Ok(self.identifier(cursor)),
			c if c.is_ascii_punctuation() => self.punctuation(cursor),
			c => Err(ScanError::new(cursor.start, ScanErrorType::UnknownCharacter(c))),
		}
	}

	/// Scan a string literal. The token spans opening to closing quote
	/// inclusive; `\` escapes the next character unconditionally and the raw
	/// span is kept unprocessed.
	fn string(&self, cursor: &mut Cursor) -> Result<Token<S>, ScanError> {
		loop {
			match cursor.advance() {
				None => return Err(ScanError::new(cursor.pos, ScanErrorType::MissingStringCloseQuote)),
				Some('\0') => {
					return Err(ScanError::new(cursor.pos - 1, ScanErrorType::MissingStringCloseQuote));
				}
				Some('"') => break,
				Some('\\') => {
					cursor.advance();
				}
				Some(_) => {}
			}
		}
		Ok(Token::new(String, None, cursor.start, cursor.pos - cursor.start))
	}

	/// Scan a number literal: a maximal digit run with one optional
	/// fractional part. A second `.` simply ends the token.
	fn number(&self, cursor: &mut Cursor) -> Result<Token<S>, ScanError> {
		if cursor.source.as_bytes()[cursor.start] == b'0' && cursor.peek().is_some_and(|c| c.is_ascii_digit())
		{
			return Err(ScanError::new(cursor.pos, ScanErrorType::InvalidLeadingZero));
		}
		while cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
			cursor.advance();
		}
		// Look for a fractional part.
		if cursor.peek() == Some('.') && cursor.peek_second().is_some_and(|c| c.is_ascii_digit()) {
			cursor.advance(); // consume '.'
			while cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
				cursor.advance();
			}
		}
		Ok(Token::new(Number, None, cursor.start, cursor.pos - cursor.start))
	}

	/// Scan an identifier or keyword: a maximal alphanumeric run, resolved
	/// against the keyword table once complete.
	fn identifier(&self, cursor: &mut Cursor) -> Token<S> {
		while cursor.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
			cursor.advance();
		}
		let text = &cursor.source[cursor.start..cursor.pos];
		match self.keywords.find(text) {
			Some(symbol) => Token::new(Keyword, Some(symbol), cursor.start, text.len()),
			None => Token::new(Ident, None, cursor.start, text.len()),
		}
	}

	/// Scan a punctuation literal by maximal munch with shrink-on-miss. The
	/// cursor advances only past what actually matched.
	fn punctuation(&self, cursor: &mut Cursor) -> Result<Token<S>, ScanError> {
		let source = cursor.source;
		let bytes = source.as_bytes();
		let mut len = 1;
		while len < self.punctuations.max_literal_len() {
			match bytes.get(cursor.start + len) {
				Some(&c) if c.is_ascii_punctuation() && c != b'"' => len += 1,
				_ => break,
			}
		}
		loop {
			if let Some(symbol) = self.punctuations.find(&source[cursor.start..cursor.start + len]) {
				for _ in 1..len {
					cursor.advance();
				}
				return Ok(Token::new(Punctuation, Some(symbol), cursor.start, len));
			}
			if len == 1 {
				return Err(ScanError::new(cursor.start, ScanErrorType::UnknownPunctuation));
			}
			len -= 1;
		}
	}
}

/// Join the raw text of `tokens` with single spaces, for diagnostics.
pub fn stringize_tokens<S>(source: &str, tokens: &[Token<S>]) -> std::string::String {
	tokens.iter().map(|token| token.text(source)).collect::<Vec<_>>().join(" ")
}

/// Cursor over one input, tracking the lexeme in progress.
struct Cursor<'a> {
	/// The text being scanned
	source: &'a str,
	/// Iterator over the text being scanned
	iter:   Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:  usize,
	/// Points just past the character last consumed
	pos:    usize,
}

impl<'a> Cursor<'a> {
	fn new(source: &'a str) -> Self {
		let iter = source.char_indices().peekable();
		Self { source, iter, start: 0, pos: 0 }
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.iter.next()?;
		self.pos = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.iter.peek().map(|&(_, c)| c) }

	/// Peek the second character ahead
	fn peek_second(&mut self) -> Option<char> {
		let mut it = self.iter.clone();
		it.next()?;
		it.peek().map(|&(_, c)| c)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::scanner::ExtractError;

	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	enum Sym {
		LParen,
		RParen,
		Comma,
		Eq,
		EqEq,
		Arrow,
		Add,
		Expand,
	}

	fn scanner() -> Scanner<Sym> {
		Scanner::new(
			&[
				(Sym::LParen, "("),
				(Sym::RParen, ")"),
				(Sym::Comma, ","),
				(Sym::Eq, "="),
				(Sym::EqEq, "=="),
				(Sym::Arrow, "=>"),
			],
			&[(Sym::Add, "ADD"), (Sym::Expand, "EXPAND")],
			KeywordCase::Sensitive,
		)
		.unwrap()
	}

	fn scan(input: &str, ok: bool) {
		let result = scanner().tokenize(input);
		assert_eq!(result.is_ok(), ok, "{input:?}: {result:?}");
	}

	#[test]
	fn scan_tokens() {
		scan("", true);
		scan("(", true);
		scan("()", true);
		scan(" ( ) ", true);
		scan("@", false);
		scan("你好", false);
		scan(r#""世界""#, true);
		scan("12345", true);
		scan("ADD", true);
		scan("add", true);
		scan("user", true);
	}

	#[test]
	fn token_types_and_positions() {
		let source = r#"ADD("x", 1.25)"#;
		let tokens = scanner().tokenize(source).unwrap();
		let expected = [
			Token::new(Keyword, Some(Sym::Add), 0, 3),
			Token::new(Punctuation, Some(Sym::LParen), 3, 1),
			Token::new(String, None, 4, 3),
			Token::new(Punctuation, Some(Sym::Comma), 7, 1),
			Token::new(Number, None, 9, 4),
			Token::new(Punctuation, Some(Sym::RParen), 13, 1),
		];
		assert_eq!(tokens, expected);
	}

	#[test]
	fn spans_are_increasing_and_disjoint() {
		let source = r#"EXPAND ("abc",1.2)==x9 => 0.5"#;
		let tokens = scanner().tokenize(source).unwrap();
		let mut end = 0;
		for token in &tokens {
			assert!(token.pos >= end);
			assert!(token.len > 0);
			end = token.pos + token.len;
		}
		assert!(end <= source.len());
	}

	#[test]
	fn maximal_munch_prefers_longest() {
		let tokens = scanner().tokenize("a==b").unwrap();
		assert_eq!(tokens[1].r#type, Punctuation);
		assert_eq!(tokens[1].symbol, Some(Sym::EqEq));
		assert_eq!(tokens.len(), 3);

		let tokens = scanner().tokenize("a=>b").unwrap();
		assert_eq!(tokens[1].symbol, Some(Sym::Arrow));

		let tokens = scanner().tokenize("a=b").unwrap();
		assert_eq!(tokens[1].symbol, Some(Sym::Eq));
	}

	#[test]
	fn shrink_on_miss_backs_off_to_shorter_literal() {
		// "=)" is captured whole, misses the table, and shrinks to "=";
		// the cursor only advances past the single matched character.
		let tokens = scanner().tokenize("=)").unwrap();
		assert_eq!(tokens[0], Token::new(Punctuation, Some(Sym::Eq), 0, 1));
		assert_eq!(tokens[1], Token::new(Punctuation, Some(Sym::RParen), 1, 1));
	}

	#[test]
	fn unknown_punctuation_reports_capture_start() {
		let err = scanner().tokenize("ADD(a; b)").unwrap_err();
		assert_eq!(err, ScanError::new(5, ScanErrorType::UnknownPunctuation));
	}

	#[test]
	fn unknown_character_reports_offset() {
		let err = scanner().tokenize("  @").unwrap_err();
		assert_eq!(err, ScanError::new(2, ScanErrorType::UnknownCharacter('@')));
	}

	#[test]
	fn scan_numbers() {
		scan("0", true);
		scan("42", true);
		scan("3.14", true);
		scan("0.5", true);
		scan("123.456", true);
		scan("01", false);
		scan("007", false);

		// A second dot ends the token, leaving '.' to the punctuation class,
		// which has no entry for it here.
		let err = scanner().tokenize("1.2.3").unwrap_err();
		assert_eq!(err, ScanError::new(3, ScanErrorType::UnknownPunctuation));

		// A dot with no digit after it stays out of the number too.
		let tokens = scanner().tokenize("1,").unwrap();
		assert_eq!(tokens[0], Token::new(Number, None, 0, 1));
	}

	#[test]
	fn leading_zero_reports_second_digit() {
		let err = scanner().tokenize("ADD 01").unwrap_err();
		assert_eq!(err, ScanError::new(5, ScanErrorType::InvalidLeadingZero));
	}

	#[test]
	fn scan_strings() {
		scan(r#""""#, true);
		scan(r#""hello""#, true);
		scan(r#""escaped\"quote""#, true);
		scan(r#""multi
line""#, true);
		scan(r#""unterminated"#, false);
	}

	#[test]
	fn string_span_includes_quotes() {
		let source = r#" "a\"b" "#;
		let tokens = scanner().tokenize(source).unwrap();
		assert_eq!(tokens[0], Token::new(String, None, 1, 6));
	}

	#[test]
	fn unterminated_string_reports_end_of_input() {
		let source = r#""unterminated"#;
		let err = scanner().tokenize(source).unwrap_err();
		assert_eq!(err, ScanError::new(source.len(), ScanErrorType::MissingStringCloseQuote));

		// A trailing escape consumes the would-be closing quote.
		let source = r#""oops\""#;
		let err = scanner().tokenize(source).unwrap_err();
		assert_eq!(err, ScanError::new(source.len(), ScanErrorType::MissingStringCloseQuote));
	}

	#[test]
	fn nul_ends_scan_outside_strings_and_fails_inside() {
		let tokens = scanner().tokenize("ADD\0garbage @@").unwrap();
		assert_eq!(tokens.len(), 1);
		assert_eq!(tokens[0].r#type, Keyword);

		let err = scanner().tokenize("\"a\0b\"").unwrap_err();
		assert_eq!(err, ScanError::new(2, ScanErrorType::MissingStringCloseQuote));
	}

	#[test]
	fn keyword_case_modes() {
		let tokens = scanner().tokenize("add").unwrap();
		assert_eq!(tokens[0].r#type, Ident);

		let insensitive =
			Scanner::new(&[], &[(Sym::Add, "ADD")], KeywordCase::Insensitive).unwrap();
		for input in ["ADD", "add", "AdD"] {
			let tokens = insensitive.tokenize(input).unwrap();
			assert_eq!(tokens[0].r#type, Keyword, "{input}");
			assert_eq!(tokens[0].symbol, Some(Sym::Add));
		}
	}

	#[test]
	fn identifiers_may_contain_digits() {
		let tokens = scanner().tokenize("abc123 9lives").unwrap();
		assert_eq!(tokens[0], Token::new(Ident, None, 0, 6));
		// A leading digit starts a number; the rest is an identifier.
		assert_eq!(tokens[1], Token::new(Number, None, 7, 1));
		assert_eq!(tokens[2], Token::new(Ident, None, 8, 5));
	}

	#[test]
	fn partial_tokens_survive_a_failed_scan() {
		let mut tokens = Vec::new();
		let err = scanner().tokenize_into("ADD(x; y)", &mut tokens).unwrap_err();
		assert_eq!(err.r#type, ScanErrorType::UnknownPunctuation);
		assert_eq!(tokens.len(), 3); // ADD ( x
	}

	#[test]
	fn extract_number() {
		let source = "EXPAND 1.25";
		let tokens = scanner().tokenize(source).unwrap();
		assert_eq!(tokens[1].number(source), Ok(1.25));
		assert_eq!(tokens[0].number(source), Err(ExtractError::WrongTokenType));
	}

	#[test]
	fn extract_string() {
		let source = r#""a\"b""#;
		let tokens = scanner().tokenize(source).unwrap();
		let token = tokens[0];
		assert_eq!(token.string(source, false, false).unwrap(), r#"a\"b"#);
		assert_eq!(token.string(source, true, false).unwrap(), r#"a"b"#);
		assert_eq!(token.string(source, false, true).unwrap(), r#""a\"b""#);
		assert_eq!(tokens[0].number(source), Err(ExtractError::WrongTokenType));

		let source = "42";
		let tokens = scanner().tokenize(source).unwrap();
		assert_eq!(tokens[0].string(source, false, false), Err(ExtractError::WrongTokenType));
	}

	#[test]
	fn stringize_joins_token_text() {
		let source = r#"ADD( "x" ,1.25)"#;
		let tokens = scanner().tokenize(source).unwrap();
		assert_eq!(stringize_tokens(source, &tokens), r#"ADD ( "x" , 1.25 )"#);
	}
}
