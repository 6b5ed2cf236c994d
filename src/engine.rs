use std::{fmt, fs::read_to_string, io::Write, path::Path};

use anyhow::Context;

use crate::{EngineError, grammar::Grammar, scanner::Scanner};

/// A configured scanner and compiled grammar run as one validation pipeline:
/// text in, accept or first error out.
pub struct Engine<S> {
	scanner: Scanner<S>,
	grammar: Grammar<S>,
}

impl<S: Copy + Ord + fmt::Debug> Engine<S> {
	pub fn new(scanner: Scanner<S>, grammar: Grammar<S>) -> Self { Self { scanner, grammar } }

	/// Validate the contents of a file as one expression.
	pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EngineError> {
		let source = read_to_string(path).context("Failed open source file")?;
		self.run(&source)
	}

	/// Validate expressions interactively, one line at a time.
	pub fn run_prompt(&self) {
		let mut input = String::new();
		let stdin = std::io::stdin();
		loop {
			input.clear();
			print!("> ");
			if let Err(e) = std::io::stdout().flush() {
				eprintln!("Failed flush: {e}");
			}
			match stdin.read_line(&mut input) {
				Ok(0) => {
					println!("\nExited prompt");
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			let line = input.trim();
			if line.is_empty() {
				continue;
			}
			match self.run(line) {
				Ok(()) => println!("ok"),
				Err(e) => eprintln!("{e}"),
			}
		}
	}

	/// Tokenize `source` and check the tokens against the grammar.
	pub fn run(&self, source: &str) -> Result<(), EngineError> {
		let tokens = self.scanner.tokenize(source)?;
		self.grammar.check(&tokens)?;
		Ok(())
	}

	pub fn scanner(&self) -> &Scanner<S> { &self.scanner }

	pub fn grammar(&self) -> &Grammar<S> { &self.grammar }
}
