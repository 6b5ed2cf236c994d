use clap::Parser;
use gramlex::{Engine, Grammar, KeywordCase, Scanner, cli::*};

/// Symbols of the built-in structure-expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Sym {
	// Terminal symbols - punctuations
	LParen,
	RParen,
	Comma,
	// Terminal symbols - keywords
	Add,
	Intersect,
	Xor,
	Subtract,
	Expand,
	Contract,
	// Non-terminal symbols
	Expression,
	SetExpression,
	SetOperation,
	ScaleExpression,
	ScaleOperation,
	Parameter,
	Margin,
}

/// Wire the structure-expression language: set operations take two or more
/// parameters, scale operations take a parameter and a margin of exactly
/// 1, 3 or 6 numbers.
fn engine() -> Engine<Sym> {
	use Sym::*;

	let scanner = Scanner::new(
		&[(LParen, "("), (RParen, ")"), (Comma, ",")],
		&[
			(Add, "ADD"),
			(Intersect, "INTERSECT"),
			(Xor, "XOR"),
			(Subtract, "SUBTRACT"),
			(Expand, "EXPAND"),
			(Contract, "CONTRACT"),
		],
		KeywordCase::Sensitive,
	)
	.expect("vocabulary tables are well formed");

	let mut grammar = Grammar::new();
	grammar.rule(Expression).symbol(SetExpression);
	grammar.rule(Expression).symbol(ScaleExpression);

	grammar
		.rule(SetExpression)
		.symbol(SetOperation)
		.punctuation(LParen)
		.symbol(Parameter)
		.begin_loop(1, None)
		.punctuation(Comma)
		.symbol(Parameter)
		.end_loop()
		.punctuation(RParen);
	grammar
		.rule(ScaleExpression)
		.symbol(ScaleOperation)
		.punctuation(LParen)
		.symbol(Parameter)
		.symbol(Margin)
		.punctuation(RParen);

	grammar.rule(Margin).begin_loop(6, 6).punctuation(Comma).number().end_loop();
	grammar.rule(Margin).begin_loop(3, 3).punctuation(Comma).number().end_loop();
	grammar.rule(Margin).begin_loop(1, 1).punctuation(Comma).number().end_loop();

	grammar.rule(SetOperation).keyword(Add);
	grammar.rule(SetOperation).keyword(Intersect);
	grammar.rule(SetOperation).keyword(Xor);
	grammar.rule(SetOperation).keyword(Subtract);

	grammar.rule(ScaleOperation).keyword(Expand);
	grammar.rule(ScaleOperation).keyword(Contract);

	grammar.rule(Parameter).string();
	grammar.rule(Parameter).symbol(Expression);

	grammar.compile(Expression).expect("structure-expression grammar compiles");

	Engine::new(scanner, grammar)
}

fn main() {
	let engine = engine();

	match Cli::parse().mode {
		Mode::File { path } => {
			if let Err(e) = engine.run_file(&path) {
				eprintln!("Failed run file: {e}");
			}
		}
		Mode::Repl => engine.run_prompt(),
	}
}
