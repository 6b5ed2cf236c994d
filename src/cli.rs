use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gramlex", after_long_help = "Validate expressions against the built-in command grammar.")]
pub struct Cli {
	#[command(subcommand)]
	pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Validate a file
	File { path: PathBuf },
	/// Input prompt
	Repl,
}
