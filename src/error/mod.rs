pub mod grammar;
pub mod scanner;

/// EngineError is the top-level error type for running text through an engine.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
	/// Internal engine error, should never happen
	#[error("EngineInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// The input failed lexical scanning
	#[error(transparent)]
	Scan(#[from] scanner::ScanError),
	/// The token stream was rejected by the grammar
	#[error(transparent)]
	Check(#[from] grammar::CheckError),
}
