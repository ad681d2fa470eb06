use thiserror::Error;

/// The main error type for ipo-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// Ticker symbol that cannot be used as a key or file name
  #[error("Invalid ticker: {0:?}")]
  InvalidTicker(String),

  /// Parse error for data processing
  #[error("Parse error: {0}")]
  Parse(String),
}

/// Result type alias for ipo-* crates
pub type Result<T> = std::result::Result<T, Error>;
