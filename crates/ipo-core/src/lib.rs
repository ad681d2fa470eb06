pub mod config;
pub mod dates;
pub mod error;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use error::{Error, Result};
pub use types::{SamplingMode, ScanMode, Ticker};

/// Companies analyzed when no ticker list is configured.
pub const DEFAULT_TICKERS: &[&str] = &["DBX", "SPOT", "EQH", "SMAR", "WHD"];

/// Directory under the output root holding one token file per ticker
pub const TOKENIZED_TEXTS_DIR: &str = "tokenized_texts";

/// Directory under the output root holding the per-company matching article dumps
pub const MATCHING_JSON_DIR: &str = "matching_json_files";

/// File names of the tabular artifacts written next to the token files
pub const IPO_INFO_FILE: &str = "ipo_info.csv";
pub const SENTIMENT_SCORES_FILE: &str = "sentiment_scores.csv";
