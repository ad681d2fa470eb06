//! Domain key types shared by every pipeline stage

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stock symbol identifying one IPO company within a pipeline run.
///
/// Tickers are normalized to upper case and must be usable as a file stem,
/// since each ticker owns a token file in the output directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
  pub fn new(symbol: &str) -> Result<Self> {
    let symbol = symbol.trim();
    let valid = !symbol.is_empty()
      && symbol.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
      && symbol != "."
      && symbol != "..";
    if !valid {
      return Err(Error::InvalidTicker(symbol.to_string()));
    }
    Ok(Ticker(symbol.to_ascii_uppercase()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Ticker {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for Ticker {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Ticker::new(s)
  }
}

impl TryFrom<String> for Ticker {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> {
    Ticker::new(&value)
  }
}

impl From<Ticker> for String {
  fn from(ticker: Ticker) -> Self {
    ticker.0
  }
}

impl AsRef<str> for Ticker {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

/// Which article fields the keyword is searched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
  /// Match on the `title` field only
  Title,
  /// Match on `title`, falling back to `content`
  #[default]
  TitleOrContent,
}

impl fmt::Display for ScanMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ScanMode::Title => write!(f, "title"),
      ScanMode::TitleOrContent => write!(f, "title-or-content"),
    }
  }
}

impl FromStr for ScanMode {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "title" => Ok(ScanMode::Title),
      "title-or-content" | "title_or_content" | "content" => Ok(ScanMode::TitleOrContent),
      other => Err(Error::Parse(format!("Unknown scan mode: {}", other))),
    }
  }
}

/// How many files of each directory the scanner inspects.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SamplingMode {
  /// Every file under the root
  #[default]
  Full,
  /// A random `ratio` of the files of every directory, rounded down.
  /// A fixed `seed` makes the sample reproducible.
  Fraction { ratio: f64, seed: Option<u64> },
}

impl SamplingMode {
  pub fn fraction(ratio: f64, seed: Option<u64>) -> Result<Self> {
    if !(ratio > 0.0 && ratio <= 1.0) {
      return Err(Error::Config(format!("Sample ratio must be in (0, 1], got {}", ratio)));
    }
    Ok(SamplingMode::Fraction { ratio, seed })
  }

  /// Number of files kept out of `available` in one directory
  pub fn sample_size(&self, available: usize) -> usize {
    match self {
      SamplingMode::Full => available,
      SamplingMode::Fraction { ratio, .. } => (available as f64 * ratio).floor() as usize,
    }
  }
}
