//! Configuration management for the pre-IPO sentiment pipeline

use crate::error::{Error, Result};
use crate::types::{SamplingMode, ScanMode, Ticker};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Main configuration struct for a pipeline run
#[derive(Debug, Clone)]
pub struct Config {
  /// Root of the unzipped news-article corpus
  pub corpus_dir: PathBuf,

  /// IPO reference table (.xlsx workbook or CSV)
  pub reference_path: PathBuf,

  /// Destination for token files, article dumps and tables
  pub output_dir: PathBuf,

  /// Companies to analyze
  pub tickers: Vec<Ticker>,

  /// Article fields searched for the company name
  pub scan_mode: ScanMode,

  /// Full scan or per-directory random sample
  pub sampling: SamplingMode,

  /// Run tickers on the rayon pool
  pub parallel: bool,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let corpus_dir =
      env::var("IPO_CORPUS_DIR").unwrap_or_else(|_| "./bld/data/unzipped".to_string()).into();

    let reference_path =
      env::var("IPO_REFERENCE_PATH").unwrap_or_else(|_| "./data/ipo_df.xlsx".to_string()).into();

    let output_dir = env::var("IPO_OUTPUT_DIR").unwrap_or_else(|_| "./bld/data".to_string()).into();

    let tickers = match env::var("IPO_TICKERS") {
      Ok(list) => parse_tickers(&list)?,
      Err(_) => default_tickers(),
    };

    let scan_mode = match env::var("IPO_SCAN_MODE") {
      Ok(mode) => mode.parse().map_err(|_| Error::Config(format!("Invalid IPO_SCAN_MODE: {}", mode)))?,
      Err(_) => ScanMode::default(),
    };

    let sample_seed = match env::var("IPO_SAMPLE_SEED") {
      Ok(seed) => Some(
        seed.trim().parse::<u64>().map_err(|_| Error::Config("Invalid IPO_SAMPLE_SEED".to_string()))?,
      ),
      Err(_) => None,
    };

    let sampling = match env::var("IPO_SAMPLE_RATIO") {
      Ok(ratio) => {
        let ratio = ratio
          .trim()
          .parse::<f64>()
          .map_err(|_| Error::Config("Invalid IPO_SAMPLE_RATIO".to_string()))?;
        SamplingMode::fraction(ratio, sample_seed)?
      }
      Err(_) => SamplingMode::Full,
    };

    let parallel = match env::var("IPO_PARALLEL") {
      Ok(flag) => parse_bool(&flag).ok_or_else(|| Error::Config("Invalid IPO_PARALLEL".to_string()))?,
      Err(_) => false,
    };

    Ok(Config { corpus_dir, reference_path, output_dir, tickers, scan_mode, sampling, parallel })
  }

  /// Create a config rooted at the given directories (for testing)
  pub fn with_dirs(corpus_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
    let output_dir = output_dir.into();
    Config {
      corpus_dir: corpus_dir.into(),
      reference_path: output_dir.join("ipo_df.xlsx"),
      output_dir,
      tickers: default_tickers(),
      scan_mode: ScanMode::default(),
      sampling: SamplingMode::Full,
      parallel: false,
    }
  }

  pub fn tokenized_dir(&self) -> PathBuf {
    self.output_dir.join(crate::TOKENIZED_TEXTS_DIR)
  }

  pub fn matching_json_dir(&self) -> PathBuf {
    self.output_dir.join(crate::MATCHING_JSON_DIR)
  }
}

/// Parse a comma separated ticker list, dropping duplicates and keeping order
pub fn parse_tickers(list: &str) -> Result<Vec<Ticker>> {
  let mut tickers: Vec<Ticker> = Vec::new();
  for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
    let ticker = Ticker::new(part)?;
    if !tickers.contains(&ticker) {
      tickers.push(ticker);
    }
  }
  if tickers.is_empty() {
    return Err(Error::Config("Ticker list is empty".to_string()));
  }
  Ok(tickers)
}

pub fn default_tickers() -> Vec<Ticker> {
  crate::DEFAULT_TICKERS.iter().filter_map(|t| Ticker::new(t).ok()).collect()
}

fn parse_bool(value: &str) -> Option<bool> {
  match value.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Some(true),
    "0" | "false" | "no" | "off" => Some(false),
    _ => None,
  }
}
