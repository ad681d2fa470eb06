/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use super::override_tickers;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use ipo_core::SENTIMENT_SCORES_FILE;
use ipo_loaders::{score_tickers, CsvProcessor, LexiconModel};
use ipo_models::SentimentScore;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct ScoreArgs {
  /// Output root holding the tokenized_texts directory
  #[arg(short, long)]
  output_dir: Option<PathBuf>,

  /// Comma-separated list of tickers
  #[arg(short, long)]
  tickers: Option<String>,
}

pub fn execute(args: ScoreArgs, mut config: Config) -> Result<()> {
  if let Some(dir) = args.output_dir {
    config.pipeline.output_dir = dir;
  }
  override_tickers(&mut config.pipeline, args.tickers.as_deref())?;

  let token_dir = config.pipeline.tokenized_dir();
  let rows = score_tickers(&LexiconModel::new(), &config.pipeline.tickers, &token_dir)
    .with_context(|| format!("Failed to score token files in {}", token_dir.display()))?;

  println!(
    "{:<8} {:>9} {:>9} {:>9} {:>12}  {}",
    "ticker", "positive", "negative", "polarity", "subjectivity", "tone"
  );
  for row in &rows {
    println!(
      "{:<8} {:>9} {:>9} {:>9.4} {:>12.4}  {}",
      row.ticker,
      row.positive,
      row.negative,
      row.polarity,
      row.subjectivity,
      tone(&row.score())
    );
  }

  let scores_path = config.pipeline.output_dir.join(SENTIMENT_SCORES_FILE);
  CsvProcessor::new().write_scores(&scores_path, &rows)?;
  info!("Wrote {}", scores_path.display());
  Ok(())
}

fn tone(score: &SentimentScore) -> &'static str {
  if score.is_bullish() {
    "bullish"
  } else if score.is_bearish() {
    "bearish"
  } else {
    "neutral"
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tone_follows_polarity() {
    let score = |polarity| SentimentScore { polarity, ..SentimentScore::default() };
    assert_eq!(tone(&score(0.4)), "bullish");
    assert_eq!(tone(&score(-0.1)), "bearish");
    assert_eq!(tone(&SentimentScore::default()), "neutral");
  }
}
