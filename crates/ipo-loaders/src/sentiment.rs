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

//! Sentiment scoring of token files.
//!
//! Scorers implement [`LanguageModel`]; the pipeline ships a dictionary
//! model built on a small financial lexicon.

use crate::csv_processor::CsvProcessor;
use crate::LoaderResult;
use ipo_core::Ticker;
use ipo_models::{SentimentScore, SentimentScoreRow};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Keeps the ratios finite for empty or sentiment-free word lists
const EPSILON: f64 = 1e-6;

/// Anything that can score a bag of words
pub trait LanguageModel: Send + Sync {
  fn score(&self, words: &[String]) -> SentimentScore;
}

/// Dictionary model: counts case-insensitive hits in a positive and a
/// negative word list.
pub struct LexiconModel {
  positive_words: HashSet<String>,
  negative_words: HashSet<String>,
}

impl LexiconModel {
  /// Model backed by the built-in financial lexicon
  pub fn new() -> Self {
    Self::from_words(POSITIVE_WORDS.iter().copied(), NEGATIVE_WORDS.iter().copied())
  }

  pub fn from_words<P, N, S>(positive: P, negative: N) -> Self
  where
    P: IntoIterator<Item = S>,
    N: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    Self {
      positive_words: positive.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
      negative_words: negative.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
    }
  }
}

impl Default for LexiconModel {
  fn default() -> Self {
    Self::new()
  }
}

impl LanguageModel for LexiconModel {
  fn score(&self, words: &[String]) -> SentimentScore {
    let mut positive = 0usize;
    let mut negative = 0usize;
    for word in words {
      let word = word.to_lowercase();
      if self.positive_words.contains(&word) {
        positive += 1;
      }
      if self.negative_words.contains(&word) {
        negative += 1;
      }
    }

    let (pos, neg) = (positive as f64, negative as f64);
    SentimentScore {
      positive: pos,
      negative: neg,
      polarity: (pos - neg) / (pos + neg + EPSILON),
      subjectivity: (pos + neg) / (words.len() as f64 + EPSILON),
    }
  }
}

/// Score every ticker's token file under `token_dir`
pub fn score_tickers(
  model: &dyn LanguageModel,
  tickers: &[Ticker],
  token_dir: &Path,
) -> LoaderResult<Vec<SentimentScoreRow>> {
  let processor = CsvProcessor::new();
  tickers
    .iter()
    .map(|ticker| {
      let words = processor.read_tokens(token_dir.join(format!("{}.csv", ticker)))?;
      let score = model.score(&words);
      debug!("{}: {} words, polarity {:.4}", ticker, words.len(), score.polarity);
      Ok(SentimentScoreRow::new(ticker.as_str(), score))
    })
    .collect()
}

const POSITIVE_WORDS: &[&str] = &[
  // growth and performance
  "growth", "growing", "grew", "gain", "gains", "improve", "improved", "improvement",
  "strong", "stronger", "strength", "robust", "solid", "excellent", "exceptional",
  "outstanding", "record", "beat", "exceeded", "surpassed", "outperformed",
  // financial positives
  "profit", "profitable", "profitability", "momentum", "accelerate", "accelerated",
  "expansion", "expand", "expanded", "expanding", "rally", "surge", "soar", "soared",
  // position and outlook
  "leader", "leading", "leadership", "advantage", "opportunity", "opportunities",
  "confident", "optimistic", "positive", "favorable", "success", "successful",
  "achieve", "achieved", "upgrade", "upside", "innovative", "popular", "boom",
];

const NEGATIVE_WORDS: &[&str] = &[
  // decline
  "decline", "declined", "declining", "decrease", "decreased", "drop", "dropped",
  "fall", "fell", "falling", "weak", "weaker", "weakness", "slump", "plunge", "plunged",
  // problems
  "loss", "losses", "lose", "losing", "risk", "risks", "risky", "concern", "concerns",
  "uncertain", "uncertainty", "volatile", "volatility", "challenge", "challenging",
  "difficult", "problem", "problems", "lawsuit", "litigation", "investigation",
  "fraud", "default", "debt", "delay", "delayed", "delays", "slips", "negative",
  "downgrade", "downside", "warning", "adverse", "unprofitable", "overvalued", "bubble",
];
