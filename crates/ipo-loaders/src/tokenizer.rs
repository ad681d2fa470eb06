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

//! Tokenizer: turns a company's article bodies into a flat word list and
//! persists it as `<token dir>/<TICKER>.csv`, one word per record.

use crate::csv_processor::CsvProcessor;
use crate::{DataLoader, LoaderContext, LoaderResult};
use ipo_core::Ticker;
use ipo_models::ArticleTable;
use std::path::PathBuf;
use tracing::info;

/// Output from the tokenizer
#[derive(Debug, Clone)]
pub struct TokenizerOutput {
  pub ticker: Ticker,
  pub tokens: Vec<String>,
  pub path: PathBuf,
}

pub struct Tokenizer {
  token_dir: PathBuf,
}

impl Tokenizer {
  pub fn new(token_dir: impl Into<PathBuf>) -> Self {
    Self { token_dir: token_dir.into() }
  }

  pub fn token_path(&self, ticker: &Ticker) -> PathBuf {
    self.token_dir.join(format!("{}.csv", ticker))
  }
}

/// Remove ASCII punctuation, keeping hyphens
pub fn strip_punctuation(text: &str) -> String {
  text.chars().filter(|c| *c == '-' || !c.is_ascii_punctuation()).collect()
}

/// Join the bodies with a space, strip punctuation and split on whitespace.
pub fn tokenize<'a, I>(texts: I) -> Vec<String>
where
  I: IntoIterator<Item = &'a str>,
{
  let joined = texts.into_iter().collect::<Vec<_>>().join(" ");
  strip_punctuation(&joined).split_whitespace().map(str::to_string).collect()
}

impl DataLoader for Tokenizer {
  type Input = ArticleTable;
  type Output = TokenizerOutput;

  fn load(&self, _context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    let tokens = tokenize(input.texts());
    let path = self.token_path(&input.ticker);
    CsvProcessor::new().write_tokens(&path, &tokens)?;

    info!("{}: {} tokens from {} articles -> {}", input.ticker, tokens.len(), input.len(), path.display());
    Ok(TokenizerOutput { ticker: input.ticker, tokens, path })
  }

  fn name(&self) -> &'static str {
    "tokenizer"
  }
}
