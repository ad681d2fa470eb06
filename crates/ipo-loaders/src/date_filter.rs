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

//! Pre-IPO date filter.
//!
//! Keeps only the articles published strictly before the company's IPO
//! date, compared as UTC calendar dates. Articles without a readable
//! publication date are dropped, as are all articles of a company whose
//! IPO date is unknown: an article that cannot be shown to precede the
//! listing never reaches the sentiment scores.

use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult};
use ipo_core::dates::is_strictly_before;
use ipo_core::Ticker;
use ipo_models::{ArticleTable, CompanyRecord};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Input for the date filter
#[derive(Debug, Clone, Default)]
pub struct DateFilterInput {
  pub tables: BTreeMap<Ticker, ArticleTable>,
  /// Reference records; every ticker in `tables` must have one
  pub companies: BTreeMap<Ticker, CompanyRecord>,
}

/// Per-table filter counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FilterStats {
  pub retained: usize,
  /// Published on or after the IPO date
  pub dropped_not_before: usize,
  /// Publication date missing or unreadable
  pub dropped_undated: usize,
}

impl FilterStats {
  fn add(&mut self, other: FilterStats) {
    self.retained += other.retained;
    self.dropped_not_before += other.dropped_not_before;
    self.dropped_undated += other.dropped_undated;
  }
}

/// Output from the date filter
#[derive(Debug, Default)]
pub struct DateFilterOutput {
  pub tables: BTreeMap<Ticker, ArticleTable>,
  pub stats: FilterStats,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DateFilter;

impl DateFilter {
  pub fn new() -> Self {
    Self
  }

  /// Filter one company's table, preserving row order.
  pub fn filter_table(&self, table: &ArticleTable, company: &CompanyRecord) -> (ArticleTable, FilterStats) {
    let mut stats = FilterStats::default();
    if company.ipo_date.is_none() {
      warn!("{}: IPO date unknown, dropping all {} articles", company.ticker, table.len());
    }

    let filtered = table.filtered(|article| {
      if article.published_date.is_none() {
        stats.dropped_undated += 1;
        false
      } else if is_strictly_before(article.published_date, company.ipo_date) {
        stats.retained += 1;
        true
      } else {
        stats.dropped_not_before += 1;
        false
      }
    });

    (filtered, stats)
  }
}

impl DataLoader for DateFilter {
  type Input = DateFilterInput;
  type Output = DateFilterOutput;

  fn load(&self, _context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    self.validate_input(&input)?;

    let mut output = DateFilterOutput::default();
    for (ticker, table) in &input.tables {
      let company = input.companies.get(ticker).ok_or_else(|| LoaderError::MissingTicker(ticker.clone()))?;
      let (filtered, stats) = self.filter_table(table, company);
      info!(
        "{}: kept {} of {} articles before {} ({} on/after, {} undated)",
        ticker,
        stats.retained,
        table.len(),
        company.ipo_date.map(|d| d.to_string()).unwrap_or_else(|| "unknown IPO date".to_string()),
        stats.dropped_not_before,
        stats.dropped_undated
      );
      output.stats.add(stats);
      output.tables.insert(ticker.clone(), filtered);
    }
    Ok(output)
  }

  fn validate_input(&self, input: &Self::Input) -> LoaderResult<()> {
    match input.tables.keys().find(|t| !input.companies.contains_key(*t)) {
      Some(ticker) => Err(LoaderError::MissingTicker(ticker.clone())),
      None => Ok(()),
    }
  }

  fn name(&self) -> &'static str {
    "date_filter"
  }
}
