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

//! Per-ticker pipeline: aggregate -> date filter -> tokenize.
//!
//! Tickers share no state, so with `LoaderConfig::parallel` they run on the
//! rayon pool. Each run rewrites its outputs in full.

use crate::article_aggregator::ArticleAggregator;
use crate::date_filter::{DateFilter, FilterStats};
use crate::tokenizer::{Tokenizer, TokenizerOutput};
use crate::{DataLoader, LoaderContext, LoaderResult, ProcessState};
use ipo_core::Ticker;
use ipo_models::{ArticleTable, CompanyRecord};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{error, info};

/// What happened to one ticker
#[derive(Debug, Clone)]
pub struct TickerReport {
  pub ticker: Ticker,
  pub articles_matched: usize,
  pub files_skipped: usize,
  pub filter: FilterStats,
  pub token_count: usize,
  pub token_path: PathBuf,
}

/// Output of a full pipeline run
#[derive(Debug, Default)]
pub struct PipelineOutput {
  pub tokens: BTreeMap<Ticker, Vec<String>>,
  pub reports: Vec<TickerReport>,
}

pub struct IpoPipeline {
  aggregator: ArticleAggregator,
  date_filter: DateFilter,
  tokenizer: Tokenizer,
}

impl IpoPipeline {
  pub fn new(corpus_dir: impl Into<PathBuf>, token_dir: impl Into<PathBuf>) -> Self {
    Self {
      aggregator: ArticleAggregator::new(corpus_dir),
      date_filter: DateFilter::new(),
      tokenizer: Tokenizer::new(token_dir),
    }
  }

  pub fn run(&self, context: &LoaderContext, companies: &[CompanyRecord]) -> LoaderResult<PipelineOutput> {
    info!("Running pipeline for {} companies (parallel: {})", companies.len(), context.config.parallel);

    let results: Vec<LoaderResult<(TickerReport, Vec<String>)>> = if context.config.parallel {
      companies.par_iter().map(|company| self.run_company(context, company)).collect()
    } else {
      companies.iter().map(|company| self.run_company(context, company)).collect()
    };

    let mut output = PipelineOutput::default();
    for result in results {
      let (report, tokens) = result?;
      output.tokens.insert(report.ticker.clone(), tokens);
      output.reports.push(report);
    }
    Ok(output)
  }

  /// Run every stage for one company
  pub fn run_company(
    &self,
    context: &LoaderContext,
    company: &CompanyRecord,
  ) -> LoaderResult<(TickerReport, Vec<String>)> {
    let ticker = &company.ticker;

    let (table, files_skipped) = tracked(
      context,
      &format!("{}:{}", self.aggregator.name(), ticker),
      |ctx| self.aggregator.aggregate_company(ctx, ticker, &company.company_name),
      |(table, skipped): &(ArticleTable, usize)| (table.len(), *skipped > 0),
    )?;

    let (filtered, filter) = tracked(
      context,
      &format!("{}:{}", self.date_filter.name(), ticker),
      |_| Ok(self.date_filter.filter_table(&table, company)),
      |(filtered, _): &(ArticleTable, FilterStats)| (filtered.len(), false),
    )?;

    let tokenized = tracked(
      context,
      &format!("{}:{}", self.tokenizer.name(), ticker),
      |ctx| self.tokenizer.load(ctx, filtered),
      |out: &TokenizerOutput| (out.tokens.len(), false),
    )?;

    let report = TickerReport {
      ticker: ticker.clone(),
      articles_matched: table.len(),
      files_skipped,
      filter,
      token_count: tokenized.tokens.len(),
      token_path: tokenized.path,
    };
    Ok((report, tokenized.tokens))
  }
}

/// Run `stage` under the context's process tracker.
///
/// `summarize` reports the record count and whether the stage completed
/// with recoverable errors.
fn tracked<T, F, S>(context: &LoaderContext, name: &str, stage: F, summarize: S) -> LoaderResult<T>
where
  F: FnOnce(&LoaderContext) -> LoaderResult<T>,
  S: Fn(&T) -> (usize, bool),
{
  let id = context.track_start(name)?;
  match stage(context) {
    Ok(value) => {
      let (records, with_errors) = summarize(&value);
      let state = if with_errors { ProcessState::CompletedWithErrors } else { ProcessState::Success };
      context.track_complete(id, state, records)?;
      Ok(value)
    }
    Err(e) => {
      error!("{} failed: {}", name, e);
      if let (Some(tracker), Some(id)) = (&context.process_tracker, id) {
        tracker.fail(id, &e)?;
      }
      Err(e)
    }
  }
}
