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

//! Article aggregator: one table of matching articles per company.

use crate::corpus_scanner::CorpusScanner;
use crate::{DataLoader, LoaderContext, LoaderResult};
use ipo_core::Ticker;
use ipo_models::{Article, ArticleTable};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Input for the aggregator: ticker -> company name used as the keyword
#[derive(Debug, Clone, Default)]
pub struct AggregatorInput {
  pub companies: BTreeMap<Ticker, String>,
}

/// Output from the aggregator
#[derive(Debug, Default)]
pub struct AggregatorOutput {
  /// One table per requested ticker, possibly empty
  pub tables: BTreeMap<Ticker, ArticleTable>,
  pub files_skipped: usize,
}

pub struct ArticleAggregator {
  scanner: CorpusScanner,
}

impl ArticleAggregator {
  pub fn new(corpus_dir: impl Into<PathBuf>) -> Self {
    Self { scanner: CorpusScanner::new(corpus_dir) }
  }

  /// Collect every article mentioning `company_name` into the ticker's table.
  ///
  /// Also returns the number of corpus files that could not be parsed.
  pub fn aggregate_company(
    &self,
    context: &LoaderContext,
    ticker: &Ticker,
    company_name: &str,
  ) -> LoaderResult<(ArticleTable, usize)> {
    let scan = self.scanner.scan_articles(context, company_name)?;
    debug!("{}: {} matching articles for {:?}", ticker, scan.articles.len(), company_name);

    if let Some(dir) = &context.config.matching_json_dir {
      write_matching_json(dir, company_name, &scan.articles)?;
    }

    Ok((ArticleTable::new(ticker.clone(), scan.articles), scan.files_skipped))
  }
}

impl DataLoader for ArticleAggregator {
  type Input = AggregatorInput;
  type Output = AggregatorOutput;

  fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    let mut output = AggregatorOutput::default();
    for (ticker, company_name) in &input.companies {
      let (table, skipped) = self.aggregate_company(context, ticker, company_name)?;
      output.files_skipped += skipped;
      output.tables.insert(ticker.clone(), table);
    }

    info!(
      "Aggregated {} articles for {} companies",
      output.tables.values().map(ArticleTable::len).sum::<usize>(),
      output.tables.len()
    );
    Ok(output)
  }

  fn name(&self) -> &'static str {
    "article_aggregator"
  }
}

/// File stem for a company name: anything but ASCII alphanumerics becomes `_`
pub fn matching_json_file_name(company_name: &str) -> String {
  let stem: String =
    company_name.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
  format!("matching_files_{}.json", stem)
}

/// Dump `{source path: article}` for one company, replacing any previous dump.
fn write_matching_json(dir: &Path, company_name: &str, articles: &[Article]) -> LoaderResult<()> {
  fs::create_dir_all(dir)?;
  let mut dump = Map::new();
  for article in articles {
    dump.insert(article.source.display().to_string(), serde_json::to_value(article)?);
  }
  let path = dir.join(matching_json_file_name(company_name));
  fs::write(&path, serde_json::to_vec(&Value::Object(dump))?)?;
  debug!("Wrote {}", path.display());
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::LoaderConfig;
  use ipo_core::test_utils::write_fixture;
  use tempfile::TempDir;

  fn context(matching_json_dir: Option<PathBuf>) -> LoaderContext {
    LoaderContext::new(LoaderConfig { show_progress: false, matching_json_dir, ..LoaderConfig::default() })
  }

  fn corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "1.json", r#"{"title":"IPO is in the title","text":"one"}"#);
    write_fixture(dir.path(), "2.json", r#"{"title":"Nothing here","text":"two"}"#);
    write_fixture(dir.path(), "3.json", r#"{"title":"Acquisition is in the title","text":"three"}"#);
    write_fixture(dir.path(), "4.json", r#"{"title":"Another IPO","text":"four"}"#);
    dir
  }

  fn input(pairs: &[(&str, &str)]) -> AggregatorInput {
    AggregatorInput {
      companies: pairs.iter().map(|(t, n)| (Ticker::new(t).unwrap(), n.to_string())).collect(),
    }
  }

  #[test]
  fn test_one_table_per_ticker() {
    let dir = corpus();
    let aggregator = ArticleAggregator::new(dir.path());
    let output = aggregator.load(&context(None), input(&[("IPOX", "IPO"), ("ACQ", "Acquisition"), ("NONE", "Zzz")])).unwrap();

    assert_eq!(output.tables.len(), 3);
    let ipo = &output.tables[&Ticker::new("IPOX").unwrap()];
    assert_eq!(ipo.texts().collect::<Vec<_>>(), vec!["one", "four"]);
    assert_eq!(output.tables[&Ticker::new("ACQ").unwrap()].len(), 1);
    assert!(output.tables[&Ticker::new("NONE").unwrap()].is_empty());
  }

  #[test]
  fn test_matching_json_dump() {
    let dir = corpus();
    let out = TempDir::new().unwrap();
    let dump_dir = out.path().join("matching_json_files");
    let aggregator = ArticleAggregator::new(dir.path());
    aggregator.load(&context(Some(dump_dir.clone())), input(&[("IPOX", "IPO")])).unwrap();

    let dump: Value = serde_json::from_slice(&fs::read(dump_dir.join("matching_files_IPO.json")).unwrap()).unwrap();
    let dump = dump.as_object().unwrap();
    assert_eq!(dump.len(), 2);
    let key = dir.path().join("1.json").display().to_string();
    assert_eq!(dump[&key]["text"], Value::String("one".to_string()));
  }

  #[test]
  fn test_empty_corpus_gives_empty_tables() {
    let dir = TempDir::new().unwrap();
    let aggregator = ArticleAggregator::new(dir.path());
    let output = aggregator.load(&context(None), input(&[("ACME", "Acme")])).unwrap();
    assert!(output.tables[&Ticker::new("ACME").unwrap()].is_empty());
  }

  #[test]
  fn test_matching_json_file_name() {
    assert_eq!(matching_json_file_name("Dropbox"), "matching_files_Dropbox.json");
    assert_eq!(matching_json_file_name("AXA Equitable/US"), "matching_files_AXA_Equitable_US.json");
  }
}
