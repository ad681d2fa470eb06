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

use super::{log_process_summary, override_sampling, override_tickers};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use ipo_core::{ScanMode, IPO_INFO_FILE, SENTIMENT_SCORES_FILE};
use ipo_loaders::{
  score_tickers, ArchiveExtractor, CsvProcessor, DataLoader, ExtractInput, IpoPipeline, LexiconModel,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct RunArgs {
  /// Root of the unzipped article corpus
  #[arg(long)]
  corpus_dir: Option<PathBuf>,

  /// Zip archive of the corpus, extracted into the corpus directory first
  #[arg(long)]
  archive: Option<PathBuf>,

  /// IPO reference table (.xlsx workbook or CSV)
  #[arg(long)]
  reference: Option<PathBuf>,

  /// Output root for token files, article dumps and tables
  #[arg(short, long)]
  output_dir: Option<PathBuf>,

  /// Comma-separated list of tickers
  #[arg(short, long)]
  tickers: Option<String>,

  /// Fields searched for the company name (title, title-or-content)
  #[arg(long)]
  scan_mode: Option<ScanMode>,

  /// Scan a random fraction of each corpus directory
  #[arg(long)]
  sample_ratio: Option<f64>,

  /// Seed for the sample
  #[arg(long)]
  seed: Option<u64>,

  /// Process tickers in parallel
  #[arg(long)]
  parallel: bool,
}

pub fn execute(args: RunArgs, mut config: Config) -> Result<()> {
  let pipeline_config = &mut config.pipeline;
  if let Some(dir) = args.corpus_dir {
    pipeline_config.corpus_dir = dir;
  }
  if let Some(path) = args.reference {
    pipeline_config.reference_path = path;
  }
  if let Some(dir) = args.output_dir {
    pipeline_config.output_dir = dir;
  }
  if let Some(mode) = args.scan_mode {
    pipeline_config.scan_mode = mode;
  }
  pipeline_config.parallel |= args.parallel;
  override_tickers(pipeline_config, args.tickers.as_deref())?;
  override_sampling(pipeline_config, args.sample_ratio, args.seed)?;

  let pipeline_config = &config.pipeline;
  info!(
    "Starting pre-IPO sentiment run for {} tickers ({}, {:?})",
    pipeline_config.tickers.len(),
    pipeline_config.scan_mode,
    pipeline_config.sampling
  );

  let context = config.loader_context();
  if let Some(archive) = args.archive {
    ArchiveExtractor::new(&pipeline_config.corpus_dir)
      .load(&context, ExtractInput { archive })
      .context("Failed to extract corpus archive")?;
  }

  let processor = CsvProcessor::new();
  let companies = processor
    .company_records(&pipeline_config.reference_path, &pipeline_config.tickers)
    .with_context(|| {
      format!("Failed to read IPO reference table {}", pipeline_config.reference_path.display())
    })?;
  for company in companies.iter().filter(|c| c.ipo_date.is_none()) {
    warn!("{}: IPO date unreadable, no article can qualify as pre-IPO", company.ticker);
  }

  let info_path = pipeline_config.output_dir.join(IPO_INFO_FILE);
  processor.write_ipo_info(&info_path, &companies)?;
  info!("Wrote {}", info_path.display());

  let token_dir = pipeline_config.tokenized_dir();
  let output = IpoPipeline::new(&pipeline_config.corpus_dir, &token_dir).run(&context, &companies)?;

  for report in &output.reports {
    info!(
      "{}: matched={} pre_ipo={} after_ipo={} undated={} tokens={} skipped_files={}",
      report.ticker,
      report.articles_matched,
      report.filter.retained,
      report.filter.dropped_not_before,
      report.filter.dropped_undated,
      report.token_count,
      report.files_skipped
    );
  }

  let rows = score_tickers(&LexiconModel::new(), &pipeline_config.tickers, &token_dir)?;
  let scores_path = pipeline_config.output_dir.join(SENTIMENT_SCORES_FILE);
  processor.write_scores(&scores_path, &rows)?;
  info!("Wrote {}", scores_path.display());

  log_process_summary(&context)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use ipo_core::Config as CoreConfig;
  use std::fs;
  use std::io::Write;
  use tempfile::TempDir;

  fn args(corpus: &TempDir, out: &TempDir, reference: PathBuf) -> RunArgs {
    RunArgs {
      corpus_dir: Some(corpus.path().to_path_buf()),
      archive: None,
      reference: Some(reference),
      output_dir: Some(out.path().to_path_buf()),
      tickers: Some("ACME".to_string()),
      scan_mode: None,
      sample_ratio: None,
      seed: None,
      parallel: false,
    }
  }

  #[test]
  fn test_run_writes_all_artifacts() {
    let corpus = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(
      corpus.path().join("1.json"),
      r#"{"title":"Acme announces IPO","published":"2018-01-01T00:00:00Z","text":"Acme is growing fast"}"#,
    )
    .unwrap();
    let reference = out.path().join("ipo_df.csv");
    fs::write(&reference, "trade_date,company,ticker,open_prc_pct_rtrn\n2018-03-01,Acme,ACME,0.2\n").unwrap();

    let config = Config { pipeline: CoreConfig::with_dirs("/unused", "/unused"), show_progress: false };
    execute(args(&corpus, &out, reference), config).unwrap();

    let tokens = fs::read_to_string(out.path().join("tokenized_texts/ACME.csv")).unwrap();
    assert_eq!(tokens, "Acme\nis\ngrowing\nfast\n");
    assert!(out.path().join("matching_json_files/matching_files_Acme.json").exists());
    assert!(out.path().join(IPO_INFO_FILE).exists());
    let scores = fs::read_to_string(out.path().join(SENTIMENT_SCORES_FILE)).unwrap();
    assert!(scores.lines().nth(1).unwrap().starts_with("ACME,1.0,0.0,"));
  }

  #[test]
  fn test_run_extracts_archive_before_scanning() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let archive = dir.path().join("news.zip");
    let mut writer = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
    writer.start_file("feed/1.json", zip::write::SimpleFileOptions::default()).unwrap();
    writer
      .write_all(br#"{"title":"Acme files","published":"2018-02-01","text":"Acme growth"}"#)
      .unwrap();
    writer.finish().unwrap();

    let reference = out.path().join("ipo_df.csv");
    fs::write(&reference, "trade_date,company,ticker\n2018-03-01,Acme,ACME\n").unwrap();
    let corpus = TempDir::new().unwrap();
    let mut run_args = args(&corpus, &out, reference);
    run_args.archive = Some(archive);

    let config = Config { pipeline: CoreConfig::with_dirs("/unused", "/unused"), show_progress: false };
    execute(run_args, config).unwrap();

    assert!(corpus.path().join("feed/1.json").is_file());
    let tokens = fs::read_to_string(out.path().join("tokenized_texts/ACME.csv")).unwrap();
    assert_eq!(tokens, "Acme\ngrowth\n");
  }

  #[test]
  fn test_run_fails_on_unknown_ticker() {
    let corpus = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let reference = out.path().join("ipo_df.csv");
    fs::write(&reference, "trade_date,company,ticker\n2018-03-01,Globex,GLBX\n").unwrap();

    let config = Config { pipeline: CoreConfig::with_dirs("/unused", "/unused"), show_progress: false };
    assert!(execute(args(&corpus, &out, reference), config).is_err());
  }
}
