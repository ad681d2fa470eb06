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

use super::override_sampling;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use ipo_core::ScanMode;
use ipo_loaders::CorpusScanner;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct ScanArgs {
  /// Keyword to look for, case-sensitive
  #[arg(short, long)]
  keyword: String,

  /// Root of the unzipped article corpus
  #[arg(long)]
  corpus_dir: Option<PathBuf>,

  /// Fields searched for the keyword (title, title-or-content)
  #[arg(long)]
  scan_mode: Option<ScanMode>,

  /// Scan a random fraction of each corpus directory
  #[arg(long)]
  sample_ratio: Option<f64>,

  /// Seed for the sample
  #[arg(long)]
  seed: Option<u64>,
}

pub fn execute(args: ScanArgs, mut config: Config) -> Result<()> {
  if args.keyword.is_empty() {
    return Err(anyhow!("--keyword must not be empty"));
  }
  if let Some(dir) = args.corpus_dir {
    config.pipeline.corpus_dir = dir;
  }
  if let Some(mode) = args.scan_mode {
    config.pipeline.scan_mode = mode;
  }
  override_sampling(&mut config.pipeline, args.sample_ratio, args.seed)?;

  let context = config.loader_context();
  let matches = CorpusScanner::new(&config.pipeline.corpus_dir).scan(&context, &args.keyword)?;
  for path in &matches {
    println!("{}", path.display());
  }

  info!("{} files mention {:?}", matches.len(), args.keyword);
  Ok(())
}
