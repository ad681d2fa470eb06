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

use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use ipo_loaders::{ArchiveExtractor, DataLoader, ExtractInput};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct UnzipArgs {
  /// Zip archive holding the article corpus
  #[arg(short, long)]
  archive: PathBuf,

  /// Destination directory (defaults to the configured corpus directory)
  #[arg(short, long)]
  out_dir: Option<PathBuf>,
}

pub fn execute(args: UnzipArgs, config: Config) -> Result<()> {
  let out_dir = args.out_dir.unwrap_or_else(|| config.pipeline.corpus_dir.clone());
  let context = config.loader_context();

  let output = ArchiveExtractor::new(&out_dir)
    .load(&context, ExtractInput { archive: args.archive.clone() })
    .with_context(|| format!("Failed to extract {}", args.archive.display()))?;

  info!("{} files extracted into {}", output.files_extracted, output.out_dir.display());
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use ipo_core::Config as CoreConfig;
  use std::fs;
  use std::io::Write;
  use tempfile::TempDir;

  #[test]
  fn test_unzip_defaults_to_corpus_dir() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("news.zip");
    let mut writer = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
    writer.start_file("feed/1.json", zip::write::SimpleFileOptions::default()).unwrap();
    writer.write_all(br#"{"title":"Acme files"}"#).unwrap();
    writer.finish().unwrap();

    let corpus = dir.path().join("unzipped");
    let config = Config { pipeline: CoreConfig::with_dirs(&corpus, dir.path()), show_progress: false };
    execute(UnzipArgs { archive, out_dir: None }, config).unwrap();

    assert_eq!(fs::read_to_string(corpus.join("feed/1.json")).unwrap(), r#"{"title":"Acme files"}"#);
  }

  #[test]
  fn test_unzip_reports_missing_archive() {
    let dir = TempDir::new().unwrap();
    let config = Config { pipeline: CoreConfig::with_dirs(dir.path(), dir.path()), show_progress: false };
    let args = UnzipArgs { archive: dir.path().join("none.zip"), out_dir: Some(dir.path().join("out")) };

    let err = execute(args, config).unwrap_err();
    assert!(err.to_string().contains("Failed to extract"));
  }
}
