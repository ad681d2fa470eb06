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

//! Archive extractor: unpacks the zipped article corpus into the directory
//! the scanner walks.

use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use zip::ZipArchive;

/// Input for the extractor
#[derive(Debug, Clone)]
pub struct ExtractInput {
  /// Zip archive holding the corpus
  pub archive: PathBuf,
}

/// Output from the extractor
#[derive(Debug, Default)]
pub struct ExtractOutput {
  pub out_dir: PathBuf,
  pub files_extracted: usize,
  /// Entries whose names would land outside `out_dir`
  pub entries_skipped: usize,
}

pub struct ArchiveExtractor {
  out_dir: PathBuf,
}

impl ArchiveExtractor {
  pub fn new(out_dir: impl Into<PathBuf>) -> Self {
    Self { out_dir: out_dir.into() }
  }
}

impl DataLoader for ArchiveExtractor {
  type Input = ExtractInput;
  type Output = ExtractOutput;

  /// Extract every entry, keeping the archive's directory layout.
  /// Existing files with the same name are overwritten.
  fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    let file = File::open(&input.archive)
      .map_err(|e| LoaderError::IoError(format!("{}: {}", input.archive.display(), e)))?;
    let mut archive = ZipArchive::new(file)?;
    fs::create_dir_all(&self.out_dir)?;

    info!("Extracting {} entries from {} into {}", archive.len(), input.archive.display(), self.out_dir.display());
    let progress = context.progress_bar(archive.len() as u64, "unzip");

    let mut output = ExtractOutput { out_dir: self.out_dir.clone(), ..ExtractOutput::default() };
    for index in 0..archive.len() {
      if let Some(pb) = &progress {
        pb.inc(1);
      }

      let mut entry = archive.by_index(index)?;
      let Some(relative) = entry.enclosed_name() else {
        warn!(entry = entry.name(), "Skipping archive entry outside the output directory");
        output.entries_skipped += 1;
        continue;
      };

      let target = self.out_dir.join(relative);
      if entry.is_dir() {
        fs::create_dir_all(&target)?;
        continue;
      }
      if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
      }
      let mut out = File::create(&target)?;
      io::copy(&mut entry, &mut out)?;
      output.files_extracted += 1;
    }

    if let Some(pb) = progress {
      pb.finish_and_clear();
    }
    info!("Extracted {} files ({} skipped)", output.files_extracted, output.entries_skipped);
    Ok(output)
  }

  fn name(&self) -> &'static str {
    "archive_extractor"
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{CorpusScanner, LoaderConfig};
  use pretty_assertions::assert_eq;
  use std::io::Write;
  use tempfile::TempDir;
  use zip::write::SimpleFileOptions;
  use zip::ZipWriter;

  fn context() -> LoaderContext {
    LoaderContext::new(LoaderConfig { show_progress: false, ..LoaderConfig::default() })
  }

  fn write_archive(path: &std::path::Path, entries: &[(&str, &str)]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    writer.add_directory("feed1/", SimpleFileOptions::default()).unwrap();
    for (name, body) in entries {
      writer.start_file(*name, SimpleFileOptions::default()).unwrap();
      writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
  }

  #[test]
  fn test_extracted_corpus_is_scannable() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("news.zip");
    let acme = r#"{"title":"Acme announces IPO","published":"2018-01-01T00:00:00Z","text":"Acme is growing fast"}"#;
    write_archive(&archive, &[("feed1/1.json", acme), ("feed2/nested/2.json", r#"{"title":"Other"}"#)]);

    let out_dir = dir.path().join("unzipped");
    let output = ArchiveExtractor::new(&out_dir).load(&context(), ExtractInput { archive }).unwrap();
    assert_eq!(output.files_extracted, 2);
    assert_eq!(output.entries_skipped, 0);
    assert_eq!(fs::read_to_string(out_dir.join("feed1/1.json")).unwrap(), acme);
    assert!(out_dir.join("feed2/nested/2.json").is_file());

    let matches = CorpusScanner::new(&out_dir).scan(&context(), "Acme").unwrap();
    assert_eq!(matches.into_iter().collect::<Vec<_>>(), vec![out_dir.join("feed1/1.json")]);
  }

  #[test]
  fn test_reextraction_overwrites() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("news.zip");
    let out_dir = dir.path().join("unzipped");
    let extractor = ArchiveExtractor::new(&out_dir);

    write_archive(&archive, &[("feed1/1.json", "first")]);
    extractor.load(&context(), ExtractInput { archive: archive.clone() }).unwrap();
    write_archive(&archive, &[("feed1/1.json", "second")]);
    extractor.load(&context(), ExtractInput { archive }).unwrap();

    assert_eq!(fs::read_to_string(out_dir.join("feed1/1.json")).unwrap(), "second");
  }

  #[test]
  fn test_missing_or_invalid_archive() {
    let dir = TempDir::new().unwrap();
    let extractor = ArchiveExtractor::new(dir.path().join("out"));

    let err = extractor.load(&context(), ExtractInput { archive: dir.path().join("none.zip") }).unwrap_err();
    assert!(matches!(err, LoaderError::IoError(_)));

    let bogus = dir.path().join("bogus.zip");
    fs::write(&bogus, b"not an archive").unwrap();
    let err = extractor.load(&context(), ExtractInput { archive: bogus }).unwrap_err();
    assert!(matches!(err, LoaderError::ArchiveError(_)));
  }
}
