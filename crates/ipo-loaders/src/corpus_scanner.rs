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

//! Corpus scanner: finds the article files that mention a keyword.
//!
//! Every file under the root is a candidate. Files that cannot be read or
//! are not a single JSON object are skipped with a warning; a missing root
//! yields an empty result.

use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult};
use ipo_core::SamplingMode;
use ipo_models::Article;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const SKIP_UNREADABLE_MSG: &str = "Skipping unreadable article file";

/// Input for the corpus scanner
#[derive(Debug, Clone)]
pub struct ScanInput {
  /// Case-sensitive substring searched for
  pub keyword: String,
}

/// Output from the corpus scanner
#[derive(Debug, Default)]
pub struct ScanOutput {
  /// Matching files in path order
  pub matches: BTreeSet<PathBuf>,
  pub files_scanned: usize,
  pub files_skipped: usize,
}

/// Matching articles, parsed
#[derive(Debug, Default)]
pub struct ArticleScan {
  /// Matching articles in path order
  pub articles: Vec<Article>,
  pub files_scanned: usize,
  pub files_skipped: usize,
}

pub struct CorpusScanner {
  root: PathBuf,
}

impl CorpusScanner {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Every candidate file under the root, after sampling, in path order.
  ///
  /// With [`SamplingMode::Fraction`] each directory contributes
  /// `floor(files * ratio)` randomly chosen files of its own.
  pub fn candidate_files(&self, sampling: &SamplingMode) -> Vec<PathBuf> {
    if !self.root.exists() {
      warn!(root = %self.root.display(), "Corpus directory does not exist, nothing to scan");
      return Vec::new();
    }

    let mut by_directory: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for entry in WalkDir::new(&self.root).follow_links(true).sort_by_file_name() {
      match entry {
        Ok(entry) if entry.file_type().is_file() => {
          let path = entry.into_path();
          let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
          by_directory.entry(parent).or_default().push(path);
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "Skipping unreadable corpus entry"),
      }
    }

    let mut candidates = match sampling {
      SamplingMode::Full => by_directory.into_values().flatten().collect::<Vec<_>>(),
      SamplingMode::Fraction { seed, .. } => {
        let mut rng = match seed {
          Some(seed) => StdRng::seed_from_u64(*seed),
          None => StdRng::from_os_rng(),
        };
        let mut sampled = Vec::new();
        for (_, mut files) in by_directory {
          let keep = sampling.sample_size(files.len());
          files.shuffle(&mut rng);
          files.truncate(keep);
          sampled.extend(files);
        }
        sampled
      }
    };
    candidates.sort();
    candidates
  }

  /// Read and parse one article file.
  ///
  /// Bytes that are not valid UTF-8 are decoded as Latin-1.
  pub fn read_article(path: &Path) -> LoaderResult<Article> {
    let bytes = fs::read(path).map_err(|e| LoaderError::IoError(format!("{}: {}", path.display(), e)))?;
    let raw = decode_text(bytes);
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
    Ok(Article::from_json(path, raw)?)
  }

  /// Parse every candidate and keep the articles that mention `keyword`.
  pub fn scan_articles(&self, context: &LoaderContext, keyword: &str) -> LoaderResult<ArticleScan> {
    if keyword.is_empty() {
      return Err(LoaderError::InvalidData("Scan keyword must not be empty".to_string()));
    }

    let candidates = self.candidate_files(&context.config.sampling);
    debug!(
      "Scanning {} candidate files under {} for {:?} ({})",
      candidates.len(),
      self.root.display(),
      keyword,
      context.config.scan_mode
    );

    let progress = context.progress_bar(candidates.len() as u64, keyword);

    let mut scan = ArticleScan { files_scanned: candidates.len(), ..ArticleScan::default() };
    for path in &candidates {
      match Self::read_article(path) {
        Ok(article) => {
          if article.mentions(keyword, context.config.scan_mode) {
            scan.articles.push(article);
          }
        }
        Err(e) => {
          warn!(path = %path.display(), error = %e, "{}", SKIP_UNREADABLE_MSG);
          scan.files_skipped += 1;
        }
      }
      if let Some(pb) = &progress {
        pb.inc(1);
      }
    }

    if let Some(pb) = progress {
      pb.finish_and_clear();
    }

    info!(
      "{:?}: {} of {} files match ({} skipped)",
      keyword,
      scan.articles.len(),
      scan.files_scanned,
      scan.files_skipped
    );
    Ok(scan)
  }

  /// Paths of the files that mention `keyword`
  pub fn scan(&self, context: &LoaderContext, keyword: &str) -> LoaderResult<BTreeSet<PathBuf>> {
    Ok(self.load(context, ScanInput { keyword: keyword.to_string() })?.matches)
  }
}

impl DataLoader for CorpusScanner {
  type Input = ScanInput;
  type Output = ScanOutput;

  fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    let scan = self.scan_articles(context, &input.keyword)?;
    Ok(ScanOutput {
      matches: scan.articles.into_iter().map(|a| a.source).collect(),
      files_scanned: scan.files_scanned,
      files_skipped: scan.files_skipped,
    })
  }

  fn name(&self) -> &'static str {
    "corpus_scanner"
  }
}

/// UTF-8 when valid, otherwise Latin-1
fn decode_text(bytes: Vec<u8>) -> String {
  match String::from_utf8(bytes) {
    Ok(text) => text,
    Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::LoaderConfig;
  use ipo_core::test_utils::write_fixture;
  use ipo_core::ScanMode;
  use tempfile::TempDir;

  fn context(scan_mode: ScanMode) -> LoaderContext {
    LoaderContext::new(LoaderConfig { scan_mode, show_progress: false, ..LoaderConfig::default() })
  }

  fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "a/file_0.json", r#"{"title":"IPO is in the title","content":"Random content"}"#);
    write_fixture(dir.path(), "a/file_1.json", r#"{"title":"Title without the word","content":"Random content"}"#);
    write_fixture(dir.path(), "b/c/file_2.json", r#"{"title":"Another title with IPO","content":"x"}"#);
    write_fixture(dir.path(), "b/file_3.json", r#"{"title":"Quiet day","content":"An IPO is coming"}"#);
    write_fixture(dir.path(), "b/broken.json", r#"{"title": "IPO"#);
    write_fixture(dir.path(), "b/list.json", r#"["IPO"]"#);
    dir
  }

  #[test]
  fn test_title_mode_matches_title_only() {
    let dir = fixture();
    let scanner = CorpusScanner::new(dir.path());
    let output = scanner.load(&context(ScanMode::Title), ScanInput { keyword: "IPO".to_string() }).unwrap();

    let expected: BTreeSet<PathBuf> =
      [dir.path().join("a/file_0.json"), dir.path().join("b/c/file_2.json")].into_iter().collect();
    assert_eq!(output.matches, expected);
    assert_eq!(output.files_scanned, 6);
    assert_eq!(output.files_skipped, 2);
  }

  #[test]
  fn test_title_or_content_mode_also_matches_content() {
    let dir = fixture();
    let scanner = CorpusScanner::new(dir.path());
    let matches = scanner.scan(&context(ScanMode::TitleOrContent), "IPO").unwrap();
    assert_eq!(matches.len(), 3);
    assert!(matches.contains(&dir.path().join("b/file_3.json")));
  }

  #[test]
  fn test_matching_is_case_sensitive_substring() {
    let dir = fixture();
    let scanner = CorpusScanner::new(dir.path());
    assert!(scanner.scan(&context(ScanMode::Title), "ipo").unwrap().is_empty());
    // part of a longer word still counts
    assert_eq!(scanner.scan(&context(ScanMode::Title), "itl").unwrap().len(), 3);
  }

  #[test]
  fn test_missing_root_is_empty() {
    let scanner = CorpusScanner::new("/definitely/not/here");
    assert!(scanner.scan(&context(ScanMode::Title), "IPO").unwrap().is_empty());
  }

  #[test]
  fn test_empty_keyword_rejected() {
    let dir = fixture();
    let scanner = CorpusScanner::new(dir.path());
    let err = scanner.load(&context(ScanMode::Title), ScanInput { keyword: String::new() }).unwrap_err();
    assert!(matches!(err, LoaderError::InvalidData(_)));
  }

  #[test]
  fn test_scan_articles_rejects_empty_keyword() {
    let dir = fixture();
    let scanner = CorpusScanner::new(dir.path());
    let err = scanner.scan_articles(&context(ScanMode::TitleOrContent), "").unwrap_err();
    assert!(matches!(err, LoaderError::InvalidData(_)));
  }

  #[test]
  fn test_latin1_file_is_decoded() {
    let dir = TempDir::new().unwrap();
    let mut bytes = br#"{"title":"Caf"#.to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(br#" Acme IPO"}"#);
    fs::write(dir.path().join("latin1.json"), bytes).unwrap();

    let article = CorpusScanner::read_article(&dir.path().join("latin1.json")).unwrap();
    assert_eq!(article.title.as_deref(), Some("Caf\u{e9} Acme IPO"));
  }

  #[test]
  fn test_byte_order_mark_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "bom.json", "\u{feff}{\"title\":\"Acme\"}");
    assert!(CorpusScanner::read_article(&path).is_ok());
  }

  #[test]
  fn test_fraction_sampling_per_directory() {
    let dir = TempDir::new().unwrap();
    for i in 0..20 {
      write_fixture(dir.path(), &format!("x/{:02}.json", i), r#"{"title":"t"}"#);
    }
    for i in 0..9 {
      write_fixture(dir.path(), &format!("y/{:02}.json", i), r#"{"title":"t"}"#);
    }
    let scanner = CorpusScanner::new(dir.path());
    let sampling = SamplingMode::fraction(0.1, Some(7)).unwrap();

    let sample = scanner.candidate_files(&sampling);
    // 20 files -> 2, 9 files -> 0
    assert_eq!(sample.len(), 2);
    assert!(sample.iter().all(|p| p.starts_with(dir.path().join("x"))));
    assert_eq!(sample, scanner.candidate_files(&sampling), "seeded sample is reproducible");
    assert_eq!(scanner.candidate_files(&SamplingMode::Full).len(), 29);
  }
}
