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

//! Base traits and types for pipeline stages

use crate::{LoaderResult, ProcessTracker};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use ipo_core::{Config, SamplingMode, ScanMode};
use std::path::PathBuf;

/// Configuration shared by all stages
#[derive(Debug, Clone)]
pub struct LoaderConfig {
  /// Article fields searched for the company name
  pub scan_mode: ScanMode,

  /// Full scan or per-directory random sample
  pub sampling: SamplingMode,

  /// Run tickers on the rayon pool
  pub parallel: bool,

  /// Enable progress tracking
  pub show_progress: bool,

  /// Enable process state tracking
  pub track_process: bool,

  /// Where matching-article dumps are written; `None` disables them
  pub matching_json_dir: Option<PathBuf>,
}

impl Default for LoaderConfig {
  fn default() -> Self {
    Self {
      scan_mode: ScanMode::default(),
      sampling: SamplingMode::Full,
      parallel: false,
      show_progress: true,
      track_process: true,
      matching_json_dir: None,
    }
  }
}

impl From<&Config> for LoaderConfig {
  fn from(config: &Config) -> Self {
    Self {
      scan_mode: config.scan_mode,
      sampling: config.sampling,
      parallel: config.parallel,
      matching_json_dir: Some(config.matching_json_dir()),
      ..Self::default()
    }
  }
}

/// Shared context for all stages
pub struct LoaderContext {
  pub config: LoaderConfig,
  pub process_tracker: Option<ProcessTracker>,

  /// Display shared by the bars of every stage and ticker
  pub progress: MultiProgress,
}

impl LoaderContext {
  pub fn new(config: LoaderConfig) -> Self {
    Self { config, process_tracker: None, progress: MultiProgress::new() }
  }

  pub fn with_process_tracker(mut self, tracker: ProcessTracker) -> Self {
    self.process_tracker = Some(tracker);
    self
  }

  pub fn with_progress(mut self, progress: MultiProgress) -> Self {
    self.progress = progress;
    self
  }

  /// A bar of `len` steps attached to the shared display, or `None` when
  /// progress is disabled or there is nothing to do
  pub fn progress_bar(&self, len: u64, message: &str) -> Option<ProgressBar> {
    if !self.config.show_progress || len == 0 {
      return None;
    }
    let pb = self.progress.add(ProgressBar::new(len));
    pb.set_style(
      ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    Some(pb)
  }

  /// Start tracking `process_name` if tracking is enabled
  pub(crate) fn track_start(&self, process_name: &str) -> LoaderResult<Option<usize>> {
    match (&self.process_tracker, self.config.track_process) {
      (Some(tracker), true) => tracker.start(process_name).map(Some),
      _ => Ok(None),
    }
  }

  pub(crate) fn track_complete(
    &self,
    id: Option<usize>,
    state: crate::ProcessState,
    records: usize,
  ) -> LoaderResult<()> {
    match (&self.process_tracker, id) {
      (Some(tracker), Some(id)) => tracker.complete(id, state, Some(records)),
      _ => Ok(()),
    }
  }
}

/// Base trait for all pipeline stages
pub trait DataLoader: Send + Sync {
  /// The type of data this stage consumes
  type Input;

  /// The result type after the stage has run
  type Output;

  /// Run the stage on the given input
  fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output>;

  /// Validate input before loading
  fn validate_input(&self, _input: &Self::Input) -> LoaderResult<()> {
    Ok(())
  }

  /// Get stage name for logging/tracking
  fn name(&self) -> &'static str;
}
