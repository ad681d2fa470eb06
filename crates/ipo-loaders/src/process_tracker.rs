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

//! Process tracking for monitoring pipeline stages
//! This version uses in-memory tracking instead of database

use crate::{LoaderError, LoaderResult};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessState {
  Running,
  Success,
  Failed,
  CompletedWithErrors,
}

#[derive(Debug, Clone)]
pub struct ProcessInfo {
  pub process_name: String,
  pub start_time: DateTime<Utc>,
  pub end_time: Option<DateTime<Utc>>,
  pub state: ProcessState,
  pub error_message: Option<String>,
  pub records_processed: Option<usize>,
}

/// In-memory process tracker
///
/// Cloning shares the underlying record list, so one tracker can be handed
/// to stages running on different threads.
#[derive(Clone, Default)]
pub struct ProcessTracker {
  processes: Arc<Mutex<Vec<ProcessInfo>>>,
}

impl ProcessTracker {
  pub fn new() -> Self {
    Self { processes: Arc::new(Mutex::new(Vec::new())) }
  }

  fn lock(&self) -> LoaderResult<MutexGuard<'_, Vec<ProcessInfo>>> {
    self.processes.lock().map_err(|e| LoaderError::ProcessTrackingError(e.to_string()))
  }

  /// Record the start of a process and return its id
  pub fn start(&self, process_name: &str) -> LoaderResult<usize> {
    let mut processes = self.lock()?;
    processes.push(ProcessInfo {
      process_name: process_name.to_string(),
      start_time: Utc::now(),
      end_time: None,
      state: ProcessState::Running,
      error_message: None,
      records_processed: None,
    });
    Ok(processes.len() - 1)
  }

  pub fn complete(&self, id: usize, state: ProcessState, records: Option<usize>) -> LoaderResult<()> {
    let mut processes = self.lock()?;
    let process = processes
      .get_mut(id)
      .ok_or_else(|| LoaderError::ProcessTrackingError(format!("Unknown process id {}", id)))?;
    process.state = state;
    process.end_time = Some(Utc::now());
    process.records_processed = records;
    Ok(())
  }

  pub fn fail(&self, id: usize, error: &LoaderError) -> LoaderResult<()> {
    let mut processes = self.lock()?;
    if let Some(process) = processes.get_mut(id) {
      process.state = ProcessState::Failed;
      process.end_time = Some(Utc::now());
      process.error_message = Some(error.to_string());
    }
    Ok(())
  }

  pub fn get_all(&self) -> LoaderResult<Vec<ProcessInfo>> {
    Ok(self.lock()?.clone())
  }
}
