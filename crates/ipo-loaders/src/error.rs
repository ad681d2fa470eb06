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

use ipo_core::Ticker;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LoaderError {
  #[error("CSV parsing error: {0}")]
  CsvError(String),

  #[error("IO error: {0}")]
  IoError(String),

  #[error("Serialization error: {0}")]
  SerializationError(String),

  #[error("Spreadsheet error: {0}")]
  SpreadsheetError(String),

  #[error("Archive error: {0}")]
  ArchiveError(String),

  #[error("Invalid data: {0}")]
  InvalidData(String),

  #[error("Ticker {0} not found in IPO reference table")]
  MissingTicker(Ticker),

  #[error("Process tracking error: {0}")]
  ProcessTrackingError(String),

  #[error("Configuration error: {0}")]
  ConfigurationError(String),
}

// Implement conversions manually
impl From<csv::Error> for LoaderError {
  fn from(err: csv::Error) -> Self {
    LoaderError::CsvError(err.to_string())
  }
}

impl From<std::io::Error> for LoaderError {
  fn from(err: std::io::Error) -> Self {
    LoaderError::IoError(err.to_string())
  }
}

impl From<serde_json::Error> for LoaderError {
  fn from(err: serde_json::Error) -> Self {
    LoaderError::SerializationError(err.to_string())
  }
}

impl From<calamine::Error> for LoaderError {
  fn from(err: calamine::Error) -> Self {
    LoaderError::SpreadsheetError(err.to_string())
  }
}

impl From<zip::result::ZipError> for LoaderError {
  fn from(err: zip::result::ZipError) -> Self {
    LoaderError::ArchiveError(err.to_string())
  }
}

impl From<ipo_core::Error> for LoaderError {
  fn from(err: ipo_core::Error) -> Self {
    match err {
      ipo_core::Error::Config(msg) => LoaderError::ConfigurationError(msg),
      other => LoaderError::InvalidData(other.to_string()),
    }
  }
}

pub type LoaderResult<T> = Result<T, LoaderError>;
