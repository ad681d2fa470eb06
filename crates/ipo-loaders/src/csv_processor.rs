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

//! CSV file processor for the pipeline's tabular artifacts
//!
//! Handles:
//! - The IPO reference table (input)
//! - The IPO info table (ticker, company_name, ipo_date, returns)
//! - Per-ticker token files (one word per record, no header)
//! - The sentiment score table

use crate::spreadsheet;
use crate::{LoaderError, LoaderResult};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use ipo_core::Ticker;
use ipo_models::{CompanyRecord, IpoReferenceRow, SentimentScoreRow};
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvProcessor;

impl CsvProcessor {
  pub fn new() -> Self {
    Self
  }

  /// Parse every row of the IPO reference table.
  ///
  /// Workbooks (`.xlsx` and friends) are read from their first sheet;
  /// any other file is read as CSV.
  pub fn parse_reference_table<P: AsRef<Path>>(&self, path: P) -> LoaderResult<Vec<IpoReferenceRow>> {
    if spreadsheet::is_spreadsheet(path.as_ref()) {
      let rows = spreadsheet::read_reference_sheet(path.as_ref())?;
      info!("Read {} rows from IPO reference workbook", rows.len());
      return Ok(rows);
    }

    let file = File::open(path.as_ref()).map_err(|e| {
      LoaderError::IoError(format!("{}: {}", path.as_ref().display(), e))
    })?;
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
      let row: IpoReferenceRow = result?;
      rows.push(row);
    }

    info!("Read {} rows from IPO reference table", rows.len());
    Ok(rows)
  }

  /// Look up the requested tickers in the reference table.
  ///
  /// Records come back in `tickers` order. A ticker without a row is a
  /// configuration error and fails the whole lookup.
  pub fn company_records<P: AsRef<Path>>(
    &self,
    path: P,
    tickers: &[Ticker],
  ) -> LoaderResult<Vec<CompanyRecord>> {
    let rows = self.parse_reference_table(path)?;
    Self::select_companies(rows, tickers)
  }

  pub fn select_companies(
    rows: Vec<IpoReferenceRow>,
    tickers: &[Ticker],
  ) -> LoaderResult<Vec<CompanyRecord>> {
    let mut by_ticker: HashMap<Ticker, CompanyRecord> = HashMap::new();
    for row in rows {
      let symbol = row.ticker.clone();
      match row.into_company() {
        // first row wins when a symbol is listed twice
        Ok(company) => {
          by_ticker.entry(company.ticker.clone()).or_insert(company);
        }
        Err(e) => debug!("Skipping reference row {:?}: {}", symbol, e),
      }
    }

    tickers
      .iter()
      .map(|ticker| by_ticker.remove(ticker).ok_or_else(|| LoaderError::MissingTicker(ticker.clone())))
      .collect()
  }

  /// Write the IPO info table consumed by the regression step
  pub fn write_ipo_info<P: AsRef<Path>>(&self, path: P, companies: &[CompanyRecord]) -> LoaderResult<()> {
    let mut writer = WriterBuilder::new().from_writer(create_file(path.as_ref())?);
    for company in companies {
      writer.serialize(company.to_info_row())?;
    }
    writer.flush()?;
    Ok(())
  }

  /// Write one token per record, no header. Existing files are replaced.
  pub fn write_tokens<P: AsRef<Path>>(&self, path: P, tokens: &[String]) -> LoaderResult<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(create_file(path.as_ref())?);
    for token in tokens {
      writer.write_record([token])?;
    }
    writer.flush()?;
    Ok(())
  }

  pub fn read_tokens<P: AsRef<Path>>(&self, path: P) -> LoaderResult<Vec<String>> {
    let file = File::open(path.as_ref()).map_err(|e| {
      LoaderError::IoError(format!("{}: {}", path.as_ref().display(), e))
    })?;
    let mut reader = ReaderBuilder::new().has_headers(false).flexible(true).from_reader(file);

    let mut tokens = Vec::new();
    for result in reader.records() {
      let record = result?;
      if let Some(token) = record.get(0).filter(|t| !t.is_empty()) {
        tokens.push(token.to_string());
      }
    }
    Ok(tokens)
  }

  /// Write the sentiment score table
  pub fn write_scores<P: AsRef<Path>>(&self, path: P, rows: &[SentimentScoreRow]) -> LoaderResult<()> {
    let mut writer = WriterBuilder::new().from_writer(create_file(path.as_ref())?);
    for row in rows {
      writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
  }
}

fn create_file(path: &Path) -> LoaderResult<File> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }
  Ok(File::create(path)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;
  use ipo_core::test_utils::write_fixture;
  use ipo_models::SentimentScore;
  use pretty_assertions::assert_eq;
  use tempfile::TempDir;

  const REFERENCE: &str = "\
trade_date,company,ticker,offr_price,open_price,1st_day_close,open_prc_pct_rtrn
2018-03-23 00:00:00,Dropbox,DBX,21,29,28.48,0.381
2018-04-03,Spotify,SPOT,,165.9,149.01,
2018-05-10,AXA Equitable,EQH,20,20.5,20.5,0.025
";

  fn tickers(symbols: &[&str]) -> Vec<Ticker> {
    symbols.iter().map(|s| Ticker::new(s).unwrap()).collect()
  }

  #[test]
  fn test_company_records_in_requested_order() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "ipo_df.csv", REFERENCE);

    let companies = CsvProcessor::new().company_records(&path, &tickers(&["EQH", "dbx"])).unwrap();
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[0].company_name, "AXA Equitable");
    assert_eq!(companies[1].ticker.as_str(), "DBX");
    assert_eq!(companies[1].ipo_date, NaiveDate::from_ymd_opt(2018, 3, 23));
    assert_eq!(companies[1].first_day_return, Some(0.381));
  }

  #[test]
  fn test_missing_ticker_fails_loudly() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "ipo_df.csv", REFERENCE);

    let err = CsvProcessor::new().company_records(&path, &tickers(&["DBX", "WHD"])).unwrap_err();
    assert!(matches!(err, LoaderError::MissingTicker(ref t) if t.as_str() == "WHD"));
  }

  #[test]
  fn test_company_records_from_workbook() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ipo_df.xlsx");
    crate::spreadsheet::tests::reference_workbook(&path);

    let companies = CsvProcessor::new().company_records(&path, &tickers(&["SPOT", "DBX"])).unwrap();
    assert_eq!(companies[0].company_name, "Spotify");
    assert_eq!(companies[0].ipo_date, NaiveDate::from_ymd_opt(2018, 4, 3));
    assert_eq!(companies[1].ipo_date, NaiveDate::from_ymd_opt(2018, 3, 23));

    let err = CsvProcessor::new().company_records(&path, &tickers(&["EQH"])).unwrap_err();
    assert!(matches!(err, LoaderError::MissingTicker(_)));
  }

  #[test]
  fn test_missing_reference_file_is_io_error() {
    let err = CsvProcessor::new().parse_reference_table("/nonexistent/ipo_df.csv").unwrap_err();
    assert!(matches!(err, LoaderError::IoError(_)));
  }

  #[test]
  fn test_write_ipo_info() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested").join("ipo_info.csv");
    let companies = vec![
      CompanyRecord::new(Ticker::new("DBX").unwrap(), "Dropbox", NaiveDate::from_ymd_opt(2018, 3, 23), Some(0.38)),
      CompanyRecord::new(Ticker::new("SPOT").unwrap(), "Spotify", None, None),
    ];
    CsvProcessor::new().write_ipo_info(&out, &companies).unwrap();
    assert_eq!(
      fs::read_to_string(&out).unwrap(),
      "ticker,company_name,ipo_date,returns\nDBX,Dropbox,2018-03-23,0.38\nSPOT,Spotify,,\n"
    );
  }

  #[test]
  fn test_tokens_written_one_per_line_without_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tokenized_texts").join("ACME.csv");
    let tokens: Vec<String> = ["Acme", "IPO-backed", "growth"].iter().map(|s| s.to_string()).collect();

    let processor = CsvProcessor::new();
    processor.write_tokens(&path, &tokens).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Acme\nIPO-backed\ngrowth\n");
    assert_eq!(processor.read_tokens(&path).unwrap(), tokens);

    // rewriting replaces the previous contents
    processor.write_tokens(&path, &tokens[..1]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Acme\n");
  }

  #[test]
  fn test_empty_token_list_writes_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("EMPTY.csv");
    let processor = CsvProcessor::new();
    processor.write_tokens(&path, &[]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    assert!(processor.read_tokens(&path).unwrap().is_empty());
  }

  #[test]
  fn test_write_scores() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sentiment_scores.csv");
    let rows = vec![SentimentScoreRow::new(
      "DBX",
      SentimentScore { positive: 2.0, negative: 1.0, polarity: 0.25, subjectivity: 0.5 },
    )];
    CsvProcessor::new().write_scores(&path, &rows).unwrap();
    assert_eq!(
      fs::read_to_string(&path).unwrap(),
      "ticker,Positive,Negative,Polarity,Subjectivity\nDBX,2.0,1.0,0.25,0.5\n"
    );
  }
}
