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

//! Workbook reader for the IPO reference table.
//!
//! The first worksheet is read and its first row supplies the column names.
//! Cells are rendered to text and deserialized through the same serde
//! mapping as the CSV export, so both formats accept the same headers.

use crate::{LoaderError, LoaderResult};
use calamine::{open_workbook_auto, Data, Reader};
use csv::StringRecord;
use ipo_models::IpoReferenceRow;
use std::path::Path;

/// Extensions read as workbooks; anything else is read as CSV
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub fn is_spreadsheet(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| SPREADSHEET_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

/// Read every data row of the first worksheet. Blank rows are skipped.
pub fn read_reference_sheet(path: &Path) -> LoaderResult<Vec<IpoReferenceRow>> {
  let mut workbook = open_workbook_auto(path)
    .map_err(|e| LoaderError::SpreadsheetError(format!("{}: {}", path.display(), e)))?;
  let range = workbook
    .worksheet_range_at(0)
    .ok_or_else(|| LoaderError::SpreadsheetError(format!("{}: workbook has no sheets", path.display())))??;

  let mut rows = range.rows();
  let headers = match rows.next() {
    Some(header) => to_record(header),
    None => return Ok(Vec::new()),
  };

  let mut out = Vec::new();
  for row in rows {
    let record = to_record(row);
    if record.iter().all(str::is_empty) {
      continue;
    }
    out.push(record.deserialize::<IpoReferenceRow>(Some(&headers))?);
  }
  Ok(out)
}

fn to_record(cells: &[Data]) -> StringRecord {
  StringRecord::from(cells.iter().map(cell_text).collect::<Vec<_>>())
}

/// Text of one cell. Date cells become `YYYY-MM-DD HH:MM:SS`.
fn cell_text(cell: &Data) -> String {
  match cell {
    Data::Empty | Data::Error(_) => String::new(),
    Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    Data::DateTime(dt) => {
      dt.as_datetime().map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string()).unwrap_or_default()
    }
    other => other.to_string(),
  }
}
