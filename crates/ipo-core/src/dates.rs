//! Permissive timestamp normalization.
//!
//! Article `published` values and IPO trade dates arrive in a mix of
//! formats. Both sides are reduced to a UTC calendar date before they are
//! compared, and anything that cannot be read becomes `None` instead of an
//! error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Offset-carrying layouts, converted to UTC before the date is taken
const OFFSET_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f%z",
  "%Y-%m-%dT%H:%M:%S%z",
  "%Y-%m-%dT%H:%M%:z",
  "%Y-%m-%dT%H:%M%z",
  "%Y-%m-%d %H:%M:%S%.f%z",
  "%Y-%m-%d %H:%M:%S%z",
  "%Y-%m-%d %H:%M%:z",
  "%Y-%m-%d %H:%M%z",
  "%Y%m%dT%H%M%S%z",
  "%Y%m%dT%H%M%z",
];

/// Suffixes naming UTC itself; stripped before the naive layouts are tried
const UTC_DESIGNATORS: &[&str] = &["Z", "z", " UTC", " GMT", "UTC", "GMT"];

/// Layouts without an offset, read as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%dT%H:%M:%S",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S",
  "%Y-%m-%d %H:%M",
  "%Y%m%dT%H%M%S",
  "%Y%m%dT%H%M",
  "%m/%d/%Y %H:%M:%S",
  "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];

/// Parse a timestamp and reduce it to its UTC calendar date.
///
/// Returns `None` for empty or unreadable input.
pub fn parse_date_lenient(value: &str) -> Option<NaiveDate> {
  let value = value.trim();
  if value.is_empty() {
    return None;
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
    return Some(dt.with_timezone(&Utc).date_naive());
  }
  for format in OFFSET_FORMATS {
    if let Ok(dt) = DateTime::parse_from_str(value, format) {
      return Some(dt.with_timezone(&Utc).date_naive());
    }
  }
  if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
    return Some(dt.with_timezone(&Utc).date_naive());
  }

  let value = strip_utc_designator(value);
  for format in NAIVE_DATETIME_FORMATS {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
      return Some(dt.date());
    }
  }
  for format in DATE_FORMATS {
    if let Ok(date) = NaiveDate::parse_from_str(value, format) {
      return Some(date);
    }
  }
  None
}

fn strip_utc_designator(value: &str) -> &str {
  UTC_DESIGNATORS
    .iter()
    .find_map(|suffix| value.strip_suffix(suffix))
    .map(str::trim_end)
    .unwrap_or(value)
}

/// True only when both dates are known and `published` is strictly
/// earlier than `cutoff`.
pub fn is_strictly_before(published: Option<NaiveDate>, cutoff: Option<NaiveDate>) -> bool {
  matches!((published, cutoff), (Some(p), Some(c)) if p < c)
}
