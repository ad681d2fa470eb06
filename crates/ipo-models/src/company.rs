//! IPO reference table models

use chrono::NaiveDate;
use ipo_core::dates::parse_date_lenient;
use ipo_core::Ticker;
use serde::{Deserialize, Serialize};

/// One row of the IPO reference table.
///
/// Column names follow the cleaned spreadsheet export; the raw export's
/// `symbol`/`issuer` headers are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IpoReferenceRow {
    /// Listing date
    pub trade_date: String,

    /// Company name as used in news headlines
    #[serde(alias = "issuer")]
    pub company: String,

    #[serde(alias = "symbol")]
    pub ticker: String,

    /// Offer price
    #[serde(default)]
    pub offr_price: Option<f64>,

    /// First-day opening price
    #[serde(default)]
    pub open_price: Option<f64>,

    /// First-day closing price
    #[serde(default, rename = "1st_day_close")]
    pub first_day_close: Option<f64>,

    /// First-day return, open vs. offer
    #[serde(default)]
    pub open_prc_pct_rtrn: Option<f64>,
}

impl IpoReferenceRow {
    pub fn into_company(self) -> ipo_core::Result<CompanyRecord> {
        Ok(CompanyRecord {
            ticker: Ticker::new(&self.ticker)?,
            company_name: self.company.trim().to_string(),
            ipo_date: parse_date_lenient(&self.trade_date),
            first_day_return: self.open_prc_pct_rtrn,
        })
    }
}

/// A company under analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub ticker: Ticker,

    /// Keyword searched for in article titles/content
    pub company_name: String,

    /// UTC calendar date of the listing; `None` when the reference value
    /// could not be read, in which case no article qualifies as pre-IPO
    pub ipo_date: Option<NaiveDate>,

    pub first_day_return: Option<f64>,
}

impl CompanyRecord {
    pub fn new(
        ticker: Ticker,
        company_name: impl Into<String>,
        ipo_date: Option<NaiveDate>,
        first_day_return: Option<f64>,
    ) -> Self {
        Self { ticker, company_name: company_name.into(), ipo_date, first_day_return }
    }

    pub fn to_info_row(&self) -> IpoInfoRow {
        IpoInfoRow {
            ticker: self.ticker.to_string(),
            company_name: self.company_name.clone(),
            ipo_date: self.ipo_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            returns: self.first_day_return,
        }
    }
}

/// Row of the IPO info table consumed by the regression step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpoInfoRow {
    pub ticker: String,
    pub company_name: String,
    pub ipo_date: String,
    pub returns: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reference_rows_from_csv_with_aliases() {
        let data = "\
trade_date,issuer,symbol,offr_price,open_price,1st_day_close,open_prc_pct_rtrn
2018-03-23,Dropbox,DBX,21.0,29.0,28.48,0.38
4/3/2018,Spotify,spot,,,,
";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<IpoReferenceRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].first_day_close, Some(28.48));

        let dbx = rows[0].clone().into_company().unwrap();
        assert_eq!(dbx.ticker.as_str(), "DBX");
        assert_eq!(dbx.company_name, "Dropbox");
        assert_eq!(dbx.ipo_date, NaiveDate::from_ymd_opt(2018, 3, 23));
        assert_eq!(dbx.first_day_return, Some(0.38));

        let spot = rows[1].clone().into_company().unwrap();
        assert_eq!(spot.ticker.as_str(), "SPOT");
        assert_eq!(spot.ipo_date, NaiveDate::from_ymd_opt(2018, 4, 3));
        assert_eq!(spot.first_day_return, None);
    }

    #[test]
    fn test_unreadable_trade_date_becomes_none() {
        let row = IpoReferenceRow {
            trade_date: "n/a".to_string(),
            company: "Acme".to_string(),
            ticker: "ACME".to_string(),
            offr_price: None,
            open_price: None,
            first_day_close: None,
            open_prc_pct_rtrn: Some(0.1),
        };
        assert_eq!(row.into_company().unwrap().ipo_date, None);
    }

    #[test]
    fn test_info_row() {
        let company = CompanyRecord::new(
            Ticker::new("EQH").unwrap(),
            "AXA Equitable",
            NaiveDate::from_ymd_opt(2018, 5, 10),
            Some(-0.02),
        );
        assert_eq!(
            company.to_info_row(),
            IpoInfoRow {
                ticker: "EQH".to_string(),
                company_name: "AXA Equitable".to_string(),
                ipo_date: "2018-05-10".to_string(),
                returns: Some(-0.02),
            }
        );
    }
}
