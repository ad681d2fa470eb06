//! Sentiment score models

use serde::{Deserialize, Serialize};

/// Dictionary sentiment of one bag of words
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Number of positive dictionary hits
    pub positive: f64,

    /// Number of negative dictionary hits
    pub negative: f64,

    /// (positive - negative) / (positive + negative), in [-1, 1]
    pub polarity: f64,

    /// Share of words that carry sentiment, in [0, 1]
    pub subjectivity: f64,
}

impl SentimentScore {
    pub fn is_bullish(&self) -> bool {
        self.polarity > 0.0
    }

    pub fn is_bearish(&self) -> bool {
        self.polarity < 0.0
    }
}

/// One row of the sentiment score table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScoreRow {
    pub ticker: String,
    #[serde(rename = "Positive")]
    pub positive: f64,
    #[serde(rename = "Negative")]
    pub negative: f64,
    #[serde(rename = "Polarity")]
    pub polarity: f64,
    #[serde(rename = "Subjectivity")]
    pub subjectivity: f64,
}

impl SentimentScoreRow {
    pub fn new(ticker: impl Into<String>, score: SentimentScore) -> Self {
        Self {
            ticker: ticker.into(),
            positive: score.positive,
            negative: score.negative,
            polarity: score.polarity,
            subjectivity: score.subjectivity,
        }
    }

    pub fn score(&self) -> SentimentScore {
        SentimentScore {
            positive: self.positive,
            negative: self.negative,
            polarity: self.polarity,
            subjectivity: self.subjectivity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_direction() {
        let score = SentimentScore { positive: 3.0, negative: 1.0, polarity: 0.5, subjectivity: 0.2 };
        assert!(score.is_bullish());
        assert!(!score.is_bearish());
        assert!(!SentimentScore::default().is_bullish());
        assert!(!SentimentScore::default().is_bearish());
    }

    #[test]
    fn test_row_uses_table_headers() {
        let row = SentimentScoreRow::new("DBX", SentimentScore { positive: 2.0, ..Default::default() });
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&row).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(out.starts_with("ticker,Positive,Negative,Polarity,Subjectivity\n"));
        assert_eq!(row.score().positive, 2.0);
    }
}
