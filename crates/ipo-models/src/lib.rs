//! # ipo-models
//!
//! Data models for the pre-IPO news sentiment pipeline:
//! - News articles as read from the unzipped corpus
//! - Per-ticker article tables
//! - IPO reference rows and the derived company records
//! - Sentiment scores and the score table rows

pub mod article;
pub mod company;
pub mod sentiment;

pub use article::{Article, ArticleTable};
pub use company::{CompanyRecord, IpoInfoRow, IpoReferenceRow};
pub use sentiment::{SentimentScore, SentimentScoreRow};
