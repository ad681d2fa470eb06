//! News article models

use chrono::NaiveDate;
use ipo_core::dates::parse_date_lenient;
use ipo_core::{ScanMode, Ticker};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A single news article file from the corpus.
///
/// Only the fields the pipeline reads are typed; everything else in the file
/// is kept in `extra` so the article can be written back out in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// File the article was read from
    #[serde(skip)]
    pub source: PathBuf,

    /// Article headline
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Summary or lead paragraph, when the feed provides one
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Publication timestamp exactly as it appears in the file
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,

    /// UTC calendar date of `published`; `None` when it could not be read
    #[serde(skip)]
    pub published_date: Option<NaiveDate>,

    /// Article body used for tokenization
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    /// Parse an article from the raw file contents.
    ///
    /// The document must be a single JSON object.
    pub fn from_json(source: impl Into<PathBuf>, raw: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("article is not a JSON object"));
        }
        let mut article: Article = serde_json::from_value(value)?;
        article.source = source.into();
        article.published_date = article.published.as_deref().and_then(parse_date_lenient);
        Ok(article)
    }

    /// Case-sensitive substring search over the fields selected by `mode`.
    ///
    /// Missing fields never match.
    pub fn mentions(&self, keyword: &str, mode: ScanMode) -> bool {
        let in_title = self.title.as_deref().is_some_and(|t| t.contains(keyword));
        match mode {
            ScanMode::Title => in_title,
            ScanMode::TitleOrContent => {
                in_title || self.content.as_deref().is_some_and(|c| c.contains(keyword))
            }
        }
    }

    /// Body text, empty when the file has none
    pub fn body(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Accepts strings, numbers and null; anything else reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// All articles matched to one company, in corpus order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleTable {
    pub ticker: Ticker,
    pub articles: Vec<Article>,
}

impl ArticleTable {
    pub fn new(ticker: Ticker, articles: Vec<Article>) -> Self {
        Self { ticker, articles }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.articles.iter()
    }

    /// Body text of every row, in row order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.articles.iter().map(Article::body)
    }

    /// Keep the rows for which `keep` returns true, preserving order.
    pub fn filtered<F>(&self, mut keep: F) -> ArticleTable
    where
        F: FnMut(&Article) -> bool,
    {
        ArticleTable {
            ticker: self.ticker.clone(),
            articles: self.articles.iter().filter(|a| keep(a)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ArticleTable {
    type Item = &'a Article;
    type IntoIter = std::slice::Iter<'a, Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.iter()
    }
}
