//! # ipo-loaders
//!
//! Pipeline stages for pre-IPO news sentiment.
//!
//! This crate provides:
//! - Extraction of the zipped article corpus
//! - IPO reference table reading from workbooks or CSV
//! - Corpus scanning for articles that mention a company
//! - Per-company article aggregation with JSON dumps of the matches
//! - Pre-IPO date filtering
//! - Tokenization to per-ticker token files
//! - Dictionary sentiment scoring of the token files

pub mod archive;
pub mod article_aggregator;
pub mod corpus_scanner;
pub mod csv_processor;
pub mod date_filter;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod process_tracker;
pub mod sentiment;
pub mod spreadsheet;
pub mod tokenizer;

// Re-export commonly used types
pub use error::{LoaderError, LoaderResult};
pub use loader::{DataLoader, LoaderConfig, LoaderContext};
pub use process_tracker::{ProcessInfo, ProcessState, ProcessTracker};
pub use csv_processor::CsvProcessor;

// Re-export stages
pub use archive::{ArchiveExtractor, ExtractInput, ExtractOutput};
pub use article_aggregator::{AggregatorInput, AggregatorOutput, ArticleAggregator};
pub use corpus_scanner::{ArticleScan, CorpusScanner, ScanInput, ScanOutput};
pub use date_filter::{DateFilter, DateFilterInput, DateFilterOutput, FilterStats};
pub use pipeline::{IpoPipeline, PipelineOutput, TickerReport};
pub use sentiment::{score_tickers, LanguageModel, LexiconModel};
pub use tokenizer::{tokenize, Tokenizer, TokenizerOutput};
