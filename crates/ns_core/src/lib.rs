pub mod config;
pub mod error;
pub mod models;
pub mod sources;
pub mod types;

pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use models::SentimentModel;
pub use sources::{ArticleScraper, NewsProvider};
pub use types::{
    AggregateSentiment, AnalysisReport, Article, ScoredArticle, SentimentLabel, SentimentResult,
    Ticker,
};
