use std::path::PathBuf;

pub mod aggregate;
pub mod models;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// `lexicon` (default) or `keyword`
    pub model_name: Option<String>,
    /// JSON lexicon replacing the built-in word list
    pub lexicon_path: Option<PathBuf>,
}

pub mod prelude {
    pub use super::Config;
    pub use super::aggregate::{aggregate, combined_sentiment};
    pub use super::models::create_model;
    pub use ns_core::{Result, Error, SentimentModel, SentimentResult, SentimentLabel};
}

pub use aggregate::{aggregate, combined_sentiment};
pub use models::{create_model, available_models};
