use std::sync::Arc;

use ns_core::{Error, Result, SentimentModel};
use tracing::info;

use crate::Config;

pub mod keyword;
pub mod lexicon;

pub use keyword::KeywordModel;
pub use lexicon::{Lexicon, LexiconEntry, LexiconModel};

pub const DEFAULT_MODEL: &str = "lexicon";

/// Words following a negator that may still be flipped by it
pub(crate) const NEGATION_WINDOW: usize = 3;

const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "without", "hardly", "barely", "cannot",
];

pub fn available_models() -> Vec<&'static str> {
    vec!["lexicon", "keyword"]
}

pub fn create_model(config: Option<Config>) -> Result<Arc<dyn SentimentModel>> {
    let config = config.unwrap_or_default();
    let name = config
        .model_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_MODEL)
        .to_lowercase();

    let model: Arc<dyn SentimentModel> = match name.as_str() {
        "lexicon" => match config.lexicon_path {
            Some(path) => {
                info!("📖 Loading lexicon from {}", path.display());
                Arc::new(LexiconModel::new(Lexicon::from_json_file(&path)?))
            }
            None => Arc::new(LexiconModel::default()),
        },
        "keyword" => Arc::new(KeywordModel::new()),
        other => {
            return Err(Error::Config(format!(
                "unknown model '{}'. Available models: {}",
                other,
                available_models().join(", ")
            )))
        }
    };
    Ok(model)
}

/// Lower-cased word tokens. Apostrophes and inner hyphens stay part of the word.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace('\u{2019}', "'")
        .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .map(|w| w.trim_matches(|c| c == '\'' || c == '-'))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}
