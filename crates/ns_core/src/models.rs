use crate::types::SentimentResult;

pub trait SentimentModel: Send + Sync {
    /// Short name used to select the model from configuration
    fn name(&self) -> &str;

    /// Score a piece of text. Must be deterministic and free of side effects.
    fn score_text(&self, text: &str) -> SentimentResult;
}
