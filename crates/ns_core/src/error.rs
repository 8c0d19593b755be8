use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    #[error("No results for ticker: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl Error {
    /// Whether the same request may succeed if issued again later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// Message shown to the person running a query.
    pub fn user_message(&self) -> String {
        let message = match self {
            Error::NotFound(ticker) => format!(
                "No news articles found for {}. Please check the ticker symbol and try again.",
                ticker
            ),
            Error::Network(e) => format!("Could not reach the news provider ({}).", e),
            Error::InvalidTicker(ticker) => format!(
                "'{}' is not a valid ticker symbol (e.g. AAPL, MSFT, GOOGL).",
                ticker
            ),
            Error::Inference(e) => format!("Sentiment model failed: {}", e),
            other => format!("Analysis failed: {}", other),
        };
        if self.is_retryable() {
            format!("{} Please try again in a moment.", message)
        } else {
            message
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_errors_are_retryable() {
        assert!(Error::Network("timeout".to_string()).is_retryable());
        assert!(!Error::NotFound("ZZZZ".to_string()).is_retryable());
        assert!(!Error::Scraping("404".to_string()).is_retryable());
    }

    #[test]
    fn test_user_message() {
        let msg = Error::NotFound("ZZZZ".to_string()).user_message();
        assert!(msg.starts_with("No news articles found for ZZZZ"));

        let msg = Error::Network("connection refused".to_string()).user_message();
        assert!(msg.contains("try again"));

        assert_eq!(
            msg,
            "Could not reach the news provider (connection refused). Please try again in a moment."
        );

        let msg = Error::Config("bad model".to_string()).user_message();
        assert_eq!(msg, "Analysis failed: Configuration error: bad model");

        let msg = Error::Inference("lexicon contains no words".to_string()).user_message();
        assert_eq!(msg, "Sentiment model failed: lexicon contains no words");
        assert!(!msg.contains("try again"));
    }
}
