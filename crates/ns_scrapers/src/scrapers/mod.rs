pub mod html;
pub mod jsonld;
pub mod yahoo;

pub use html::{extract_article_text, HtmlArticleScraper};
pub use yahoo::YahooNewsProvider;

use ns_core::{AnalysisConfig, Error, Result};
use reqwest::Client;

/// Shared HTTP client settings for every outbound request.
pub(crate) fn build_client(config: &AnalysisConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use ns_core::{Error, Result};
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::Scraping(format!("Failed to parse URL {}: {}", url, e)))
    }

    pub fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        assert!(utils::parse_url("https://finance.yahoo.com/news/a.html").is_ok());
        assert!(matches!(utils::parse_url("invalid-url"), Err(Error::Scraping(_))));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(utils::collapse_whitespace("  a\n\n b\t c  "), "a b c");
        assert_eq!(utils::collapse_whitespace(" \n "), "");
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(&AnalysisConfig::default()).is_ok());
    }
}
