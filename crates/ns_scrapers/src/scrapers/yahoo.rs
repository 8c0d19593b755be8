use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ns_core::{AnalysisConfig, Article, Error, NewsProvider, Result, Ticker};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::build_client;

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<QuoteResult>,
    #[serde(default)]
    news: Vec<NewsResult>,
}

#[derive(Debug, Deserialize)]
struct QuoteResult {
    #[serde(default)]
    symbol: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsResult {
    #[serde(default)]
    title: String,
    publisher: Option<String>,
    link: Option<String>,
    provider_publish_time: Option<i64>,
    summary: Option<String>,
}

/// News search against the Yahoo Finance public search endpoint.
#[derive(Debug, Clone)]
pub struct YahooNewsProvider {
    client: Client,
    base_url: String,
}

impl YahooNewsProvider {
    const BASE_URL: &'static str = "https://query2.finance.yahoo.com";

    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        Self::with_base_url(config, Self::BASE_URL)
    }

    pub fn with_base_url(config: &AnalysisConfig, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl NewsProvider for YahooNewsProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn fetch_news(&self, ticker: &Ticker, limit: usize) -> Result<Vec<Article>> {
        let url = format!("{}/v1/finance/search", self.base_url);
        let news_count = limit.to_string();
        debug!("Searching {} for {} news", url, ticker);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", ticker.as_str()),
                ("quotesCount", "1"),
                ("newsCount", news_count.as_str()),
                ("enableFuzzyQuery", "false"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(ticker.to_string()));
        }
        if !status.is_success() {
            return Err(Error::Network(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            )));
        }

        let body = response.text().await?;
        parse_search_response(ticker, &body, limit)
    }
}

fn parse_search_response(ticker: &Ticker, body: &str, limit: usize) -> Result<Vec<Article>> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| Error::Network(format!("Unexpected search response: {}", e)))?;

    // A returned quote must be the ticker itself, otherwise the news belongs
    // to whatever symbol the search resolved to. No quote at all is accepted
    // as long as there is news.
    let known_symbol = response.quotes.iter().any(|q| same_symbol(&q.symbol, ticker));
    let other_symbol = !response.quotes.is_empty() && !known_symbol;
    if other_symbol || (response.news.is_empty() && !known_symbol) {
        return Err(Error::NotFound(ticker.to_string()));
    }

    Ok(response
        .news
        .into_iter()
        .filter(|n| !n.title.trim().is_empty())
        .take(limit)
        .map(|n| Article {
            url: n.link.unwrap_or_default(),
            title: n.title.trim().to_string(),
            summary: n.summary.filter(|s| !s.trim().is_empty()),
            body: String::new(),
            published_at: n
                .provider_publish_time
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .unwrap_or_else(Utc::now),
            source: n
                .publisher
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect())
}

/// Yahoo writes share classes with a dash (`BRK-B`), users often type a dot.
fn same_symbol(symbol: &str, ticker: &Ticker) -> bool {
    symbol.replace('.', "-").eq_ignore_ascii_case(&ticker.as_str().replace('.', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::test_server;

    const AAPL_RESPONSE: &str = r#"{
        "quotes": [{"symbol": "AAPL", "shortname": "Apple Inc.", "quoteType": "EQUITY"}],
        "news": [
            {"uuid": "1", "title": "Apple unveils new iPhone", "publisher": "Reuters",
             "link": "https://finance.yahoo.com/news/apple-unveils", "providerPublishTime": 1700000000, "type": "STORY"},
            {"uuid": "2", "title": "  ", "publisher": "Spam"},
            {"uuid": "3", "title": "Apple faces terrible quarter", "link": "https://finance.yahoo.com/news/apple-quarter",
             "summary": "Sales slump in China"},
            {"uuid": "4", "title": "Apple shares steady", "publisher": "Bloomberg"}
        ]
    }"#;

    fn aapl() -> Ticker {
        Ticker::parse("AAPL").unwrap()
    }

    #[test]
    fn test_parse_search_response() {
        let articles = parse_search_response(&aapl(), AAPL_RESPONSE, 2).unwrap();
        assert_eq!(articles.len(), 2);

        assert_eq!(articles[0].title, "Apple unveils new iPhone");
        assert_eq!(articles[0].source, "Reuters");
        assert_eq!(articles[0].published_at.timestamp(), 1_700_000_000);
        assert!(articles[0].body.is_empty());

        assert_eq!(articles[1].source, "Unknown");
        assert_eq!(articles[1].summary.as_deref(), Some("Sales slump in China"));
        assert_eq!(articles[1].url, "https://finance.yahoo.com/news/apple-quarter");
    }

    #[test]
    fn test_known_ticker_without_news_is_empty() {
        let body = r#"{"quotes": [{"symbol": "aapl"}], "news": []}"#;
        assert!(parse_search_response(&aapl(), body, 3).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_ticker_is_not_found() {
        let body = r#"{"quotes": [], "news": []}"#;
        let ticker = Ticker::parse("ZZZZZZ").unwrap();
        assert!(matches!(
            parse_search_response(&ticker, body, 3),
            Err(Error::NotFound(t)) if t == "ZZZZZZ"
        ));
    }

    #[test]
    fn test_news_for_another_symbol_is_not_found() {
        let body = r#"{
            "quotes": [{"symbol": "AAPL"}],
            "news": [{"title": "Apple unveils new iPhone", "publisher": "Reuters"}]
        }"#;
        let ticker = Ticker::parse("AAPLX").unwrap();
        assert!(matches!(
            parse_search_response(&ticker, body, 3),
            Err(Error::NotFound(t)) if t == "AAPLX"
        ));
    }

    #[test]
    fn test_news_without_quotes_is_accepted() {
        let body = r#"{"quotes": [], "news": [{"title": "Index futures rise"}]}"#;
        let ticker = Ticker::parse("^GSPC").unwrap();
        assert_eq!(parse_search_response(&ticker, body, 3).unwrap().len(), 1);
    }

    #[test]
    fn test_share_class_symbols_match() {
        let body = r#"{"quotes": [{"symbol": "BRK-B"}], "news": [{"title": "Berkshire buys back shares"}]}"#;
        let ticker = Ticker::parse("brk.b").unwrap();
        assert_eq!(parse_search_response(&ticker, body, 3).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_payload_is_network_error() {
        assert!(matches!(
            parse_search_response(&aapl(), "<html>rate limited</html>", 3),
            Err(Error::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_news_over_http() {
        let base = test_server::serve(200, "application/json", AAPL_RESPONSE.to_string()).await;
        let provider = YahooNewsProvider::with_base_url(&AnalysisConfig::default(), base).unwrap();

        let articles = provider.fetch_news(&aapl(), 5).await.unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(provider.name(), "Yahoo Finance");
    }

    #[tokio::test]
    async fn test_fetch_news_http_errors() {
        let base = test_server::serve(404, "application/json", "{}".to_string()).await;
        let provider = YahooNewsProvider::with_base_url(&AnalysisConfig::default(), base).unwrap();
        assert!(matches!(provider.fetch_news(&aapl(), 3).await, Err(Error::NotFound(_))));

        let base = test_server::serve(500, "text/plain", "boom".to_string()).await;
        let provider = YahooNewsProvider::with_base_url(&AnalysisConfig::default(), base).unwrap();
        let err = provider.fetch_news(&aapl(), 3).await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_network_error() {
        let provider =
            YahooNewsProvider::with_base_url(&AnalysisConfig::default(), "http://127.0.0.1:1").unwrap();
        assert!(matches!(provider.fetch_news(&aapl(), 3).await, Err(Error::Network(_))));
    }
}
