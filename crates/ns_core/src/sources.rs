use async_trait::async_trait;
use crate::types::{Article, Ticker};
use crate::Result;

#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Name of the market-data service
    fn name(&self) -> &str;

    /// Fetch at most `limit` recent articles for a ticker. Bodies are left empty.
    async fn fetch_news(&self, ticker: &Ticker, limit: usize) -> Result<Vec<Article>>;
}

#[async_trait]
pub trait ArticleScraper: Send + Sync {
    /// Returns true if this scraper can handle the given URL
    fn can_handle(&self, url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }

    /// Download an article page and return its readable text
    async fn fetch_article_text(&self, url: &str) -> Result<String>;
}
