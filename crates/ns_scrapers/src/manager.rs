use std::sync::Arc;

use chrono::Utc;
use ns_core::{
    AnalysisConfig, AnalysisReport, Article, ArticleScraper, NewsProvider, Result, ScoredArticle,
    SentimentModel, Ticker,
};
use ns_inference::{aggregate, combined_sentiment};
use tokio::time::sleep;

use crate::logging::Logger;

/// Runs the fetch, score and aggregate steps for one ticker query.
pub struct AnalysisManager {
    provider: Arc<dyn NewsProvider>,
    scraper: Arc<dyn ArticleScraper>,
    model: Arc<dyn SentimentModel>,
}

impl AnalysisManager {
    pub fn new(
        provider: Arc<dyn NewsProvider>,
        scraper: Arc<dyn ArticleScraper>,
        model: Arc<dyn SentimentModel>,
    ) -> Self {
        Self {
            provider,
            scraper,
            model,
        }
    }

    pub fn model(&self) -> &Arc<dyn SentimentModel> {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Recent articles for `ticker`, with bodies scraped when the config asks for it.
    /// A failed scrape leaves that article's body empty and never fails the call.
    pub async fn fetch_news(&self, ticker: &Ticker, config: &AnalysisConfig) -> Result<Vec<Article>> {
        config.validate()?;
        let logger = Logger::new().with_prefix(format!("[{}]", ticker));

        logger.info(&format!(
            "📰 Fetching up to {} articles from {}",
            config.num_articles,
            self.provider.name()
        ));
        let mut articles = match self.provider.fetch_news(ticker, config.num_articles).await {
            Ok(articles) => articles,
            Err(e) => {
                logger.error(&format!("Failed to fetch news: {}", e));
                return Err(e);
            }
        };
        articles.truncate(config.num_articles);
        logger.info(&format!("✨ Found {} articles", articles.len()));

        if !config.scrape_full_text {
            return Ok(articles);
        }

        let total = articles.len();
        let mut fetched = Vec::with_capacity(total);
        let mut scraped_any = false;
        for (i, article) in articles.into_iter().enumerate() {
            let logger = logger.clone().with_prefix(format!("[{}/{}]", i + 1, total));
            let body = self
                .scrape_body(&article, config, &mut scraped_any, &logger)
                .await;
            fetched.push(article.with_body(body));
        }

        Ok(fetched)
    }

    /// Pages are requested one at a time, `scrape_delay` apart. Articles
    /// without a usable link never hit the network and never wait.
    async fn scrape_body(
        &self,
        article: &Article,
        config: &AnalysisConfig,
        scraped_any: &mut bool,
        logger: &Logger,
    ) -> String {
        if article.url.is_empty() || !self.scraper.can_handle(&article.url) {
            logger.debug("No scrapable link, using headline");
            return String::new();
        }

        if *scraped_any && !config.scrape_delay.is_zero() {
            sleep(config.scrape_delay).await;
        }
        *scraped_any = true;

        logger.info(&format!("🦗 Extracting text from {}", article.url));
        match self.scraper.fetch_article_text(&article.url).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                logger.warn("⚠️ Page had no article text, using headline");
                String::new()
            }
            Err(e) => {
                logger.warn(&format!("⚠️ Could not extract text from {}: {}", article.url, e));
                String::new()
            }
        }
    }

    /// Text of a single article page. Errors are returned, not swallowed.
    pub async fn extract_text(&self, url: &str) -> Result<String> {
        self.scraper.fetch_article_text(url).await
    }

    pub fn score_article(&self, article: Article) -> ScoredArticle {
        let headline = self.model.score_text(&article.headline_text());
        let full_text = if article.has_body() {
            self.model.score_text(&article.body)
        } else {
            headline
        };
        ScoredArticle {
            article,
            headline,
            full_text,
        }
    }

    pub async fn analyze(&self, raw_ticker: &str, config: &AnalysisConfig) -> Result<AnalysisReport> {
        let ticker = Ticker::parse(raw_ticker)?;
        let articles = self.fetch_news(&ticker, config).await?;

        let logger = Logger::new().with_prefix(format!("[{}]", ticker));
        logger.info(&format!("🧠 Scoring {} articles with {}", articles.len(), self.model.name()));

        let scored: Vec<ScoredArticle> = articles
            .into_iter()
            .map(|article| self.score_article(article))
            .collect();

        let results: Vec<_> = scored.iter().map(|s| s.full_text).collect();
        let texts: Vec<String> = scored.iter().map(|s| s.article.scoring_text()).collect();

        let report = AnalysisReport {
            aggregate: aggregate(&results),
            combined: combined_sentiment(self.model.as_ref(), &texts),
            ticker,
            generated_at: Utc::now(),
            articles: scored,
        };
        logger.info(&format!(
            "✅ Overall sentiment {} (mean polarity {:.2})",
            report.aggregate.overall, report.aggregate.mean_polarity
        ));

        Ok(report)
    }
}
