use async_trait::async_trait;
use lazy_static::lazy_static;
use ns_core::{AnalysisConfig, ArticleScraper, Error, Result};
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};

use super::{build_client, jsonld, utils};

/// Paragraphs inside these elements are page chrome, not article text
const EXCLUDED_ANCESTORS: &[&str] = &["script", "style", "header", "footer", "nav"];

/// Paywall teaser that Yahoo injects into otherwise readable pages
const BOILERPLATE: &[&str] = &[
    "Oops, something went wrong Unlock stock picks and a broker-level newsfeed that powers Wall",
];

lazy_static! {
    static ref PARAGRAPH: Selector = Selector::parse("p").expect("static selector");
}

/// Generic article page scraper: downloads the page and keeps its paragraph text.
#[derive(Debug, Clone)]
pub struct HtmlArticleScraper {
    client: Client,
}

impl HtmlArticleScraper {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
        })
    }
}

#[async_trait]
impl ArticleScraper for HtmlArticleScraper {
    async fn fetch_article_text(&self, url: &str) -> Result<String> {
        utils::parse_url(url)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Scraping(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Scraping(format!("{} returned HTTP {}", url, status)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Error::Scraping(format!("Failed to read {}: {}", url, e)))?;

        Ok(extract_article_text(&html))
    }
}

/// Readable text of an article page, or an empty string when none is found.
pub fn extract_article_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let paragraphs = document
        .select(&PARAGRAPH)
        .filter(|p| !has_excluded_ancestor(p))
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut text = utils::collapse_whitespace(&paragraphs);
    for phrase in BOILERPLATE {
        text = text.replace(phrase, "");
    }
    let text = utils::collapse_whitespace(&text);

    if !text.is_empty() {
        return text;
    }

    jsonld::extract_article_body(&document)
        .map(|body| utils::collapse_whitespace(&body))
        .unwrap_or_default()
}

fn has_excluded_ancestor(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| EXCLUDED_ANCESTORS.contains(&ancestor.value().name()))
}
