use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Polarity above which text is labelled positive (and below whose negation, negative).
pub const LABEL_THRESHOLD: f64 = 0.1;

/// Shown in place of a preview when no article body could be scraped.
pub const NO_TEXT_PLACEHOLDER: &str = "Could not extract full article text";

const MAX_TICKER_LEN: usize = 12;

/// Upper-cased exchange symbol, e.g. `AAPL` or `BRK.B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(raw: &str) -> Result<Self> {
        let symbol = raw.trim().to_ascii_uppercase();
        let valid_chars = symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));

        if symbol.is_empty() || symbol.len() > MAX_TICKER_LEN || !valid_chars {
            return Err(Error::InvalidTicker(raw.trim().to_string()));
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ticker {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub summary: Option<String>,
    /// Scraped article text. Empty when scraping failed or was skipped.
    pub body: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
}

impl Article {
    /// Title followed by the provider snippet, if any.
    pub fn headline_text(&self) -> String {
        match self.summary.as_deref().map(str::trim) {
            Some(summary) if !summary.is_empty() => format!("{} {}", self.title, summary),
            _ => self.title.clone(),
        }
    }

    /// The text the full-article score is computed from.
    pub fn scoring_text(&self) -> String {
        if self.body.trim().is_empty() {
            self.headline_text()
        } else {
            self.body.clone()
        }
    }

    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }

    pub fn with_body(&self, body: String) -> Self {
        Self {
            body,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < -LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "😊",
            SentimentLabel::Neutral => "😐",
            SentimentLabel::Negative => "😠",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub polarity: f64,
    pub subjectivity: f64,
    pub label: SentimentLabel,
}

impl SentimentResult {
    /// Clamps both scores into range and derives the label from the polarity.
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        let polarity = polarity.clamp(-1.0, 1.0);
        Self {
            polarity,
            subjectivity: subjectivity.clamp(0.0, 1.0),
            label: SentimentLabel::from_polarity(polarity),
        }
    }

    pub fn neutral() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self::neutral()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredArticle {
    pub article: Article,
    pub headline: SentimentResult,
    pub full_text: SentimentResult,
}

impl ScoredArticle {
    /// Article body cut to `max_chars` characters, suffixed with `...` when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        let body = self.article.body.trim();
        if body.is_empty() {
            return NO_TEXT_PLACEHOLDER.to_string();
        }
        match body.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &body[..idx]),
            None => body.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSentiment {
    pub mean_polarity: f64,
    pub mean_subjectivity: f64,
    pub label_counts: BTreeMap<SentimentLabel, usize>,
    pub article_count: usize,
    pub overall: SentimentLabel,
}

impl AggregateSentiment {
    pub fn empty() -> Self {
        Self {
            mean_polarity: 0.0,
            mean_subjectivity: 0.0,
            label_counts: SentimentLabel::ALL.iter().map(|l| (*l, 0)).collect(),
            article_count: 0,
            overall: SentimentLabel::Neutral,
        }
    }

    pub fn count(&self, label: SentimentLabel) -> usize {
        self.label_counts.get(&label).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: Ticker,
    pub generated_at: DateTime<Utc>,
    pub articles: Vec<ScoredArticle>,
    pub aggregate: AggregateSentiment,
    /// Score of every article's text joined together.
    pub combined: Option<SentimentResult>,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(summary: Option<&str>, body: &str) -> Article {
        Article {
            url: "https://finance.example.com/a".to_string(),
            title: "Apple beats estimates".to_string(),
            summary: summary.map(str::to_string),
            body: body.to_string(),
            published_at: Utc::now(),
            source: "Reuters".to_string(),
        }
    }

    #[test]
    fn test_ticker_parse() {
        assert_eq!(Ticker::parse(" aapl ").unwrap().as_str(), "AAPL");
        assert_eq!(Ticker::parse("brk.b").unwrap().as_str(), "BRK.B");
        assert_eq!(Ticker::parse("^GSPC").unwrap().as_str(), "^GSPC");
        assert!(Ticker::parse("").is_err());
        assert!(Ticker::parse("AA PL").is_err());
        assert!(Ticker::parse("THIS-IS-TOO-LONG").is_err());
        assert!(matches!(Ticker::parse("A/B"), Err(Error::InvalidTicker(_))));
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(SentimentLabel::from_polarity(0.11), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.5), SentimentLabel::Negative);
    }

    #[test]
    fn test_sentiment_result_clamps() {
        let result = SentimentResult::new(1.7, -0.2);
        assert_eq!(result.polarity, 1.0);
        assert_eq!(result.subjectivity, 0.0);
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(SentimentResult::default(), SentimentResult::neutral());
    }

    #[test]
    fn test_scoring_text_falls_back_to_headline() {
        let a = article(Some("Shares rise"), "");
        assert_eq!(a.headline_text(), "Apple beats estimates Shares rise");
        assert_eq!(a.scoring_text(), a.headline_text());
        assert!(!a.has_body());

        let a = a.with_body("Full story text".to_string());
        assert_eq!(a.scoring_text(), "Full story text");
        assert_eq!(article(Some("  "), "").headline_text(), "Apple beats estimates");
    }

    #[test]
    fn test_preview() {
        let scored = ScoredArticle {
            article: article(None, "héllo wörld"),
            headline: SentimentResult::neutral(),
            full_text: SentimentResult::neutral(),
        };
        assert_eq!(scored.preview(5), "héllo...");
        assert_eq!(scored.preview(50), "héllo wörld");

        let empty = ScoredArticle {
            article: article(None, ""),
            ..scored
        };
        assert_eq!(empty.preview(5), NO_TEXT_PLACEHOLDER);
    }

    #[test]
    fn test_empty_aggregate_serializes_all_labels() {
        let aggregate = AggregateSentiment::empty();
        let json = serde_json::to_value(&aggregate).unwrap();
        assert_eq!(json["label_counts"]["Positive"], 0);
        assert_eq!(json["label_counts"]["Neutral"], 0);
        assert_eq!(json["label_counts"]["Negative"], 0);
        assert_eq!(aggregate.count(SentimentLabel::Neutral), 0);
    }
}
