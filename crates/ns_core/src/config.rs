use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::{Error, Result};

pub const MIN_ARTICLES: usize = 1;
pub const MAX_ARTICLES: usize = 10;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Settings for a single analysis request. Built once, then only read.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub num_articles: usize,
    pub scrape_full_text: bool,
    /// Pause between consecutive article page downloads
    pub scrape_delay: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub preview_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            num_articles: 3,
            scrape_full_text: true,
            scrape_delay: Duration::from_millis(500),
            request_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            preview_chars: 500,
        }
    }
}

impl AnalysisConfig {
    /// Defaults overridden by `NS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(n) = parse_var::<usize>(&lookup, "NS_NUM_ARTICLES")? {
            config.num_articles = n;
        }
        if let Some(scrape) = parse_var::<bool>(&lookup, "NS_SCRAPE")? {
            config.scrape_full_text = scrape;
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "NS_SCRAPE_DELAY_MS")? {
            config.scrape_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "NS_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = lookup("NS_USER_AGENT").filter(|a| !a.trim().is_empty()) {
            config.user_agent = agent;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_num_articles(mut self, num_articles: usize) -> Result<Self> {
        self.num_articles = num_articles;
        self.validate()?;
        Ok(self)
    }

    pub fn with_scraping(mut self, enabled: bool) -> Self {
        self.scrape_full_text = enabled;
        self
    }

    pub fn with_scrape_delay(mut self, delay: Duration) -> Self {
        self.scrape_delay = delay;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.request_timeout = timeout;
        self.validate()?;
        Ok(self)
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_ARTICLES..=MAX_ARTICLES).contains(&self.num_articles) {
            return Err(Error::Config(format!(
                "number of articles must be between {} and {}, got {}",
                MIN_ARTICLES, MAX_ARTICLES, self.num_articles
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::Config("request timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("invalid value for {}: {:?}", key, raw))),
        None => Ok(None),
    }
}
