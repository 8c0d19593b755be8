pub mod scrapers;
pub mod cli;
pub mod logging;
pub mod manager;

pub use manager::AnalysisManager;

pub use cli::{NewsArgs, NewsCommands, handle_command};
pub use logging::{init_logging, Logger};
pub use scrapers::{HtmlArticleScraper, YahooNewsProvider};

pub mod prelude {
    pub use super::manager::AnalysisManager;
    pub use ns_core::{AnalysisConfig, AnalysisReport, Article, Ticker, Result, Error};
}
