use clap::{Args, Subcommand};
use ns_core::{AnalysisConfig, Article, Result, Ticker};
use ns_inference::available_models;

use crate::manager::AnalysisManager;

#[derive(Args, Clone, Debug)]
pub struct NewsArgs {
    #[command(subcommand)]
    pub command: NewsCommands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum NewsCommands {
    /// List recent headlines for a ticker without scraping or scoring
    Headlines {
        /// Stock ticker symbol (e.g. AAPL)
        ticker: String,
    },
    /// Download an article page and print the text that would be scored
    Extract {
        url: String,
    },
    /// List available sentiment models
    Models,
}

pub async fn handle_command(
    args: NewsArgs,
    manager: &AnalysisManager,
    config: &AnalysisConfig,
) -> Result<()> {
    match args.command {
        NewsCommands::Headlines { ticker } => {
            let ticker = Ticker::parse(&ticker)?;
            let config = config.clone().with_scraping(false);
            let articles = manager.fetch_news(&ticker, &config).await?;

            println!("Found {} articles for {} on {}", articles.len(), ticker, manager.provider_name());
            for article in &articles {
                println!("{}", format_headline(article));
            }
        }
        NewsCommands::Extract { url } => {
            let text = manager.extract_text(&url).await?;
            if text.is_empty() {
                println!("No article text found at {}", url);
            } else {
                println!("{}", text);
            }
        }
        NewsCommands::Models => {
            println!("Available models:");
            for name in available_models() {
                let marker = if name == manager.model().name() { " (active)" } else { "" };
                println!("  {}{}", name, marker);
            }
        }
    }
    Ok(())
}

fn format_headline(article: &Article) -> String {
    format!(
        "📰 {} - {} ({})\n   {}",
        article.title,
        article.source,
        article.published_at.format("%Y-%m-%d %H:%M"),
        article.url
    )
}
