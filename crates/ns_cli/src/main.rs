use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ns_core::{AnalysisConfig, SentimentModel};
use ns_scrapers::{handle_command, init_logging, AnalysisManager, HtmlArticleScraper, NewsArgs, YahooNewsProvider};
use tracing::{info, Level};

mod report;

#[derive(Parser, Debug)]
#[command(name = "ns", author, version, about = "Sentiment analysis of recent stock news", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, default_value = "lexicon", help = "Sentiment model to use. Available models: lexicon (default), keyword")]
    model: String,
    /// JSON lexicon file replacing the built-in word list
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,
    /// HTTP timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
    /// Pause between article downloads, in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,
    #[arg(long, global = true)]
    user_agent: Option<String>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch, score and summarise recent news for a ticker
    Analyze {
        /// Stock ticker symbol (e.g. AAPL, MSFT, GOOGL)
        ticker: String,
        /// Number of news articles to analyze (1-10)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u8).range(1..=10))]
        articles: Option<u8>,
        /// Score headlines only, without downloading article pages
        #[arg(long)]
        no_scrape: bool,
        #[arg(long)]
        json: bool,
    },
    /// Score a piece of text
    Score {
        #[arg(required = true)]
        text: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Inspect the news provider and article scraper
    News(NewsArgs),
}

fn build_config(cli: &Cli) -> anyhow::Result<AnalysisConfig> {
    let mut config = AnalysisConfig::from_env()?;
    if let Some(secs) = cli.timeout {
        config = config.with_request_timeout(Duration::from_secs(secs))?;
    }
    if let Some(ms) = cli.delay_ms {
        config = config.with_scrape_delay(Duration::from_millis(ms));
    }
    if let Some(agent) = &cli.user_agent {
        config = config.with_user_agent(agent.clone());
    }
    if let Commands::Analyze { articles, no_scrape, .. } = &cli.command {
        if let Some(n) = articles {
            config = config.with_num_articles(*n as usize)?;
        }
        if *no_scrape {
            config = config.with_scraping(false);
        }
    }
    Ok(config)
}

fn create_model(cli: &Cli) -> anyhow::Result<Arc<dyn SentimentModel>> {
    let config = ns_inference::Config {
        model_name: Some(cli.model.clone()),
        lexicon_path: cli.lexicon.clone(),
    };
    let model = ns_inference::create_model(Some(config))
        .with_context(|| format!("Failed to initialise model '{}'", cli.model))?;
    info!("🧠 Sentiment model initialized (using {})", model.name());
    Ok(model)
}

fn build_manager(config: &AnalysisConfig, model: Arc<dyn SentimentModel>) -> anyhow::Result<AnalysisManager> {
    let provider = Arc::new(YahooNewsProvider::new(config)?);
    let scraper = Arc::new(HtmlArticleScraper::new(config)?);
    Ok(AnalysisManager::new(provider, scraper, model))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli)?;
    let model = create_model(&cli)?;

    match cli.command {
        Commands::Analyze { ticker, json, .. } => {
            let manager = build_manager(&config, model)?;
            let report = manager.analyze(&ticker, &config).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report::render_report(&report, config.preview_chars));
            }
        }
        Commands::Score { text, json } => {
            let result = model.score_text(&text.join(" "));
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", report::render_result(&result));
            }
        }
        Commands::News(args) => {
            let manager = build_manager(&config, model)?;
            handle_command(args, &manager, &config).await?
        }
    }

    Ok(())
}

fn user_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ns_core::Error>() {
        Some(e) => e.user_message(),
        None => format!("{:#}", err),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });

    if let Err(err) = run(cli).await {
        eprintln!("❌ {}", user_message(&err));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_config_from_flags() {
        let cli = Cli::parse_from(["ns", "analyze", "aapl", "-n", "5", "--no-scrape", "--timeout", "4"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.num_articles, 5);
        assert!(!config.scrape_full_text);
        assert_eq!(config.request_timeout, Duration::from_secs(4));
    }

    #[test]
    fn test_article_count_is_bounded() {
        assert!(Cli::try_parse_from(["ns", "analyze", "AAPL", "-n", "11"]).is_err());
        assert!(Cli::try_parse_from(["ns", "analyze", "AAPL", "-n", "0"]).is_err());
    }

    #[test]
    fn test_news_subcommands_parse() {
        let cli = Cli::parse_from(["ns", "news", "headlines", "MSFT", "--model", "keyword"]);
        assert_eq!(cli.model, "keyword");
        assert!(matches!(cli.command, Commands::News(_)));
    }

    #[test]
    fn test_build_manager_uses_selected_model() {
        let cli = Cli::parse_from(["ns", "--model", "keyword", "news", "models"]);
        let config = build_config(&cli).unwrap();
        let manager = build_manager(&config, create_model(&cli).unwrap()).unwrap();
        assert_eq!(manager.model().name(), "keyword");
        assert_eq!(manager.provider_name(), "Yahoo Finance");
    }

    #[test]
    fn test_user_message() {
        let err = anyhow::Error::new(ns_core::Error::NotFound("ZZZZ".to_string()));
        assert!(user_message(&err).starts_with("No news articles found for ZZZZ"));

        let err = anyhow::anyhow!("plain failure");
        assert_eq!(user_message(&err), "plain failure");
    }
}
