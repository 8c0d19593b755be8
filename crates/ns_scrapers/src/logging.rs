use tracing::Level;
use std::sync::Once;

static INIT: Once = Once::new();

/// Tags every message with a stack of scopes, e.g. `[AAPL] [2/3] message`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    scopes: Vec<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A child logger with one more scope appended.
    pub fn with_prefix(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    fn line(&self, message: &str) -> String {
        let mut line = self.scopes.join(" ");
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(message);
        line
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}", self.line(message));
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", self.line(message));
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}", self.line(message));
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}", self.line(message));
    }
}

/// Install the global subscriber once. Output goes to stderr so reports on stdout stay clean.
pub fn init_logging(level: Level) -> Logger {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        });
    }
    Logger::new()
}
