use std::fmt::Write;

use ns_core::{AnalysisReport, ScoredArticle, SentimentResult};

pub fn render_report(report: &AnalysisReport, preview_chars: usize) -> String {
    let mut out = String::new();

    if report.is_empty() {
        let _ = writeln!(
            out,
            "No news articles found for {}. Please check the ticker symbol and try again.",
            report.ticker
        );
        return out;
    }

    let aggregate = &report.aggregate;
    let _ = writeln!(out, "📈 News sentiment for {}", report.ticker);
    let _ = writeln!(
        out,
        "Overall: {} {}  (mean polarity {:.2}, mean subjectivity {:.2}, {} articles)",
        aggregate.overall,
        aggregate.overall.emoji(),
        aggregate.mean_polarity,
        aggregate.mean_subjectivity,
        aggregate.article_count
    );
    let counts = aggregate
        .label_counts
        .iter()
        .map(|(label, count)| format!("{} {}", label, count))
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "Labels: {}", counts);

    if let Some(combined) = &report.combined {
        let _ = writeln!(out, "Combined: {}", render_result(combined));
    }

    let _ = writeln!(out, "{}", "-".repeat(60));
    for scored in &report.articles {
        render_article(&mut out, scored, preview_chars);
    }
    out
}

pub fn render_result(result: &SentimentResult) -> String {
    format!(
        "{} {} (polarity {:.2}, subjectivity {:.2})",
        result.label,
        result.label.emoji(),
        result.polarity,
        result.subjectivity
    )
}

fn render_article(out: &mut String, scored: &ScoredArticle, preview_chars: usize) {
    let article = &scored.article;
    let _ = writeln!(out, "{} {}", article.title, scored.full_text.label.emoji());
    let _ = writeln!(
        out,
        "  Publisher: {} - {}",
        article.source,
        article.published_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "  Sentiment: {}", render_result(&scored.full_text));
    let _ = writeln!(out, "  Headline:  {}", render_result(&scored.headline));
    let _ = writeln!(out, "  Preview:   {}", scored.preview(preview_chars));
    let _ = writeln!(out, "  Link:      {}", article.url);
    let _ = writeln!(out);
}
