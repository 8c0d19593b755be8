use ns_core::{AggregateSentiment, SentimentLabel, SentimentModel, SentimentResult};

/// Summarise per-article scores. An empty slice gives the neutral, zero-count summary.
pub fn aggregate(results: &[SentimentResult]) -> AggregateSentiment {
    if results.is_empty() {
        return AggregateSentiment::empty();
    }

    let mut summary = AggregateSentiment::empty();
    let mut polarity_sum = 0.0;
    let mut subjectivity_sum = 0.0;

    for result in results {
        polarity_sum += result.polarity;
        subjectivity_sum += result.subjectivity;
        *summary.label_counts.entry(result.label).or_insert(0) += 1;
    }

    let n = results.len() as f64;
    summary.article_count = results.len();
    summary.mean_polarity = polarity_sum / n;
    summary.mean_subjectivity = subjectivity_sum / n;
    summary.overall = SentimentLabel::from_polarity(summary.mean_polarity);
    summary
}

/// Score all texts as one document. `None` when there is no text at all.
pub fn combined_sentiment<S: AsRef<str>>(
    model: &dyn SentimentModel,
    texts: &[S],
) -> Option<SentimentResult> {
    let combined = texts
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if combined.is_empty() {
        None
    } else {
        Some(model.score_text(&combined))
    }
}
