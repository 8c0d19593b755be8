use std::collections::HashSet;

use ns_core::{SentimentModel, SentimentResult};

use super::{is_negator, tokenize, NEGATION_WINDOW};

const POSITIVE_WORDS: &[&str] = &[
    "bullish", "rally", "surge", "gain", "gains", "profit", "growth", "beat", "beats",
    "upgrade", "outperform", "strong", "positive", "rise", "rises", "increase",
    "breakthrough", "innovation", "success", "exceed", "exceeds", "momentum",
    "buy", "recommend", "optimistic", "record", "high", "advance",
    "dividend", "buyback", "repurchase", "accretive", "upside",
    "recovery", "rebound", "expansion", "robust", "accelerating",
    "overweight", "raised", "upgraded", "outpacing", "tailwind",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bearish", "decline", "loss", "losses", "fall", "falls", "plunge", "crash", "miss",
    "misses", "downgrade", "underperform", "weak", "negative", "drop", "decrease",
    "concern", "risk", "fail", "failure", "disappoint", "slump", "sell",
    "warning", "pessimistic", "low", "retreat", "fear", "trouble",
    "dilution", "dilutive", "headwind", "lawsuit", "litigation",
    "recall", "investigation", "probe", "default", "bankruptcy",
    "restructuring", "layoff", "layoffs", "downside", "overvalued", "bubble",
    "underweight", "lowered", "suspended",
];

/// Counts financial keywords. Polarity is the balance of positive over negative hits,
/// subjectivity the share of tokens that were hits.
#[derive(Debug, Clone)]
pub struct KeywordModel {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
}

impl KeywordModel {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
        }
    }
}

impl Default for KeywordModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentModel for KeywordModel {
    fn name(&self) -> &str {
        "keyword"
    }

    fn score_text(&self, text: &str) -> SentimentResult {
        let tokens = tokenize(text);
        let negations: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| is_negator(t))
            .map(|(i, _)| i)
            .collect();

        let mut positive = 0usize;
        let mut negative = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            let is_positive = self.positive.contains(token.as_str());
            let is_negative = self.negative.contains(token.as_str());
            if !is_positive && !is_negative {
                continue;
            }

            let negated = negations
                .iter()
                .any(|&n| n < i && i - n <= NEGATION_WINDOW);

            if is_positive != negated {
                positive += 1;
            } else {
                negative += 1;
            }
        }

        let hits = positive + negative;
        if hits == 0 {
            return SentimentResult::neutral();
        }
        let polarity = (positive as f64 - negative as f64) / hits as f64;
        let subjectivity = hits as f64 / tokens.len() as f64;
        SentimentResult::new(polarity, subjectivity)
    }
}
