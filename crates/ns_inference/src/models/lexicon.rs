use std::collections::HashMap;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use ns_core::{Error, Result, SentimentModel, SentimentResult};
use serde::Deserialize;

use super::{is_negator, tokenize, NEGATION_WINDOW};

/// A negated word keeps half its strength with the sign flipped.
const NEGATION_FACTOR: f64 = -0.5;

// (word, polarity, subjectivity)
const DEFAULT_WORDS: &[(&str, f64, f64)] = &[
    // general adjectives
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.667),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("brilliant", 0.9, 1.0),
    ("disappointing", -0.6, 0.7),
    ("disastrous", -0.7, 0.9),
    ("dismal", -0.6, 0.8),
    ("encouraging", 0.6, 0.8),
    ("excellent", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("favorable", 0.5, 0.6),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("grim", -0.6, 0.8),
    ("happy", 0.8, 1.0),
    ("healthy", 0.5, 0.5),
    ("horrible", -1.0, 1.0),
    ("impressive", 1.0, 1.0),
    ("nice", 0.6, 1.0),
    ("optimistic", 0.6, 0.8),
    ("outstanding", 0.5, 0.7),
    ("painful", -0.7, 0.9),
    ("pessimistic", -0.5, 0.8),
    ("poor", -0.4, 0.6),
    ("positive", 0.227, 0.545),
    ("negative", -0.3, 0.4),
    ("remarkable", 0.75, 0.75),
    ("risky", -0.5, 0.6),
    ("sad", -0.5, 1.0),
    ("solid", 0.2, 0.4),
    ("strong", 0.433, 0.733),
    ("successful", 0.75, 0.95),
    ("terrible", -1.0, 1.0),
    ("uncertain", -0.2, 0.6),
    ("upbeat", 0.5, 0.6),
    ("volatile", -0.3, 0.5),
    ("weak", -0.375, 0.625),
    ("wonderful", 1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    // market vocabulary
    ("bearish", -0.5, 0.6),
    ("bullish", 0.5, 0.6),
    ("crash", -0.6, 0.5),
    ("crashes", -0.6, 0.5),
    ("downgrade", -0.4, 0.3),
    ("downgraded", -0.4, 0.3),
    ("failure", -0.5, 0.4),
    ("failures", -0.5, 0.4),
    ("layoffs", -0.4, 0.2),
    ("loss", -0.3, 0.2),
    ("losses", -0.3, 0.2),
    ("plunge", -0.5, 0.4),
    ("plunges", -0.5, 0.4),
    ("profitable", 0.5, 0.5),
    ("rally", 0.4, 0.3),
    ("rallies", 0.4, 0.3),
    ("record-breaking", 0.5, 0.5),
    ("slump", -0.4, 0.3),
    ("slumps", -0.4, 0.3),
    ("soar", 0.5, 0.4),
    ("soars", 0.5, 0.4),
    ("surge", 0.4, 0.4),
    ("surges", 0.4, 0.4),
    ("upgrade", 0.4, 0.3),
    ("upgraded", 0.4, 0.3),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.5),
    ("really", 1.2),
    ("somewhat", 0.7),
    ("slightly", 0.5),
    ("very", 1.3),
];

lazy_static! {
    static ref DEFAULT_LEXICON: Lexicon = Lexicon::from_entries(
        DEFAULT_WORDS
            .iter()
            .map(|(word, polarity, subjectivity)| {
                (
                    word.to_string(),
                    LexiconEntry {
                        polarity: *polarity,
                        subjectivity: *subjectivity,
                    },
                )
            })
            .collect(),
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    words: HashMap<String, LexiconEntry>,
    intensifiers: HashMap<String, f64>,
}

impl Lexicon {
    fn from_entries(words: HashMap<String, LexiconEntry>) -> Self {
        Self {
            words,
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(w, m)| (w.to_string(), *m))
                .collect(),
        }
    }

    /// Parse a `{"word": {"polarity": p, "subjectivity": s}}` object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, LexiconEntry> = serde_json::from_str(json)?;
        let mut words = HashMap::with_capacity(raw.len());
        for (word, entry) in raw {
            if !(-1.0..=1.0).contains(&entry.polarity) || !(0.0..=1.0).contains(&entry.subjectivity) {
                return Err(Error::Inference(format!(
                    "lexicon entry '{}' is out of range (polarity {}, subjectivity {})",
                    word, entry.polarity, entry.subjectivity
                )));
            }
            words.insert(word.trim().to_lowercase(), entry);
        }
        if words.is_empty() {
            return Err(Error::Inference("lexicon contains no words".to_string()));
        }
        Ok(Self::from_entries(words))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn get(&self, word: &str) -> Option<&LexiconEntry> {
        self.words.get(word)
    }

    pub fn intensifier(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        DEFAULT_LEXICON.clone()
    }
}

/// Averages the polarity and subjectivity of every lexicon word found in the text.
#[derive(Debug, Clone, Default)]
pub struct LexiconModel {
    lexicon: Lexicon,
}

impl LexiconModel {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

impl SentimentModel for LexiconModel {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn score_text(&self, text: &str) -> SentimentResult {
        let mut polarity = 0.0;
        let mut subjectivity = 0.0;
        let mut assessments = 0usize;
        let mut intensity: Option<f64> = None;
        let mut negation_left = 0usize;

        for token in tokenize(text) {
            if is_negator(&token) {
                negation_left = NEGATION_WINDOW;
                intensity = None;
                continue;
            }
            if let Some(multiplier) = self.lexicon.intensifier(&token) {
                intensity = Some(intensity.unwrap_or(1.0) * multiplier);
                continue;
            }
            match self.lexicon.get(&token) {
                Some(entry) => {
                    let multiplier = intensity.take().unwrap_or(1.0);
                    let mut p = entry.polarity * multiplier;
                    if negation_left > 0 {
                        p *= NEGATION_FACTOR;
                        negation_left = 0;
                    }
                    polarity += p.clamp(-1.0, 1.0);
                    subjectivity += (entry.subjectivity * multiplier).clamp(0.0, 1.0);
                    assessments += 1;
                }
                None => {
                    intensity = None;
                    negation_left = negation_left.saturating_sub(1);
                }
            }
        }

        if assessments == 0 {
            return SentimentResult::neutral();
        }
        let n = assessments as f64;
        SentimentResult::new(polarity / n, subjectivity / n)
    }
}
