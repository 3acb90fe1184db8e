//! Tone and stance scores per sentence.
//!
//! The classifier is a collaborator behind [`ToneClassifier`]. The study's
//! exports usually carry the five score columns already, in which case the
//! stage leaves the table untouched.

mod lexicon;

pub use self::lexicon::LexiconToneClassifier;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::table::Table;
use crate::TARGET_TONE;

pub const TONE_COLUMNS: [&str; 5] = [
    "positive_prob",
    "neutral_prob",
    "negative_prob",
    "objective_prob",
    "subjective_prob",
];

/// Sentiment triple and stance pair, each summing to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneScores {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
    pub objective: f64,
    pub subjective: f64,
}

impl ToneScores {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.positive,
            self.neutral,
            self.negative,
            self.objective,
            self.subjective,
        ]
    }
}

pub trait ToneClassifier {
    fn predict(&self, text: &str) -> Result<ToneScores>;
}

pub struct ToneStage<'a> {
    classifier: &'a dyn ToneClassifier,
}

impl<'a> ToneStage<'a> {
    pub fn new(classifier: &'a dyn ToneClassifier) -> Self {
        Self { classifier }
    }

    pub fn has_scores(table: &Table) -> bool {
        TONE_COLUMNS.iter().all(|c| table.has_column(c))
    }

    /// Scores every sentence and appends the five probability columns.
    /// Returns `false` without touching the table when the scores already exist.
    pub fn apply(&self, table: &mut Table, sentence_column: &str) -> Result<bool> {
        if Self::has_scores(table) {
            info!(
                target: TARGET_TONE,
                "Tone columns already present; skipping classification"
            );
            return Ok(false);
        }

        let mut columns: [Vec<String>; 5] = Default::default();
        for (n, sentence) in table.column(sentence_column)?.enumerate() {
            let scores = self
                .classifier
                .predict(sentence)
                .with_context(|| format!("Tone classification failed for row {}", n))?;
            for (column, value) in columns.iter_mut().zip(scores.as_array()) {
                column.push(value.to_string());
            }
            if (n + 1) % 1000 == 0 {
                debug!(target: TARGET_TONE, "Classified {} sentences", n + 1);
            }
        }

        for (name, values) in TONE_COLUMNS.iter().zip(columns) {
            table.set_column(name, values)?;
        }
        info!(
            target: TARGET_TONE,
            "Classified tone for {} sentences",
            table.len()
        );
        Ok(true)
    }
}
