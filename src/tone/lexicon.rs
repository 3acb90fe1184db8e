use anyhow::Result;
use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

use super::{ToneClassifier, ToneScores};

// Prior pulling scores toward neutral when a sentence has few cues
const NEUTRAL_BIAS: f64 = 1.0;
// Each subjectivity cue moves the stance logit by this much
const SUBJECTIVE_WEIGHT: f64 = 0.9;
const SUBJECTIVE_BIAS: f64 = -1.2;

const POSITIVE: &[(&str, f64)] = &[
    ("god", 0.6),
    ("godt", 0.6),
    ("gode", 0.6),
    ("glad", 0.7),
    ("glæde", 0.7),
    ("fantastisk", 0.9),
    ("fremragende", 0.9),
    ("dejlig", 0.7),
    ("dejligt", 0.7),
    ("positiv", 0.6),
    ("positivt", 0.6),
    ("fremskridt", 0.6),
    ("forbedring", 0.5),
    ("styrke", 0.4),
    ("tryghed", 0.5),
    ("frihed", 0.5),
    ("fair", 0.5),
    ("retfærdig", 0.6),
    ("retfærdigt", 0.6),
    ("succes", 0.7),
    ("vigtig", 0.3),
    ("vigtigt", 0.3),
    ("stolt", 0.6),
    ("tilfreds", 0.6),
    ("nemt", 0.4),
    ("løsning", 0.4),
    ("gevinst", 0.6),
    ("velkommen", 0.5),
];

const NEGATIVE: &[(&str, f64)] = &[
    ("dårlig", 0.6),
    ("dårligt", 0.6),
    ("dårlige", 0.6),
    ("problem", 0.5),
    ("problemer", 0.5),
    ("uretfærdig", 0.7),
    ("uretfærdigt", 0.7),
    ("diskrimination", 0.8),
    ("kritik", 0.5),
    ("kritiserer", 0.5),
    ("bekymret", 0.6),
    ("bekymring", 0.6),
    ("frygt", 0.7),
    ("frygter", 0.7),
    ("vred", 0.8),
    ("skuffet", 0.7),
    ("skuffende", 0.7),
    ("tvang", 0.6),
    ("straf", 0.6),
    ("tab", 0.5),
    ("taber", 0.5),
    ("svært", 0.4),
    ("urimelig", 0.7),
    ("urimeligt", 0.7),
    ("katastrofe", 0.9),
    ("konflikt", 0.5),
    ("ulighed", 0.6),
    ("stress", 0.5),
];

const NEGATIONS: &[&str] = &["ikke", "aldrig", "ingen", "intet", "hverken"];

const SUBJECTIVE_CUES: &[&str] = &[
    "jeg", "mig", "min", "mit", "mine", "synes", "mener", "føler", "tror", "håber", "desværre",
    "heldigvis", "selvfølgelig", "åbenlyst", "utrolig", "utroligt", "virkelig", "meget",
    "absolut", "burde", "bør",
];

lazy_static! {
    static ref DEFAULT_POLARITY: HashMap<String, f64> = POSITIVE
        .iter()
        .map(|(w, s)| (w.to_string(), *s))
        .chain(NEGATIVE.iter().map(|(w, s)| (w.to_string(), -*s)))
        .collect();
}

/// Lexicon-based tone classifier for Danish sentences.
///
/// Polarity words (flipped by a preceding negation) push the positive or
/// negative logit, a fixed bias favours neutral, and the three are passed
/// through a softmax. Stance is a logistic function of the number of
/// subjectivity cues: first-person pronouns, opinion verbs, intensifiers and
/// exclamation marks.
#[derive(Debug, Clone)]
pub struct LexiconToneClassifier {
    polarity: HashMap<String, f64>,
    negations: HashSet<String>,
    subjective_cues: HashSet<String>,
}

impl Default for LexiconToneClassifier {
    fn default() -> Self {
        Self {
            polarity: DEFAULT_POLARITY.clone(),
            negations: NEGATIONS.iter().map(|s| s.to_string()).collect(),
            subjective_cues: SUBJECTIVE_CUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LexiconToneClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or overrides a polarity word; positive scores are positive sentiment.
    pub fn with_word(mut self, word: &str, score: f64) -> Self {
        self.polarity.insert(word.to_lowercase(), score);
        self
    }

    pub fn score(&self, text: &str) -> ToneScores {
        let mut positive = 0.0;
        let mut negative = 0.0;
        let mut cues = text.matches('!').count() as f64;
        let mut negated = false;

        for word in text.unicode_words() {
            let word = word.to_lowercase();
            if self.subjective_cues.contains(&word) {
                cues += 1.0;
            }
            if self.negations.contains(&word) {
                negated = true;
                continue;
            }
            if let Some(score) = self.polarity.get(&word) {
                let score = if negated { -score } else { *score };
                if score > 0.0 {
                    positive += score;
                } else {
                    negative -= score;
                }
            }
            negated = false;
        }

        let [p, u, n] = softmax([positive, NEUTRAL_BIAS, negative]);
        let subjective = logistic(SUBJECTIVE_WEIGHT * cues + SUBJECTIVE_BIAS);

        ToneScores {
            positive: p,
            neutral: u,
            negative: n,
            objective: 1.0 - subjective,
            subjective,
        }
    }
}

fn softmax(logits: [f64; 3]) -> [f64; 3] {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exp = logits.map(|l| (l - max).exp());
    let sum: f64 = exp.iter().sum();
    exp.map(|e| e / sum)
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl ToneClassifier for LexiconToneClassifier {
    fn predict(&self, text: &str) -> Result<ToneScores> {
        Ok(self.score(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_normalized(scores: &ToneScores) {
        let sentiment = scores.positive + scores.neutral + scores.negative;
        let stance = scores.objective + scores.subjective;
        assert!((sentiment - 1.0).abs() < 1e-9);
        assert!((stance - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_plain_sentence_is_neutral_and_objective() {
        let scores = LexiconToneClassifier::new()
            .score("Loven træder i kraft den 2. august 2022.");
        assert_normalized(&scores);
        assert!(scores.neutral > scores.positive);
        assert!(scores.neutral > scores.negative);
        assert!(scores.objective > scores.subjective);
    }

    #[test]
    fn test_polarity() {
        let classifier = LexiconToneClassifier::new();
        let good = classifier.score("Det er en fantastisk og retfærdig løsning for familien");
        assert!(good.positive > good.negative);
        assert!(good.positive > good.neutral);

        let bad = classifier.score("Forslaget er urimeligt og skaber diskrimination");
        assert!(bad.negative > bad.positive);
        assert_normalized(&bad);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let scores = LexiconToneClassifier::new().score("Det er ikke godt, ikke retfærdigt");
        assert!(scores.negative > scores.positive);
    }

    #[test]
    fn test_subjective_cues() {
        let scores =
            LexiconToneClassifier::new().score("Jeg synes virkelig, at fædre burde tage mere barsel!");
        assert!(scores.subjective > scores.objective);
    }

    #[test]
    fn test_custom_word() {
        let classifier = LexiconToneClassifier::new().with_word("øremærkning", 1.5);
        let scores = classifier.score("øremærkning");
        assert!(scores.positive > scores.neutral);
    }
}
