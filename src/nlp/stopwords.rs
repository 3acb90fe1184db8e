use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::TARGET_LOADER;

// Function words flagged as stopwords by the rule-based analyzer.
pub const DANISH_STOPWORDS: &[&str] = &[
    "ad", "af", "aldrig", "alle", "alt", "anden", "andet", "andre", "at", "bare", "begge", "blev",
    "blive", "bliver", "da", "de", "dem", "den", "denne", "dens", "der", "deres", "det", "dette",
    "dig", "din", "dine", "disse", "dit", "dog", "du", "efter", "eller", "en", "end", "ene",
    "eneste", "enhver", "er", "et", "fem", "fire", "flere", "fleste", "for", "fordi", "forrige",
    "fra", "få", "før", "han", "hans", "har", "havde", "have", "hende", "hendes", "her",
    "hos", "hun", "hvad", "hvem", "hver", "hvilken", "hvis", "hvor", "hvordan", "hvorfor",
    "hvornår", "i", "ikke", "ind", "ingen", "intet", "jeg", "jeres", "jo", "kan", "kom", "kommer",
    "kun", "kunne", "lad", "lidt", "lige", "man", "mange", "med", "meget",
    "men", "mens", "mere", "mig", "min", "mine", "mit", "mod", "må", "ned", "nej", "noget",
    "nogle", "nu", "når", "nær", "næste", "næsten", "og", "også", "om", "op", "os",
    "otte", "over", "på", "se", "seks", "selv", "ses", "sig", "sin", "sine", "sit", "skal",
    "skulle", "som", "syv", "så", "sådan", "thi", "ti", "til",
    "to", "tre", "ud", "under", "var", "vi", "vil", "ville", "vor", "vores", "være", "været",
];

/// Words removed from the token table after lemma mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn new<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Loads a newline-delimited word list. Surrounding whitespace is trimmed and
    /// blank lines are skipped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stopword list: {}", path.display()))?;
        let set = Self::parse(&raw);
        info!(
            target: TARGET_LOADER,
            "Loaded {} stopwords from {}",
            set.len(),
            path.display()
        );
        Ok(set)
    }

    pub fn parse(raw: &str) -> Self {
        Self::new(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
