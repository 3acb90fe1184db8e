use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::DANISH_STOPWORDS;
use super::{AnalyzedToken, Lemmatizer, PosTag};

// Closed-class Danish words. A word listed under more than one tag keeps the
// first tag in this table.
const FUNCTION_WORDS: &[(PosTag, &[&str])] = &[
    (
        PosTag::Pron,
        &[
            "jeg", "du", "han", "hun", "den", "det", "vi", "de", "mig", "dig", "ham", "hende",
            "os", "jer", "dem", "sig", "min", "mit", "mine", "din", "dit", "dine", "hans",
            "hendes", "dens", "dets", "vores", "jeres", "deres", "sin", "sit", "sine", "man",
            "hvem", "hvad", "som", "selv", "nogen", "noget", "intet",
        ],
    ),
    (
        PosTag::Det,
        &[
            "en", "et", "denne", "dette", "disse", "hver", "hvert", "enhver", "alle", "nogle",
            "ingen", "begge", "anden", "andet", "andre", "samme", "mange", "flere", "fleste",
        ],
    ),
    (
        PosTag::Adp,
        &[
            "i", "på", "til", "af", "med", "for", "fra", "om", "ved", "efter", "under", "over",
            "mod", "uden", "hos", "mellem", "gennem", "blandt", "inden", "omkring", "bag",
            "trods", "ifølge",
        ],
    ),
    (PosTag::Cconj, &["og", "eller", "men", "samt", "både", "hverken", "enten"]),
    (
        PosTag::Sconj,
        &["hvis", "fordi", "når", "mens", "selvom", "end", "skønt", "idet"],
    ),
    (PosTag::Part, &["at"]),
    (
        PosTag::Adv,
        &[
            "ikke", "også", "så", "nu", "her", "der", "da", "jo", "vel", "nok", "meget", "mere",
            "mest", "kun", "bare", "allerede", "stadig", "altid", "aldrig", "igen", "lige",
            "ofte", "snart", "derfor", "dog", "hvor", "hvordan", "hvorfor", "hvornår", "endnu",
            "ganske", "lidt", "især", "måske", "sammen", "ud", "ind", "op", "ned", "hjem",
            "heller", "blot", "faktisk",
        ],
    ),
    (
        PosTag::Aux,
        &[
            "er", "var", "være", "været", "har", "havde", "have", "haft", "bliver", "blev",
            "blive", "blevet", "kan", "kunne", "skal", "skulle", "vil", "ville", "må", "måtte",
            "bør", "burde",
        ],
    ),
];

lazy_static! {
    static ref PUNCTUATION: Regex =
        Regex::new(r"[\p{P}\x21-\x2F\x3A-\x40\x5B-\x60\x7B-\x7E]").unwrap();
    static ref FUNCTION_WORD_TAGS: HashMap<&'static str, PosTag> = {
        let mut map = HashMap::new();
        for (tag, words) in FUNCTION_WORDS {
            for word in *words {
                map.entry(*word).or_insert(*tag);
            }
        }
        map
    };
    static ref STOPWORDS: HashSet<&'static str> = DANISH_STOPWORDS.iter().copied().collect();
}

/// Offline analyzer for Danish text.
///
/// Segments on Unicode word boundaries, tags closed-class words from a fixed
/// table and everything else by character class, and approximates lemmas
/// with the Danish Snowball stemmer. Open-class words are not told apart and
/// are tagged `X` (or `PROPN` when capitalized mid-sentence).
pub struct RuleLemmatizer {
    stemmer: Option<Stemmer>,
}

impl Default for RuleLemmatizer {
    fn default() -> Self {
        Self {
            stemmer: Some(Stemmer::create(Algorithm::Danish)),
        }
    }
}

impl RuleLemmatizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// With stemming disabled the lemma is the lowercased surface form.
    pub fn with_stemming(mut self, enabled: bool) -> Self {
        self.stemmer = enabled.then(|| Stemmer::create(Algorithm::Danish));
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<AnalyzedToken> {
        let mut tokens = Vec::new();
        let mut sentence_start = true;

        for segment in text.split_word_bounds() {
            let token = self.analyze_segment(segment, sentence_start);
            match token.pos {
                PosTag::Space => {}
                PosTag::Punct => sentence_start = matches!(segment, "." | "!" | "?" | ":"),
                _ => sentence_start = false,
            }
            tokens.push(token);
        }
        tokens
    }

    fn analyze_segment(&self, segment: &str, sentence_start: bool) -> AnalyzedToken {
        let lower = segment.to_lowercase();
        let is_alpha = !segment.is_empty() && segment.chars().all(char::is_alphabetic);
        let pos = classify(segment, &lower, is_alpha, sentence_start);

        let lemma = match (&self.stemmer, is_alpha) {
            (Some(stemmer), true) if !FUNCTION_WORD_TAGS.contains_key(lower.as_str()) => {
                stemmer.stem(&lower).into_owned()
            }
            _ => lower.clone(),
        };

        AnalyzedToken {
            text: segment.to_string(),
            is_stop: STOPWORDS.contains(lower.as_str()),
            lemma,
            pos,
            is_alpha,
        }
    }
}

fn classify(segment: &str, lower: &str, is_alpha: bool, sentence_start: bool) -> PosTag {
    if segment.chars().all(char::is_whitespace) {
        return PosTag::Space;
    }
    if let Some(tag) = FUNCTION_WORD_TAGS.get(lower) {
        return *tag;
    }
    if segment.chars().any(|c| c.is_numeric())
        && segment
            .chars()
            .all(|c| c.is_numeric() || matches!(c, '.' | ',' | '-' | '/'))
    {
        return PosTag::Num;
    }
    if segment.chars().all(is_punctuation) {
        return PosTag::Punct;
    }
    if !segment.chars().any(char::is_alphanumeric) {
        return PosTag::Sym;
    }
    let capitalized = segment.chars().next().map_or(false, char::is_uppercase);
    if is_alpha && capitalized && !sentence_start {
        PosTag::Propn
    } else {
        PosTag::X
    }
}

/// General category P, plus the ASCII punctuation set whose symbols
/// (`$`, `+`, `<`, `|`, ...) Unicode files under S.
pub fn is_punctuation(c: char) -> bool {
    let mut buf = [0u8; 4];
    PUNCTUATION.is_match(c.encode_utf8(&mut buf))
}

/// Removes every punctuation character, including inside compounds.
pub fn strip_punctuation(word: &str) -> String {
    PUNCTUATION.replace_all(word, "").into_owned()
}

impl Lemmatizer for RuleLemmatizer {
    fn analyze_batch(&self, texts: &[&str]) -> Result<Vec<Vec<AnalyzedToken>>> {
        Ok(texts.iter().map(|text| self.analyze(text)).collect())
    }
}
