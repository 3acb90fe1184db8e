//! Linguistic analysis consumed by the token normalizer.
//!
//! The lemmatizer and POS tagger are collaborators behind the [`Lemmatizer`]
//! trait. Two implementations ship with the crate: [`RuleLemmatizer`], an
//! offline rule-based analyzer for Danish, and [`AnnotationLemmatizer`],
//! which replays token annotations exported by an external NLP pipeline.

mod annotations;
mod rules;
mod stopwords;

pub use self::annotations::AnnotationLemmatizer;
pub use self::rules::{is_punctuation, strip_punctuation, RuleLemmatizer};
pub use self::stopwords::{StopwordSet, DANISH_STOPWORDS};

use anyhow::Result;
use std::fmt;

/// Universal Dependencies part-of-speech tags, plus `SPACE` for whitespace tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Space,
    Sym,
    Verb,
    X,
}

/// Tags whose tokens never reach the token table.
pub const EXCLUDED_POS: &[PosTag] = &[
    PosTag::Adv,
    PosTag::Pron,
    PosTag::Cconj,
    PosTag::Punct,
    PosTag::Part,
    PosTag::Det,
    PosTag::Adp,
    PosTag::Space,
    PosTag::Num,
    PosTag::Sym,
];

impl PosTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::Cconj => "CCONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Propn => "PROPN",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Space => "SPACE",
            PosTag::Sym => "SYM",
            PosTag::Verb => "VERB",
            PosTag::X => "X",
        }
    }

    /// Parses an upper-case tag name. Unknown names are `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = match tag.trim() {
            "ADJ" => PosTag::Adj,
            "ADP" => PosTag::Adp,
            "ADV" => PosTag::Adv,
            "AUX" => PosTag::Aux,
            "CCONJ" | "CONJ" => PosTag::Cconj,
            "DET" => PosTag::Det,
            "INTJ" => PosTag::Intj,
            "NOUN" => PosTag::Noun,
            "NUM" => PosTag::Num,
            "PART" => PosTag::Part,
            "PRON" => PosTag::Pron,
            "PROPN" => PosTag::Propn,
            "PUNCT" => PosTag::Punct,
            "SCONJ" => PosTag::Sconj,
            "SPACE" => PosTag::Space,
            "SYM" => PosTag::Sym,
            "VERB" => PosTag::Verb,
            "X" => PosTag::X,
            _ => return None,
        };
        Some(tag)
    }

    pub fn is_excluded(&self) -> bool {
        EXCLUDED_POS.contains(self)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One token as reported by the lemmatizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedToken {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
    pub is_stop: bool,
    pub is_alpha: bool,
}

pub trait Lemmatizer {
    /// Analyzes a batch of documents, returning one token sequence per input text, in order.
    fn analyze_batch(&self, texts: &[&str]) -> Result<Vec<Vec<AnalyzedToken>>>;
}
