//! Token normalization for the topic model.
//!
//! Articles are expanded into one row per surviving token: excluded POS
//! tags, lemmatizer stopwords and non-alphabetic tokens are dropped, the
//! lemma is lowercased and stripped of punctuation, variants are merged by the
//! lemma mapping, and finally the stopword list is applied.

use anyhow::{bail, Result};
use std::collections::HashMap;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::lexicon::LemmaMapping;
use crate::nlp::{strip_punctuation, AnalyzedToken, Lemmatizer, StopwordSet};
use crate::table::Table;
use crate::TARGET_TOKENS;

/// Raw lemma column of the token table.
pub const LEMMA_COLUMN: &str = "tokens";
/// Normalized word column of the token table.
pub const WORD_COLUMN: &str = "word";

const PROGRESS_EVERY: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedToken {
    /// Lowercased lemma as produced by the lemmatizer.
    pub lemma: String,
    /// Punctuation-stripped, mapped form.
    pub word: String,
}

/// Result of expanding a table into tokens.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub table: Table,
    /// Source rows that produced no token at all.
    pub empty_documents: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct TokenNormalizer<'a> {
    mapping: Option<&'a LemmaMapping>,
    stopwords: Option<&'a StopwordSet>,
}

impl<'a> TokenNormalizer<'a> {
    pub fn new(mapping: &'a LemmaMapping, stopwords: &'a StopwordSet) -> Self {
        Self {
            mapping: Some(mapping),
            stopwords: Some(stopwords),
        }
    }

    /// Filters and strips tokens without mapping them or applying the stopword
    /// list. Used to survey raw word frequencies when curating the mapping.
    pub fn unmapped() -> Self {
        Self {
            mapping: None,
            stopwords: None,
        }
    }

    pub fn normalize_token(&self, token: &AnalyzedToken) -> Option<NormalizedToken> {
        if token.pos.is_excluded() || token.is_stop || !token.is_alpha {
            return None;
        }

        let lemma: String = token.lemma.to_lowercase().nfc().collect();
        let stripped = strip_punctuation(&lemma);
        let word = match self.mapping {
            Some(mapping) => mapping.apply(&stripped).to_string(),
            None => stripped,
        };

        if word.is_empty() {
            return None;
        }
        if let Some(stopwords) = self.stopwords {
            if stopwords.contains(&word) {
                return None;
            }
        }

        Some(NormalizedToken { lemma, word })
    }

    pub fn normalize_document(&self, tokens: &[AnalyzedToken]) -> Vec<NormalizedToken> {
        tokens
            .iter()
            .filter_map(|token| self.normalize_token(token))
            .collect()
    }

    /// Expands every row of `table` into one row per surviving token of its
    /// `text_column`. The output keeps the source columns except `drop`, and
    /// appends the lemma and word columns. Rows without surviving tokens
    /// contribute nothing and are counted in [`Explosion::empty_documents`].
    pub fn explode(
        &self,
        table: &Table,
        text_column: &str,
        drop: &[&str],
        lemmatizer: &dyn Lemmatizer,
    ) -> Result<Explosion> {
        let texts: Vec<&str> = table.column(text_column)?.collect();
        info!(
            target: TARGET_TOKENS,
            "Analyzing {} documents from '{}'",
            texts.len(),
            text_column
        );

        let documents = lemmatizer.analyze_batch(&texts)?;
        if documents.len() != texts.len() {
            bail!(
                "lemmatizer returned {} documents for a batch of {}",
                documents.len(),
                texts.len()
            );
        }

        let keep: Vec<usize> = table
            .headers()
            .iter()
            .enumerate()
            .filter(|(_, h)| !drop.contains(&h.as_str()))
            .map(|(idx, _)| idx)
            .collect();

        let mut headers: Vec<&str> = keep.iter().map(|&idx| table.headers()[idx].as_str()).collect();
        headers.push(LEMMA_COLUMN);
        headers.push(WORD_COLUMN);
        let mut output = Table::new(headers);

        let mut empty_documents = 0;
        for (n, (row, document)) in table.rows().iter().zip(&documents).enumerate() {
            let tokens = self.normalize_document(document);
            if tokens.is_empty() {
                empty_documents += 1;
                debug!(
                    target: TARGET_TOKENS,
                    "Row {} produced no tokens ({} analyzed)",
                    n,
                    document.len()
                );
            }

            for token in tokens {
                let mut out: Vec<String> = keep.iter().map(|&idx| row[idx].clone()).collect();
                out.push(token.lemma);
                out.push(token.word);
                output.push_row(out)?;
            }

            if (n + 1) % PROGRESS_EVERY == 0 {
                debug!(target: TARGET_TOKENS, "Normalized {}/{} documents", n + 1, texts.len());
            }
        }

        info!(
            target: TARGET_TOKENS,
            "Produced {} token rows from {} documents; {} documents had no surviving tokens",
            output.len(),
            texts.len(),
            empty_documents
        );

        Ok(Explosion {
            table: output,
            empty_documents,
        })
    }
}

/// Frequency of each value of the word column, most frequent first.
pub fn word_counts(tokens: &Table) -> Result<Table> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in tokens.column(WORD_COLUMN)? {
        *counts.entry(word).or_default() += 1;
    }

    let mut sorted: Vec<(&str, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new([WORD_COLUMN, "count"]);
    for (word, count) in sorted {
        table.push_row(vec![word.to_string(), count.to_string()])?;
    }
    Ok(table)
}
