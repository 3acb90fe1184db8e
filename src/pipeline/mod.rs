//! The batch pipeline: load, filter, tag, strip, score, tokenize, write.
//!
//! Stages run strictly in that order and every stage reads only what the
//! previous one produced. Static tables come in through a [`Lexicon`] and the
//! two linguistic collaborators through trait objects, so the same pipeline
//! serves the parental leave corpus and the control corpus.

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::boilerplate::BoilerplateStripper;
use crate::lexicon::Lexicon;
use crate::nlp::{Lemmatizer, StopwordSet};
use crate::orientation::{join_reference, OrientationTagger};
use crate::table::{load_table, write_table, Table};
use crate::tokens::{word_counts, Explosion, TokenNormalizer};
use crate::tone::{ToneClassifier, ToneStage, TONE_COLUMNS};
use crate::{BOOKKEEPING_COLUMNS, CONTROL_BOOKKEEPING_COLUMNS, TARGET_PIPELINE};

/// Sentences with fewer words than this are discarded before any other stage.
pub const MIN_SENTENCE_WORDS: usize = 3;

/// Names of the input columns every stage relies on.
#[derive(Debug, Clone)]
pub struct ColumnNames {
    pub id: String,
    pub newspaper: String,
    pub article: String,
    pub sentence: String,
    /// Rows sharing this key belong to one article; see [`Pipeline::tokenize`].
    pub article_key: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            newspaper: "Newspaper".to_string(),
            article: "article".to_string(),
            sentence: "sentences".to_string(),
            article_key: "merge_index".to_string(),
        }
    }
}

/// Where the orientation label comes from.
#[derive(Debug, Clone)]
pub enum OrientationSource {
    /// Exact newspaper-name membership in the lexicon's lists.
    Newspaper,
    /// Inner join with a reference table on the identifier column.
    Reference { path: PathBuf, delimiter: u8 },
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub input_delimiter: u8,
    pub orientation: OrientationSource,
    pub stopwords: Option<PathBuf>,
    pub sentences_out: PathBuf,
    pub tokens_out: PathBuf,
    pub output_delimiter: u8,
    pub columns: ColumnNames,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub loaded_rows: usize,
    pub short_rows: usize,
    pub unreferenced_rows: usize,
    pub sentence_rows: usize,
    pub token_rows: usize,
    pub empty_documents: usize,
}

pub struct Pipeline<'a> {
    lexicon: &'a Lexicon,
    lemmatizer: &'a dyn Lemmatizer,
    classifier: Option<&'a dyn ToneClassifier>,
    columns: ColumnNames,
}

impl<'a> Pipeline<'a> {
    pub fn new(lexicon: &'a Lexicon, lemmatizer: &'a dyn Lemmatizer, columns: ColumnNames) -> Self {
        Self {
            lexicon,
            lemmatizer,
            classifier: None,
            columns,
        }
    }

    /// Scores sentences that arrive without tone columns.
    pub fn with_classifier(mut self, classifier: &'a dyn ToneClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Full run: both output tables written to disk.
    pub fn run(&self, config: &PipelineConfig) -> Result<RunSummary> {
        let mut table = load_table(&config.input, config.input_delimiter)?;
        let reference = match &config.orientation {
            OrientationSource::Newspaper => None,
            OrientationSource::Reference { path, delimiter } => Some(load_table(path, *delimiter)?),
        };
        let stopwords = match &config.stopwords {
            Some(path) => StopwordSet::load(path)?,
            None => {
                warn!(
                    target: TARGET_PIPELINE,
                    "No stopword list given; only lemmatizer stopwords are removed"
                );
                StopwordSet::default()
            }
        };

        let mut summary = RunSummary {
            loaded_rows: table.len(),
            ..Default::default()
        };

        summary.short_rows = filter_short_sentences(&mut table, &self.columns.sentence)?;
        summary.unreferenced_rows = self.tag_orientation(&mut table, reference.as_ref())?;
        self.strip_boilerplate(&mut table)?;
        self.score_tone(&mut table)?;

        let normalizer = TokenNormalizer::new(&self.lexicon.mapping, &stopwords);
        let explosion = self.tokenize(&table, &normalizer)?;

        let mut tokens = explosion.table;
        prune_bookkeeping(&mut table);
        prune_bookkeeping(&mut tokens);

        write_table(&table, &config.sentences_out, config.output_delimiter)?;
        write_table(&tokens, &config.tokens_out, config.output_delimiter)?;

        summary.sentence_rows = table.len();
        summary.token_rows = tokens.len();
        summary.empty_documents = explosion.empty_documents;
        info!(
            target: TARGET_PIPELINE,
            "Run finished: {} rows loaded, {} short, {} without reference, {} sentence rows, {} token rows, {} articles without tokens",
            summary.loaded_rows,
            summary.short_rows,
            summary.unreferenced_rows,
            summary.sentence_rows,
            summary.token_rows,
            summary.empty_documents
        );
        Ok(summary)
    }

    /// Attaches the orientation column. Returns the rows dropped by a reference join.
    pub fn tag_orientation(&self, table: &mut Table, reference: Option<&Table>) -> Result<usize> {
        match reference {
            Some(reference) => join_reference(table, reference, &self.columns.id),
            None => {
                let tagger = OrientationTagger::new(
                    &self.lexicon.left_newspapers,
                    &self.lexicon.right_newspapers,
                )?;
                tagger.apply(table, &self.columns.newspaper)?;
                Ok(0)
            }
        }
    }

    pub fn strip_boilerplate(&self, table: &mut Table) -> Result<usize> {
        BoilerplateStripper::new(&self.lexicon.markers).apply(table, &self.columns.article)
    }

    /// Adds tone columns when a classifier is configured and the table lacks them.
    pub fn score_tone(&self, table: &mut Table) -> Result<bool> {
        match self.classifier {
            Some(classifier) => ToneStage::new(classifier).apply(table, &self.columns.sentence),
            None => {
                if !ToneStage::has_scores(table) {
                    warn!(
                        target: TARGET_PIPELINE,
                        "No tone columns in input and no classifier configured"
                    );
                }
                Ok(false)
            }
        }
    }

    /// Expands articles into the long token table.
    ///
    /// When the article-key column exists the table is first reduced to one
    /// row per article (the first sentence row wins), so each article is
    /// tokenized once. The text columns are never carried into the token
    /// table, and after that reduction neither are the tone columns, which
    /// score a single sentence rather than the article. Without the key every
    /// row is tokenized and keeps its own scores.
    pub fn tokenize(&self, table: &Table, normalizer: &TokenNormalizer) -> Result<Explosion> {
        let mut drop = vec![self.columns.article.as_str(), self.columns.sentence.as_str()];
        let articles = if table.has_column(&self.columns.article_key) {
            let deduped = table.dedup_by(&self.columns.article_key)?;
            info!(
                target: TARGET_PIPELINE,
                "Tokenizing {} articles ({} sentence rows share an article key)",
                deduped.len(),
                table.len() - deduped.len()
            );
            drop.extend(TONE_COLUMNS);
            deduped
        } else {
            table.clone()
        };

        normalizer
            .explode(&articles, &self.columns.article, &drop, self.lemmatizer)
            .context("Token normalization failed")
    }

    /// Raw word frequencies after filtering, before mapping and stopwords.
    pub fn word_frequencies(&self, table: &mut Table) -> Result<Table> {
        filter_short_sentences(table, &self.columns.sentence)?;
        self.strip_boilerplate(table)?;
        let explosion = self.tokenize(table, &TokenNormalizer::unmapped())?;
        word_counts(&explosion.table)
    }

    /// Control corpus: orientation by newspaper and the length filter, no tokens.
    pub fn prepare_controls(&self, table: &mut Table) -> Result<()> {
        self.tag_orientation(table, None)?;
        filter_short_sentences(table, &self.columns.sentence)?;
        let dropped = table.drop_columns(CONTROL_BOOKKEEPING_COLUMNS);
        if !dropped.is_empty() {
            info!(target: TARGET_PIPELINE, "Dropped bookkeeping columns {:?}", dropped);
        }
        Ok(())
    }
}

/// Drops rows whose sentence has fewer than [`MIN_SENTENCE_WORDS`] words.
/// Returns the number of rows removed.
pub fn filter_short_sentences(table: &mut Table, sentence_column: &str) -> Result<usize> {
    let idx = table.column_index(sentence_column)?;
    let removed = table.retain(|row| row[idx].split_whitespace().count() >= MIN_SENTENCE_WORDS);
    info!(
        target: TARGET_PIPELINE,
        "Removed {} rows with fewer than {} words in '{}'",
        removed, MIN_SENTENCE_WORDS, sentence_column
    );
    Ok(removed)
}

pub fn prune_bookkeeping(table: &mut Table) {
    let dropped = table.drop_columns(BOOKKEEPING_COLUMNS);
    if !dropped.is_empty() {
        info!(target: TARGET_PIPELINE, "Dropped bookkeeping columns {:?}", dropped);
    }
}
