use anyhow::{anyhow, bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use super::{AnalyzedToken, Lemmatizer, PosTag};
use crate::table::{load_table, Table};
use crate::TARGET_LOADER;

/// Replays token annotations produced by an external NLP pipeline.
///
/// The annotation file has one row per token with the columns `doc` (the
/// zero-based position of the document in the batch), `lemma`, `pos`,
/// `is_stop` and `is_alpha`; an optional `text` column holds the surface
/// form. Documents without any token row are treated as empty.
#[derive(Debug, Clone, Default)]
pub struct AnnotationLemmatizer {
    documents: BTreeMap<usize, Vec<AnalyzedToken>>,
}

impl AnnotationLemmatizer {
    pub fn new(documents: Vec<Vec<AnalyzedToken>>) -> Self {
        Self {
            documents: documents.into_iter().enumerate().collect(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let table = load_table(path, delimiter)?;
        let lemmatizer = Self::from_table(&table)
            .with_context(|| format!("Invalid token annotations in {}", path.display()))?;
        info!(
            target: TARGET_LOADER,
            "Loaded annotations for {} documents from {}",
            lemmatizer.document_count(),
            path.display()
        );
        Ok(lemmatizer)
    }

    pub fn from_table(table: &Table) -> Result<Self> {
        let doc = table.column_index("doc")?;
        let lemma = table.column_index("lemma")?;
        let pos = table.column_index("pos")?;
        let is_stop = table.column_index("is_stop")?;
        let is_alpha = table.column_index("is_alpha")?;
        let text = table.headers().iter().position(|h| h == "text");

        let mut documents: BTreeMap<usize, Vec<AnalyzedToken>> = BTreeMap::new();
        for (line, row) in table.rows().iter().enumerate() {
            let doc_idx: usize = row[doc]
                .trim()
                .parse()
                .map_err(|_| anyhow!("row {}: invalid document index '{}'", line + 1, row[doc]))?;
            let tag = PosTag::parse(&row[pos])
                .ok_or_else(|| anyhow!("row {}: unknown POS tag '{}'", line + 1, row[pos]))?;

            documents.entry(doc_idx).or_default().push(AnalyzedToken {
                text: text.map(|t| row[t].clone()).unwrap_or_else(|| row[lemma].clone()),
                lemma: row[lemma].clone(),
                pos: tag,
                is_stop: parse_flag(&row[is_stop])
                    .with_context(|| format!("row {}: is_stop", line + 1))?,
                is_alpha: parse_flag(&row[is_alpha])
                    .with_context(|| format!("row {}: is_alpha", line + 1))?,
            });
        }

        Ok(Self { documents })
    }

    /// One past the highest annotated document index.
    pub fn document_count(&self) -> usize {
        self.documents
            .last_key_value()
            .map_or(0, |(last, _)| last + 1)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim() {
        "True" | "true" | "TRUE" | "1" => Ok(true),
        "False" | "false" | "FALSE" | "0" => Ok(false),
        other => bail!("expected a boolean, found '{}'", other),
    }
}

impl Lemmatizer for AnnotationLemmatizer {
    fn analyze_batch(&self, texts: &[&str]) -> Result<Vec<Vec<AnalyzedToken>>> {
        // trailing documents without tokens never produce a row in the file
        if let Some((&last, _)) = self.documents.last_key_value() {
            if last >= texts.len() {
                bail!(
                    "annotations refer to document {} but the batch has {}",
                    last,
                    texts.len()
                );
            }
        }

        let mut documents = vec![Vec::new(); texts.len()];
        for (&idx, tokens) in &self.documents {
            documents[idx] = tokens.clone();
        }
        Ok(documents)
    }
}
