//! Static lookup data for a pipeline run.
//!
//! The boilerplate markers, the newspaper orientation lists and the lemma
//! mapping are gathered into one immutable [`Lexicon`] at start-up and passed
//! by reference to every stage. Built-in defaults cover the parental leave
//! corpus; a JSON file can replace any of them, and the orientation lists can
//! be extended from the environment.
//!
//! ## Lexicon file
//! ```json
//! {
//!   "markers": [" FOTO: ", "/ritzau/"],
//!   "left_newspapers": ["Politiken"],
//!   "right_newspapers": ["Berlingske"],
//!   "lemma_mapping": { "børn": "barn" }
//! }
//! ```
//! Every field is optional.

mod mapping;
mod markers;
mod newspapers;

pub use self::mapping::{LemmaMapping, MappingChain};
pub use self::markers::DEFAULT_MARKERS;
pub use self::newspapers::{DEFAULT_LEFT, DEFAULT_RIGHT};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::environment::{get_env_var_as_vec, LEFT_NEWSPAPERS_ENV, RIGHT_NEWSPAPERS_ENV};
use crate::TARGET_LOADER;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LexiconFile {
    markers: Option<Vec<String>>,
    left_newspapers: Option<Vec<String>>,
    right_newspapers: Option<Vec<String>>,
    lemma_mapping: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    pub markers: Vec<String>,
    pub left_newspapers: BTreeSet<String>,
    pub right_newspapers: BTreeSet<String>,
    pub mapping: LemmaMapping,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|s| s.to_string()).collect(),
            left_newspapers: DEFAULT_LEFT.iter().map(|s| s.to_string()).collect(),
            right_newspapers: DEFAULT_RIGHT.iter().map(|s| s.to_string()).collect(),
            mapping: LemmaMapping::default(),
        }
    }
}

impl Lexicon {
    /// Built-in tables, optionally overridden by a lexicon file, then extended
    /// with newspaper names from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut lexicon = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        lexicon.extend_newspapers(
            get_env_var_as_vec(LEFT_NEWSPAPERS_ENV, ';'),
            get_env_var_as_vec(RIGHT_NEWSPAPERS_ENV, ';'),
        );

        info!(
            target: TARGET_LOADER,
            "Lexicon ready: {} markers, {} left / {} right newspapers, {} lemma variants",
            lexicon.markers.len(),
            lexicon.left_newspapers.len(),
            lexicon.right_newspapers.len(),
            lexicon.mapping.len()
        );
        Ok(lexicon)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file: {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Failed to parse lexicon file: {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: LexiconFile = serde_json::from_str(raw)?;
        let mut lexicon = Self::default();

        if let Some(markers) = file.markers {
            lexicon.markers = markers;
        }
        if let Some(left) = file.left_newspapers {
            lexicon.left_newspapers = left.into_iter().collect();
        }
        if let Some(right) = file.right_newspapers {
            lexicon.right_newspapers = right.into_iter().collect();
        }
        if let Some(map) = file.lemma_mapping {
            lexicon.mapping = LemmaMapping::new(map);
        }
        Ok(lexicon)
    }

    pub fn extend_newspapers(&mut self, left: Vec<String>, right: Vec<String>) {
        if !left.is_empty() || !right.is_empty() {
            debug!(
                target: TARGET_LOADER,
                "Extending newspaper lists with {:?} (left) and {:?} (right)",
                left, right
            );
        }
        self.left_newspapers.extend(left);
        self.right_newspapers.extend(right);
    }

    /// Newspaper names present in both orientation lists.
    pub fn orientation_overlap(&self) -> Vec<&str> {
        self.left_newspapers
            .intersection(&self.right_newspapers)
            .map(String::as_str)
            .collect()
    }
}
