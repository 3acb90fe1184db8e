//! Political orientation of a record, derived from its source newspaper.
//!
//! Two routes exist: exact membership of the newspaper name in the left or
//! right list, or an inner join with a reference table keyed on the record
//! identifier.

use anyhow::{bail, Result};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use tracing::{debug, info, warn};

use crate::table::Table;
use crate::{ORIENTATION_COLUMN, TARGET_ORIENTATION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Left,
    Right,
}

impl Orientation {
    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Left => "Left-winged",
            Orientation::Right => "Right-winged",
        }
    }

    /// Parses an exported label. Anything else, including an empty cell, is absent.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Left-winged" => Some(Orientation::Left),
            "Right-winged" => Some(Orientation::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Cell value written for an optional orientation: the label, or empty when absent.
pub fn orientation_cell(orientation: Option<Orientation>) -> String {
    orientation.map(|o| o.label().to_string()).unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct OrientationTagger<'a> {
    left: &'a BTreeSet<String>,
    right: &'a BTreeSet<String>,
}

impl<'a> OrientationTagger<'a> {
    /// Fails when a newspaper name appears in both lists.
    pub fn new(left: &'a BTreeSet<String>, right: &'a BTreeSet<String>) -> Result<Self> {
        let overlap: Vec<&String> = left.intersection(right).collect();
        if !overlap.is_empty() {
            bail!(
                "newspaper(s) listed as both left- and right-winged: {:?}",
                overlap
            );
        }
        Ok(Self { left, right })
    }

    /// Exact, case-sensitive membership lookup.
    pub fn tag(&self, newspaper: &str) -> Option<Orientation> {
        if self.left.contains(newspaper) {
            Some(Orientation::Left)
        } else if self.right.contains(newspaper) {
            Some(Orientation::Right)
        } else {
            None
        }
    }

    /// Appends the orientation column derived from `newspaper_column`.
    pub fn apply(&self, table: &mut Table, newspaper_column: &str) -> Result<()> {
        let mut untagged: HashMap<String, usize> = HashMap::new();
        let labels: Vec<String> = table
            .column(newspaper_column)?
            .map(|name| {
                let orientation = self.tag(name);
                if orientation.is_none() {
                    *untagged.entry(name.to_string()).or_default() += 1;
                }
                orientation_cell(orientation)
            })
            .collect();
        table.set_column(ORIENTATION_COLUMN, labels)?;

        let missing: usize = untagged.values().sum();
        info!(
            target: TARGET_ORIENTATION,
            "Tagged {} of {} rows with an orientation",
            table.len() - missing,
            table.len()
        );
        if !untagged.is_empty() {
            let mut names: Vec<_> = untagged.into_iter().collect();
            names.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            debug!(
                target: TARGET_ORIENTATION,
                "Newspapers in neither list: {:?}", names
            );
        }
        Ok(())
    }
}

/// Inner join of the reference table's orientation column on `id_column`.
///
/// Rows without a reference entry are dropped. When the reference table
/// lists an identifier twice, the first entry wins. Returns the number of
/// rows dropped.
pub fn join_reference(table: &mut Table, reference: &Table, id_column: &str) -> Result<usize> {
    let ref_id = reference.column_index(id_column)?;
    let ref_label = reference.column_index(ORIENTATION_COLUMN)?;

    let mut lookup: HashMap<&str, &str> = HashMap::with_capacity(reference.len());
    let mut duplicates = 0;
    for row in reference.rows() {
        if lookup.contains_key(row[ref_id].as_str()) {
            duplicates += 1;
            continue;
        }
        lookup.insert(row[ref_id].as_str(), row[ref_label].as_str());
    }
    if duplicates > 0 {
        warn!(
            target: TARGET_ORIENTATION,
            "Reference table lists {} identifiers more than once; keeping the first entry",
            duplicates
        );
    }

    let id_idx = table.column_index(id_column)?;
    let dropped = table.retain(|row| lookup.contains_key(row[id_idx].as_str()));

    let labels: Vec<String> = table
        .column(id_column)?
        .map(|id| orientation_cell(lookup.get(id).and_then(|l| Orientation::from_label(l))))
        .collect();
    table.set_column(ORIENTATION_COLUMN, labels)?;

    info!(
        target: TARGET_ORIENTATION,
        "Joined orientation for {} rows; {} rows had no reference entry",
        table.len(),
        dropped
    );
    Ok(dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;

    #[test]
    fn test_known_newspapers() {
        let lexicon = Lexicon::default();
        let tagger =
            OrientationTagger::new(&lexicon.left_newspapers, &lexicon.right_newspapers).unwrap();

        assert_eq!(tagger.tag("Politiken"), Some(Orientation::Left));
        assert_eq!(tagger.tag("Berlingske"), Some(Orientation::Right));
        assert_eq!(tagger.tag("Unknown Gazette"), None);
    }

    #[test]
    fn test_matching_is_exact() {
        let lexicon = Lexicon::default();
        let tagger =
            OrientationTagger::new(&lexicon.left_newspapers, &lexicon.right_newspapers).unwrap();

        assert_eq!(tagger.tag("politiken"), None);
        assert_eq!(tagger.tag("Politiken "), None);
        assert_eq!(
            tagger.tag("Jyllands-Posten (Abonnementsområde)"),
            Some(Orientation::Right)
        );
    }

    #[test]
    fn test_overlapping_lists_are_rejected() {
        let left: BTreeSet<String> = ["Politiken".to_string()].into_iter().collect();
        let right: BTreeSet<String> = ["Politiken".to_string(), "Berlingske".to_string()]
            .into_iter()
            .collect();
        assert!(OrientationTagger::new(&left, &right).is_err());
    }

    #[test]
    fn test_labels_round_trip() {
        for orientation in [Orientation::Left, Orientation::Right] {
            assert_eq!(Orientation::from_label(orientation.label()), Some(orientation));
        }
        assert_eq!(Orientation::from_label(""), None);
        assert_eq!(Orientation::from_label("Center"), None);
    }

    #[test]
    fn test_apply_appends_column() {
        let lexicon = Lexicon::default();
        let tagger =
            OrientationTagger::new(&lexicon.left_newspapers, &lexicon.right_newspapers).unwrap();
        let mut table = Table::new(["ID", "Newspaper"]);
        for (id, paper) in [("1", "Information"), ("2", "Børsen"), ("3", "Lokalavisen")] {
            table.push_row(vec![id.into(), paper.into()]).unwrap();
        }

        tagger.apply(&mut table, "Newspaper").unwrap();

        assert_eq!(
            table.column(ORIENTATION_COLUMN).unwrap().collect::<Vec<_>>(),
            vec!["Left-winged", "Right-winged", ""]
        );
    }

    #[test]
    fn test_join_reference_is_inner_join() {
        let mut table = Table::new(["ID", "sentences"]);
        for id in ["1", "2", "3"] {
            table.push_row(vec![id.into(), "tekst".into()]).unwrap();
        }
        let mut reference = Table::new(["ID", ORIENTATION_COLUMN]);
        reference
            .push_row(vec!["1".into(), "Right-winged".into()])
            .unwrap();
        reference
            .push_row(vec!["3".into(), "Left-winged".into()])
            .unwrap();
        reference
            .push_row(vec!["3".into(), "Right-winged".into()])
            .unwrap();

        let dropped = join_reference(&mut table, &reference, "ID").unwrap();

        assert_eq!(dropped, 1);
        assert_eq!(table.column("ID").unwrap().collect::<Vec<_>>(), vec!["1", "3"]);
        assert_eq!(
            table.column(ORIENTATION_COLUMN).unwrap().collect::<Vec<_>>(),
            vec!["Right-winged", "Left-winged"]
        );
    }

    #[test]
    fn test_join_reference_requires_label_column() {
        let mut table = Table::new(["ID"]);
        let reference = Table::new(["ID", "Newspaper"]);
        assert!(join_reference(&mut table, &reference, "ID").is_err());
    }
}
