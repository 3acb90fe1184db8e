//! In-memory tabular data.
//!
//! Every stage of the pipeline reads and writes a [`Table`]: a header row plus
//! string rows of the same width. Columns are always addressed by name, so a
//! missing column is reported as an error instead of silently reading the
//! wrong field.

mod io;

pub use self::io::{load_table, write_table};

use anyhow::{anyhow, bail, Result};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Position of a named column. A missing column is fatal for every caller.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers.iter().position(|h| h == name).ok_or_else(|| {
            anyhow!(
                "expected column '{}' not found (available: {})",
                name,
                self.headers.join(", ")
            )
        })
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.headers.len() {
            bail!(
                "row has {} fields but table has {} columns",
                row.len(),
                self.headers.len()
            );
        }
        self.rows.push(row);
        Ok(())
    }

    /// Iterates over the values of one column.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &str>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| row[idx].as_str()))
    }

    /// Rewrites every value of a column in place.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&str) -> String,
    {
        let idx = self.column_index(name)?;
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        Ok(())
    }

    /// Appends a column. An existing column of the same name is overwritten.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            bail!(
                "column '{}' has {} values but table has {} rows",
                name,
                values.len(),
                self.rows.len()
            );
        }

        match self.headers.iter().position(|h| h == name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Keeps only the rows for which the predicate holds. Returns the number removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&[String]) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        before - self.rows.len()
    }

    /// Removes the named columns that exist; names not present are ignored.
    pub fn drop_columns(&mut self, names: &[&str]) -> Vec<String> {
        let drop: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| names.contains(&h.as_str()))
            .map(|(idx, _)| idx)
            .collect();

        if drop.is_empty() {
            return Vec::new();
        }

        let keep = |idx: &usize| !drop.contains(idx);
        let dropped = drop.iter().map(|&idx| self.headers[idx].clone()).collect();

        self.headers = take_indices(&self.headers, keep);
        for row in &mut self.rows {
            *row = take_indices(row, keep);
        }
        dropped
    }

    /// Copy of the table holding the first row for every distinct value of `column`.
    pub fn dedup_by(&self, column: &str) -> Result<Table> {
        let idx = self.column_index(column)?;
        let mut seen = HashSet::new();
        let rows = self
            .rows
            .iter()
            .filter(|row| seen.insert(row[idx].clone()))
            .cloned()
            .collect();
        Ok(Table {
            headers: self.headers.clone(),
            rows,
        })
    }
}

fn take_indices<F>(values: &[String], keep: F) -> Vec<String>
where
    F: Fn(&usize) -> bool,
{
    values
        .iter()
        .enumerate()
        .filter(|(idx, _)| keep(idx))
        .map(|(_, v)| v.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["ID", "Newspaper", "merge_index"]);
        table
            .push_row(vec!["1".into(), "Politiken".into(), "a".into()])
            .unwrap();
        table
            .push_row(vec!["2".into(), "Berlingske".into(), "a".into()])
            .unwrap();
        table
            .push_row(vec!["3".into(), "Information".into(), "b".into()])
            .unwrap();
        table
    }

    #[test]
    fn test_missing_column_is_error() {
        let table = sample();
        let err = table.column_index("Political_Orientation").unwrap_err();
        assert!(err.to_string().contains("Political_Orientation"));
        assert!(table.column_index("Newspaper").is_ok());
    }

    #[test]
    fn test_push_row_rejects_wrong_width() {
        let mut table = sample();
        assert!(table.push_row(vec!["4".into()]).is_err());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_drop_columns_ignores_unknown_names() {
        let mut table = sample();
        let dropped = table.drop_columns(&["merge_index", "Unnamed: 0"]);
        assert_eq!(dropped, vec!["merge_index".to_string()]);
        assert_eq!(table.headers(), &["ID".to_string(), "Newspaper".to_string()]);
        assert!(table.rows().iter().all(|row| row.len() == 2));
    }

    #[test]
    fn test_set_column_appends_and_overwrites() {
        let mut table = sample();
        table
            .set_column("score", vec!["x".into(), "y".into(), "z".into()])
            .unwrap();
        assert_eq!(table.headers().len(), 4);
        table
            .set_column("ID", vec!["7".into(), "8".into(), "9".into()])
            .unwrap();
        assert_eq!(table.column("ID").unwrap().collect::<Vec<_>>(), vec!["7", "8", "9"]);
        assert!(table.set_column("short", vec!["1".into()]).is_err());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let table = sample();
        let deduped = table.dedup_by("merge_index").unwrap();
        assert_eq!(deduped.len(), 2);
        assert_eq!(
            deduped.column("ID").unwrap().collect::<Vec<_>>(),
            vec!["1", "3"]
        );
    }

    #[test]
    fn test_retain_reports_removed() {
        let mut table = sample();
        let idx = table.column_index("Newspaper").unwrap();
        let removed = table.retain(|row| row[idx] != "Berlingske");
        assert_eq!(removed, 1);
        assert_eq!(table.len(), 2);
    }
}
