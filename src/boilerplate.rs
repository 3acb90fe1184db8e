use anyhow::Result;
use tracing::{debug, info};

use crate::table::Table;
use crate::TARGET_BOILERPLATE;

/// Truncates `text` at the first occurrence of each marker, in list order.
///
/// Markers are applied one after another to whatever the previous markers
/// left, so the order of the list changes the result. A marker at the very
/// start of the text leaves an empty string. Empty markers are skipped.
pub fn strip_boilerplate<S: AsRef<str>>(text: &str, markers: &[S]) -> String {
    let mut remaining = text;
    for marker in markers {
        let marker = marker.as_ref();
        if marker.is_empty() {
            continue;
        }
        if let Some(pos) = remaining.find(marker) {
            remaining = &remaining[..pos];
        }
    }
    remaining.to_string()
}

pub struct BoilerplateStripper<'a> {
    markers: &'a [String],
}

impl<'a> BoilerplateStripper<'a> {
    pub fn new(markers: &'a [String]) -> Self {
        Self { markers }
    }

    pub fn strip(&self, text: &str) -> String {
        strip_boilerplate(text, self.markers)
    }

    /// Strips the article column in place. Returns how many rows changed.
    pub fn apply(&self, table: &mut Table, column: &str) -> Result<usize> {
        let mut shortened = 0;
        let mut emptied = 0;

        table.map_column(column, |text| {
            let stripped = self.strip(text);
            if stripped.len() != text.len() {
                shortened += 1;
                if stripped.is_empty() {
                    emptied += 1;
                }
            }
            stripped
        })?;

        info!(
            target: TARGET_BOILERPLATE,
            "Stripped boilerplate from {} of {} rows in '{}'",
            shortened,
            table.len(),
            column
        );
        if emptied > 0 {
            debug!(
                target: TARGET_BOILERPLATE,
                "{} rows in '{}' were emptied by a marker at position 0", emptied, column
            );
        }

        Ok(shortened)
    }
}
