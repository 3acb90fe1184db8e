use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::Table;
use crate::{TARGET_LOADER, TARGET_WRITER};

/// Reads a delimited file with a header row into a [`Table`].
///
/// A missing file, a malformed record, or a row with the wrong number of
/// fields aborts the load.
pub fn load_table<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Table> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open table: {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read header row of {}", path.display()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    if headers.is_empty() {
        bail!("Table {} has no header row", path.display());
    }

    let mut table = Table::new(headers);
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("Malformed record {} in {}", line + 1, path.display())
        })?;
        table
            .push_row(record.iter().map(str::to_string).collect())
            .with_context(|| format!("Record {} in {}", line + 1, path.display()))?;
    }

    info!(
        target: TARGET_LOADER,
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.headers().len(),
        path.display()
    );
    debug!(target: TARGET_LOADER, "Columns of {}: {:?}", path.display(), table.headers());

    Ok(table)
}

/// Writes a [`Table`] with a header row, creating the parent directory if needed.
pub fn write_table<P: AsRef<Path>>(table: &Table, path: P, delimiter: u8) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    info!(
        target: TARGET_WRITER,
        "Wrote {} rows to {}",
        table.len(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_load_with_semicolon() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("sentences.csv");

        let mut table = Table::new(["ID", "sentences"]);
        table
            .push_row(vec!["1".into(), "Far tager barsel; mor arbejder.".into()])
            .unwrap();
        write_table(&table, &path, b';').unwrap();

        let loaded = load_table(&path, b';').unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let err = load_table(dir.path().join("absent.csv"), b',').unwrap_err();
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn test_ragged_row_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "ID,Newspaper").unwrap();
        writeln!(file, "1,Politiken").unwrap();
        writeln!(file, "2,Berlingske,extra").unwrap();

        assert!(load_table(&path, b',').is_err());
    }

    #[test]
    fn test_byte_order_mark_is_stripped_from_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        std::fs::write(&path, "\u{feff}ID,Newspaper\n1,Politiken\n").unwrap();

        let loaded = load_table(&path, b',').unwrap();
        assert!(loaded.has_column("ID"));
    }
}
