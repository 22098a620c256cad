use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use super::model::RecordTable;
use crate::error::{PipelineError, Result};

/// Write `table` as delimited text: header row, then one line per row, no
/// index column.
///
/// Data goes to a sibling `.tmp` file first and is renamed into place, so a
/// failed run never leaves a half-written output behind.
pub fn write_table(table: &RecordTable, path: &Path, delimiter: u8) -> Result<()> {
    let tmp = temp_path(path);
    let export_err = |source: std::io::Error| PipelineError::Export {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(export_err)?;
    }

    if let Err(e) = write_rows(table, &tmp, delimiter) {
        let _ = std::fs::remove_file(&tmp);
        return Err(export_err(e));
    }

    std::fs::rename(&tmp, path).map_err(|source| {
        let _ = std::fs::remove_file(&tmp);
        export_err(source)
    })?;

    log::info!("Wrote {} rows to {}", table.height(), path.display());
    Ok(())
}

/// Every failure here is file-system trouble (create, write, flush), so CSV
/// errors are carried as I/O errors.
fn write_rows(table: &RecordTable, path: &Path, delimiter: u8) -> std::io::Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|v| v.to_field()))?;
    }
    writer.flush()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
