use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::{Encoding, UTF_8};

use super::model::{ColumnType, RecordTable, Value};
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// How a delimited file is read.
#[derive(Debug, Clone)]
pub struct LoadOptions<'a> {
    /// WHATWG label, e.g. `ISO-8859-1` or `utf-8`.
    pub encoding: &'a str,
    pub delimiter: u8,
    /// Cells that load as [`Value::Null`].
    pub na_values: &'a [String],
}

/// Load a delimited file into a [`RecordTable`].
///
/// The first row is the header. Column types are inferred after reading:
/// see [`infer_column`].
pub fn load_table(path: &Path, options: &LoadOptions<'_>) -> Result<RecordTable> {
    let bytes = std::fs::read(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode(&bytes, options.encoding, path)?;
    let table = parse_delimited(&text, options)?;
    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.height(),
        table.width(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode `bytes` with the encoding named by `label`. Malformed input is an
/// error rather than being replaced with U+FFFD.
fn decode(bytes: &[u8], label: &str, path: &Path) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| PipelineError::UnknownEncoding(label.to_owned()))?;

    let bytes = if encoding == UTF_8 {
        bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
    } else {
        bytes
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| PipelineError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name().to_owned(),
        })
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse decoded text. Rows may be shorter than the header (padded with
/// nulls) but not longer.
pub fn parse_delimited(text: &str, options: &LoadOptions<'_>) -> Result<RecordTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
    let width = headers.len();

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    let mut height = 0usize;

    for result in reader.records() {
        let record = result?;
        if record.len() > width {
            log::error!(
                "Row {} has {} fields, header has {width}",
                height + 1,
                record.len()
            );
            return Err(PipelineError::Csv(csv::Error::from(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "row {} has {} fields but the header has {width}",
                    height + 1,
                    record.len()
                ),
            ))));
        }
        for (col, column_cells) in cells.iter_mut().enumerate() {
            let raw = record.get(col).unwrap_or("");
            let is_na = options.na_values.iter().any(|na| na == raw);
            column_cells.push((!is_na).then(|| raw.to_owned()));
        }
        height += 1;
    }

    let (types, columns): (Vec<ColumnType>, Vec<Vec<Value>>) =
        cells.into_iter().map(infer_column).unzip();
    let rows = (0..height)
        .map(|r| columns.iter().map(|c| c[r].clone()).collect())
        .collect();

    Ok(RecordTable::with_types(headers, types, rows))
}

/// Type a whole column at once: Integer if every present cell parses as
/// `i64`, else Float if every present cell parses as `f64`, else Text.
/// Absent cells are `Null` whatever the column type. A column with rows but
/// no present cell is Float; a column with no rows at all is Text.
pub fn infer_column(cells: Vec<Option<String>>) -> (ColumnType, Vec<Value>) {
    if cells.is_empty() {
        return (ColumnType::Text, Vec::new());
    }

    let present = || cells.iter().flatten();

    if present().next().is_none() {
        return (ColumnType::Float, vec![Value::Null; cells.len()]);
    }

    if present().all(|s| s.trim().parse::<i64>().is_ok()) {
        let values = cells
            .iter()
            .map(|c| match c {
                Some(s) => s.trim().parse().map(Value::Integer).unwrap_or(Value::Null),
                None => Value::Null,
            })
            .collect();
        return (ColumnType::Integer, values);
    }

    if present().all(|s| s.trim().parse::<f64>().is_ok()) {
        let values = cells
            .iter()
            .map(|c| match c {
                Some(s) => s.trim().parse().map(Value::Float).unwrap_or(Value::Null),
                None => Value::Null,
            })
            .collect();
        return (ColumnType::Float, values);
    }

    let values = cells
        .into_iter()
        .map(|c| c.map(Value::Text).unwrap_or(Value::Null))
        .collect();
    (ColumnType::Text, values)
}
