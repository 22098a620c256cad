use crate::data::model::RecordTable;
use crate::error::{PipelineError, Result};

/// Project exactly `names`, in that order. Every absent column is reported at
/// once rather than failing on the first.
pub fn select_columns(table: &RecordTable, names: &[String]) -> Result<RecordTable> {
    table.select(names).map_err(|missing| {
        log::error!("Input lacks selected columns: {missing:?}");
        PipelineError::MissingColumns { missing }
    })
}
