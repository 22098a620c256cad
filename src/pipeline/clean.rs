use crate::data::filter::first_occurrence_indices;
use crate::data::model::RecordTable;
use crate::stats::missing::{missing_report, MissingReport};

/// Result of the cleaning stage.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub table: RecordTable,
    pub duplicates_removed: usize,
    pub missing_before: MissingReport,
    pub missing_after: MissingReport,
}

/// Drop rows equal to an earlier row across every column. Order of first
/// occurrences is preserved; applying it twice changes nothing.
pub fn drop_duplicates(table: &RecordTable) -> RecordTable {
    table.take_rows(&first_occurrence_indices(table))
}

/// Deduplicate and report missingness on both sides of it.
pub fn clean(table: RecordTable) -> CleanOutcome {
    let missing_before = missing_report(&table);
    let deduped = drop_duplicates(&table);
    let duplicates_removed = table.height() - deduped.height();
    let missing_after = missing_report(&deduped);

    log::info!(
        "Removed {duplicates_removed} duplicate rows, {} remain",
        deduped.height()
    );

    CleanOutcome {
        table: deduped,
        duplicates_removed,
        missing_before,
        missing_after,
    }
}
