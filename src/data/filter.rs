use std::collections::HashSet;

use super::model::{RecordTable, Value};

// ---------------------------------------------------------------------------
// Row predicates returning the indices of rows to keep
// ---------------------------------------------------------------------------

/// Indices of rows that have a value in every one of `columns`.
///
/// A row passes when:
/// * each named column exists and its cell is not `Null`
/// * an unknown column name fails every row
pub fn complete_indices(table: &RecordTable, columns: &[&str]) -> Vec<usize> {
    let positions: Option<Vec<usize>> = columns.iter().map(|c| table.column_index(c)).collect();
    let Some(positions) = positions else {
        return Vec::new();
    };

    table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| positions.iter().all(|&p| !row[p].is_null()))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of the first occurrence of every distinct row, in input order.
pub fn first_occurrence_indices(table: &RecordTable) -> Vec<usize> {
    let mut seen: HashSet<&[Value]> = HashSet::with_capacity(table.height());
    table
        .rows()
        .iter()
        .enumerate()
        .filter(|&(_, row)| seen.insert(row.as_slice()))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RecordTable {
        RecordTable::new(
            vec!["a".to_owned(), "b".to_owned()],
            vec![
                vec![Value::Integer(1), Value::Null],
                vec![Value::Integer(2), Value::Float(0.5)],
                vec![Value::Integer(1), Value::Null],
                vec![Value::Null, Value::Float(0.5)],
            ],
        )
    }

    #[test]
    fn keeps_rows_with_all_values() {
        assert_eq!(complete_indices(&table(), &["a", "b"]), vec![1]);
        assert_eq!(complete_indices(&table(), &["a"]), vec![0, 1, 2]);
    }

    #[test]
    fn unknown_column_keeps_nothing() {
        assert!(complete_indices(&table(), &["zzz"]).is_empty());
    }

    #[test]
    fn first_occurrences_in_order() {
        assert_eq!(first_occurrence_indices(&table()), vec![0, 1, 3]);
    }
}
